//! Contract type model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kind of contract a contractor works under.
///
/// The contract type selects the remuneration rule applied to the hours
/// worked in a period. On the wire it is a snake_case string; older clients
/// send a numeric tag instead, which [`ContractType::from_tag`] understands.
///
/// # Example
///
/// ```
/// use contractor_billing::models::ContractType;
///
/// assert_eq!(ContractType::from_tag(3).unwrap(), ContractType::B2b);
/// assert_eq!(ContractType::B2b.tag(), 3);
/// assert!(ContractType::from_tag(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Contract of employment: fixed monthly salary with paid overtime.
    Employment,
    /// Contract of mandate: flat hourly pay.
    Mandate,
    /// Business-to-business contract: hourly pay, overtime premium only if agreed.
    B2b,
}

impl ContractType {
    /// Resolves a numeric contract type tag (1 = employment, 2 = mandate, 3 = B2B).
    pub fn from_tag(tag: i64) -> EngineResult<Self> {
        match tag {
            1 => Ok(ContractType::Employment),
            2 => Ok(ContractType::Mandate),
            3 => Ok(ContractType::B2b),
            _ => Err(EngineError::UnknownContractType { tag }),
        }
    }

    /// Returns the numeric tag for this contract type.
    pub fn tag(&self) -> i64 {
        match self {
            ContractType::Employment => 1,
            ContractType::Mandate => 2,
            ContractType::B2b => 3,
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractType::Employment => write!(f, "employment"),
            ContractType::Mandate => write!(f, "mandate"),
            ContractType::B2b => write!(f, "b2b"),
        }
    }
}
