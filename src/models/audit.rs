//! Audit trail model.

use serde::{Deserialize, Serialize};

/// A single step in the audit trail of a billing calculation.
///
/// Each step captures which rule produced an amount, the figures it was
/// given, the figures it produced, and a human-readable explanation.
///
/// # Example
///
/// ```
/// use contractor_billing::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "mandate_hourly".to_string(),
///     rule_name: "Mandate Hourly Pay".to_string(),
///     input: serde_json::json!({"worked_hours": "160", "hourly_rate": "59.53"}),
///     output: serde_json::json!({"amount": "9524.80"}),
///     reasoning: "160 hours × $59.53 = $9524.80".to_string(),
/// };
/// assert_eq!(step.rule_id, "mandate_hourly");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
