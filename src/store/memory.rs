//! In-memory record store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};
use crate::models::{BillingDraft, BillingRecord, Contractor, NewContractor, Period};

use super::RecordStore;

#[derive(Debug, Default)]
struct Tables {
    contractors: BTreeMap<u32, Contractor>,
    billings: BTreeMap<u32, BillingRecord>,
    last_contractor_id: u32,
    last_billing_id: u32,
}

/// A [`RecordStore`] that keeps everything in process memory.
///
/// Identifiers are assigned sequentially from 1 and never reused. All
/// tables sit behind one lock, so each trait method is atomic.
///
/// # Example
///
/// ```
/// use contractor_billing::models::{ContractTerms, ContractType, NewContractor};
/// use contractor_billing::store::{InMemoryStore, RecordStore};
/// use rust_decimal::Decimal;
///
/// let store = InMemoryStore::new();
/// let contractor = store
///     .insert_contractor(NewContractor {
///         first_name: "Anna".to_string(),
///         last_name: "Nowak".to_string(),
///         terms: ContractTerms::new(
///             ContractType::Mandate,
///             Decimal::from(50),
///             160,
///             Decimal::new(15, 1),
///             false,
///             Decimal::from(80),
///         ).unwrap(),
///     })
///     .unwrap();
///
/// assert_eq!(contractor.id, 1);
/// assert_eq!(store.contractor(1).unwrap(), Some(contractor));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| EngineError::StoreUnavailable {
            message: e.to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| EngineError::StoreUnavailable {
            message: e.to_string(),
        })
    }
}

impl RecordStore for InMemoryStore {
    fn contractor(&self, id: u32) -> EngineResult<Option<Contractor>> {
        Ok(self.read()?.contractors.get(&id).cloned())
    }

    fn contractors(&self) -> EngineResult<Vec<Contractor>> {
        Ok(self.read()?.contractors.values().cloned().collect())
    }

    fn insert_contractor(&self, contractor: NewContractor) -> EngineResult<Contractor> {
        let mut tables = self.write()?;

        let duplicate = tables.contractors.values().any(|existing| {
            existing.first_name == contractor.first_name
                && existing.last_name == contractor.last_name
        });
        if duplicate {
            return Err(EngineError::ContractorConflict {
                first_name: contractor.first_name,
                last_name: contractor.last_name,
            });
        }

        tables.last_contractor_id += 1;
        let contractor = contractor.into_contractor(tables.last_contractor_id);
        tables.contractors.insert(contractor.id, contractor.clone());
        Ok(contractor)
    }

    fn update_contractor(&self, contractor: &Contractor) -> EngineResult<()> {
        let mut tables = self.write()?;
        match tables.contractors.get_mut(&contractor.id) {
            Some(stored) => {
                *stored = contractor.clone();
                Ok(())
            }
            None => Err(EngineError::ContractorNotFound { id: contractor.id }),
        }
    }

    fn delete_contractor(&self, id: u32) -> EngineResult<()> {
        let mut tables = self.write()?;
        if tables.contractors.remove(&id).is_none() {
            return Err(EngineError::ContractorNotFound { id });
        }
        tables.billings.retain(|_, record| record.contractor_id() != id);
        Ok(())
    }

    fn billing(&self, id: u32) -> EngineResult<Option<BillingRecord>> {
        Ok(self.read()?.billings.get(&id).cloned())
    }

    fn billings(&self) -> EngineResult<Vec<BillingRecord>> {
        Ok(self.read()?.billings.values().cloned().collect())
    }

    fn billings_for_period(&self, period: Period) -> EngineResult<Vec<BillingRecord>> {
        Ok(self
            .read()?
            .billings
            .values()
            .filter(|record| record.period() == period)
            .cloned()
            .collect())
    }

    fn billing_for(&self, contractor_id: u32, period: Period) -> EngineResult<Option<BillingRecord>> {
        Ok(self
            .read()?
            .billings
            .values()
            .find(|record| record.contractor_id() == contractor_id && record.period() == period)
            .cloned())
    }

    fn insert_billing(&self, draft: BillingDraft) -> EngineResult<BillingRecord> {
        let mut tables = self.write()?;
        let contractor_id = draft.contractor_id();
        let period = draft.period();

        if !tables.contractors.contains_key(&contractor_id) {
            return Err(EngineError::ContractorNotFound { id: contractor_id });
        }
        let duplicate = tables
            .billings
            .values()
            .any(|record| record.contractor_id() == contractor_id && record.period() == period);
        if duplicate {
            return Err(EngineError::BillingConflict {
                contractor_id,
                period,
            });
        }

        tables.last_billing_id += 1;
        let record = draft.into_record(tables.last_billing_id);
        tables.billings.insert(record.id(), record.clone());
        Ok(record)
    }

    fn update_billing(&self, record: &BillingRecord) -> EngineResult<()> {
        let mut tables = self.write()?;
        match tables.billings.get_mut(&record.id()) {
            Some(stored) => {
                *stored = record.clone();
                Ok(())
            }
            None => Err(EngineError::BillingNotFound { id: record.id() }),
        }
    }

    fn delete_billing(&self, id: u32) -> EngineResult<()> {
        let mut tables = self.write()?;
        match tables.billings.remove(&id) {
            Some(_) => Ok(()),
            None => Err(EngineError::BillingNotFound { id }),
        }
    }
}
