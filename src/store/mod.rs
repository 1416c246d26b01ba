//! Record storage for contractors and billing records.
//!
//! The calculators never touch storage. The service layer reads contract
//! terms and billing records through the [`RecordStore`] trait and persists
//! what the calculators produce. The store owns the uniqueness rules: one
//! contractor per name, one billing record per contractor and period.

mod memory;

pub use memory::InMemoryStore;

use crate::error::EngineResult;
use crate::models::{BillingDraft, BillingRecord, Contractor, NewContractor, Period};

/// Persistence for contractors and billing records.
///
/// Every method is one atomic operation. Implementations must be safe to
/// share between request handlers.
pub trait RecordStore: Send + Sync {
    /// Looks up a contractor by identifier.
    fn contractor(&self, id: u32) -> EngineResult<Option<Contractor>>;

    /// Lists every contractor, ordered by identifier.
    fn contractors(&self) -> EngineResult<Vec<Contractor>>;

    /// Persists a new contractor.
    ///
    /// Fails with `ContractorConflict` if a contractor with the same first
    /// and last name exists.
    fn insert_contractor(&self, contractor: NewContractor) -> EngineResult<Contractor>;

    /// Replaces a stored contractor. Fails with `ContractorNotFound` if absent.
    fn update_contractor(&self, contractor: &Contractor) -> EngineResult<()>;

    /// Deletes a contractor and all of their billing records.
    fn delete_contractor(&self, id: u32) -> EngineResult<()>;

    /// Looks up a billing record by identifier.
    fn billing(&self, id: u32) -> EngineResult<Option<BillingRecord>>;

    /// Lists every billing record, ordered by identifier.
    fn billings(&self) -> EngineResult<Vec<BillingRecord>>;

    /// Lists the billing records of one period, ordered by identifier.
    fn billings_for_period(&self, period: Period) -> EngineResult<Vec<BillingRecord>>;

    /// Looks up the contractor's billing record for one period.
    fn billing_for(&self, contractor_id: u32, period: Period) -> EngineResult<Option<BillingRecord>>;

    /// Returns true if the contractor already has a record for the period.
    fn billing_exists(&self, contractor_id: u32, period: Period) -> EngineResult<bool> {
        Ok(self.billing_for(contractor_id, period)?.is_some())
    }

    /// Persists a computed billing.
    ///
    /// Fails with `BillingConflict` if the contractor already has a record
    /// for the draft's period.
    fn insert_billing(&self, draft: BillingDraft) -> EngineResult<BillingRecord>;

    /// Replaces a stored billing record. Fails with `BillingNotFound` if absent.
    fn update_billing(&self, record: &BillingRecord) -> EngineResult<()>;

    /// Deletes a billing record. Fails with `BillingNotFound` if absent.
    fn delete_billing(&self, id: u32) -> EngineResult<()>;
}
