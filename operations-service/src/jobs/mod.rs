//! Background jobs.

pub mod leave_accrual;

pub use leave_accrual::{
    AccrualCandidate, AccrualError, AccrualSettings, AccrualStore, AccrualSummary,
    BulkWriteOutcome, EligibilityRule, ItemOutcome, LeaveAccrualJob,
};
