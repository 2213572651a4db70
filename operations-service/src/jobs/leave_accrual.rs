//! Scheduled leave accrual.
//!
//! On each trigger the job selects active employees whose whole months of
//! service are a positive-or-zero multiple of the accrual period and writes
//! one leave credit per employee. Writes fan out with
//! `buffer_unordered(concurrency)`; each write stands alone, so a failed
//! insert is logged and counted without affecting the others.
//!
//! Credits carry the first day of the run month as their `period`. The
//! store rejects a second credit for the same employee and period, which
//! makes re-running a month harmless.

use crate::config::AccrualConfig;
use crate::models::{EmployeeStatus, LeaveCreditSource, NewLeaveCredit};
use crate::services::metrics::{record_accrual_item, record_accrual_run};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use rust_decimal::Decimal;
use service_core::error::StorageError;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{Instrument, Span};

/// Credits are due when the whole months since joining divide evenly by
/// `period_months`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityRule {
    pub period_months: u32,
}

impl EligibilityRule {
    pub fn new(period_months: u32) -> Self {
        Self {
            period_months: period_months.max(1),
        }
    }

    /// Whole calendar months from `anchor` to `today`, counting a month only
    /// once its day-of-month has been reached. `None` when `anchor` is in the
    /// future.
    pub fn months_elapsed(anchor: NaiveDate, today: NaiveDate) -> Option<u32> {
        if anchor > today {
            return None;
        }
        let mut months = (today.year() - anchor.year()) * 12 + today.month() as i32
            - anchor.month() as i32;
        if today.day() < anchor.day() {
            months -= 1;
        }
        u32::try_from(months).ok()
    }

    pub fn is_eligible(&self, status: EmployeeStatus, anchor: NaiveDate, today: NaiveDate) -> bool {
        status == EmployeeStatus::Active
            && Self::months_elapsed(anchor, today)
                .is_some_and(|months| months % self.period_months == 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccrualCandidate {
    pub employee_id: i64,
    pub joining_date: NaiveDate,
}

/// Storage used by the accrual job.
#[async_trait]
pub trait AccrualStore: Send + Sync {
    /// Non-deleted employees eligible under `rule` on `today`, ordered by id.
    async fn eligible_employees(
        &self,
        rule: EligibilityRule,
        today: NaiveDate,
    ) -> Result<Vec<AccrualCandidate>, StorageError>;

    /// Insert an accrual credit. `Ok(None)` when the employee already holds
    /// a credit for the same period.
    async fn insert_accrual(&self, credit: NewLeaveCredit) -> Result<Option<i64>, StorageError>;
}

/// Result of one employee's write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkWriteOutcome {
    Credited { credit_id: i64 },
    AlreadyCredited,
    Failed { reason: String },
}

impl BulkWriteOutcome {
    fn label(&self) -> &'static str {
        match self {
            BulkWriteOutcome::Credited { .. } => "credited",
            BulkWriteOutcome::AlreadyCredited => "already_credited",
            BulkWriteOutcome::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub employee_id: i64,
    pub outcome: BulkWriteOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccrualSummary {
    pub run_date: NaiveDate,
    pub period: NaiveDate,
    /// Ordered by employee id.
    pub outcomes: Vec<ItemOutcome>,
}

impl AccrualSummary {
    pub fn selected(&self) -> usize {
        self.outcomes.len()
    }

    pub fn credited(&self) -> usize {
        self.count(|o| matches!(o, BulkWriteOutcome::Credited { .. }))
    }

    pub fn already_credited(&self) -> usize {
        self.count(|o| matches!(o, BulkWriteOutcome::AlreadyCredited))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, BulkWriteOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&BulkWriteOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|item| pred(&item.outcome)).count()
    }
}

#[derive(Debug, Error)]
pub enum AccrualError {
    #[error("A leave accrual run is already in progress")]
    AlreadyRunning,

    #[error("Failed to select eligible employees: {0}")]
    Selection(#[from] StorageError),
}

/// Per-run settings derived from [`AccrualConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualSettings {
    pub rule: EligibilityRule,
    pub quantity: Decimal,
    pub concurrency: usize,
}

impl From<&AccrualConfig> for AccrualSettings {
    fn from(config: &AccrualConfig) -> Self {
        Self {
            rule: EligibilityRule::new(config.period_months),
            quantity: config.quantity,
            concurrency: config.concurrency.max(1),
        }
    }
}

pub struct LeaveAccrualJob {
    store: Arc<dyn AccrualStore>,
    settings: AccrualSettings,
    span: Span,
    running: Mutex<()>,
}

impl LeaveAccrualJob {
    /// `span` is the logging context every run is recorded under.
    pub fn new(store: Arc<dyn AccrualStore>, settings: AccrualSettings, span: Span) -> Self {
        Self {
            store,
            settings,
            span,
            running: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> AccrualSettings {
        self.settings
    }

    /// Run for today's UTC date.
    pub async fn run_now(&self, trigger: &'static str) -> Result<AccrualSummary, AccrualError> {
        self.run(Utc::now().date_naive(), trigger).await
    }

    /// Run for `today`. Fails with [`AccrualError::AlreadyRunning`] while
    /// another run holds the job.
    pub async fn run(
        &self,
        today: NaiveDate,
        trigger: &'static str,
    ) -> Result<AccrualSummary, AccrualError> {
        let Ok(_guard) = self.running.try_lock() else {
            self.span.in_scope(|| {
                tracing::warn!(trigger = trigger, "Leave accrual already running, skipping");
            });
            return Err(AccrualError::AlreadyRunning);
        };

        let start = Instant::now();
        let result = self
            .execute(today)
            .instrument(tracing::info_span!(
                parent: &self.span,
                "leave_accrual_run",
                trigger = trigger,
                run_date = %today
            ))
            .await;

        let elapsed = start.elapsed().as_secs_f64();
        match &result {
            Ok(summary) => {
                let outcome = if summary.failed() > 0 { "partial" } else { "success" };
                record_accrual_run(trigger, outcome, elapsed);
            }
            Err(_) => record_accrual_run(trigger, "error", elapsed),
        }

        result
    }

    async fn execute(&self, today: NaiveDate) -> Result<AccrualSummary, AccrualError> {
        let rule = self.settings.rule;
        let period = today.with_day(1).unwrap_or(today);

        let candidates = self
            .store
            .eligible_employees(rule, today)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Eligibility selection failed"))?;

        tracing::info!(
            selected = candidates.len(),
            period_months = rule.period_months,
            "Eligible employees selected"
        );

        let note = format!(
            "Leave accrual ({}-month cycle) for {}",
            rule.period_months,
            period.format("%B %Y")
        );
        let store = &self.store;
        let quantity = self.settings.quantity;

        let mut outcomes: Vec<ItemOutcome> = stream::iter(candidates)
            .map(|candidate| {
                let credit = NewLeaveCredit {
                    employee_id: candidate.employee_id,
                    quantity,
                    note: note.clone(),
                    source: LeaveCreditSource::Accrual,
                    period: Some(period),
                };
                async move {
                    let outcome = match store.insert_accrual(credit).await {
                        Ok(Some(credit_id)) => BulkWriteOutcome::Credited { credit_id },
                        Ok(None) => {
                            tracing::debug!(
                                employee_id = candidate.employee_id,
                                "Employee already credited for period"
                            );
                            BulkWriteOutcome::AlreadyCredited
                        }
                        Err(e) => {
                            tracing::error!(
                                employee_id = candidate.employee_id,
                                error = %e,
                                "Failed to write leave credit"
                            );
                            BulkWriteOutcome::Failed {
                                reason: e.to_string(),
                            }
                        }
                    };
                    record_accrual_item(outcome.label());
                    ItemOutcome {
                        employee_id: candidate.employee_id,
                        outcome,
                    }
                }
            })
            .buffer_unordered(self.settings.concurrency)
            .collect()
            .await;

        outcomes.sort_by_key(|item| item.employee_id);

        let summary = AccrualSummary {
            run_date: today,
            period,
            outcomes,
        };

        tracing::info!(
            selected = summary.selected(),
            credited = summary.credited(),
            already_credited = summary.already_credited(),
            failed = summary.failed(),
            "Leave accrual run complete"
        );

        Ok(summary)
    }
}
