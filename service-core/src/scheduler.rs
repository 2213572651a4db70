//! Calendar triggers for background jobs.
//!
//! Schedules are cron expressions evaluated in UTC by the `cron` crate.
//! The usual five-field layout (`minute hour day-of-month month
//! day-of-week`) is accepted and runs at second 0; six and seven field
//! expressions (leading seconds, trailing year) and shortcuts such as
//! `@monthly` are passed through unchanged.

use chrono::{DateTime, Utc};
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Midnight UTC on the first day of every month.
pub const MONTHLY: &str = "0 0 1 * *";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("cron expression cannot be empty")]
    Empty,
    #[error("invalid cron expression '{expression}': {reason}")]
    Invalid { expression: String, reason: String },
}

/// A parsed cron schedule. Two schedules are equal when they were built
/// from the same normalized expression.
#[derive(Clone)]
pub struct CalendarSchedule {
    expression: String,
    schedule: cron::Schedule,
}

impl CalendarSchedule {
    pub fn monthly() -> Self {
        MONTHLY
            .parse()
            .expect("MONTHLY is a valid cron expression")
    }

    /// The expression handed to `cron`, seconds field included.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// First trigger strictly after `after`.
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&after).next()
    }
}

/// Prepend a seconds field to five-field expressions.
fn normalize(expr: &str) -> String {
    if !expr.starts_with('@') && expr.split_whitespace().count() == 5 {
        format!("0 {}", expr)
    } else {
        expr.to_string()
    }
}

impl FromStr for CalendarSchedule {
    type Err = ScheduleError;

    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let expression = normalize(expr);
        let schedule =
            cron::Schedule::from_str(&expression).map_err(|e| ScheduleError::Invalid {
                expression: expr.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            expression,
            schedule,
        })
    }
}

impl PartialEq for CalendarSchedule {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

impl Eq for CalendarSchedule {}

impl fmt::Debug for CalendarSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CalendarSchedule")
            .field(&self.expression)
            .finish()
    }
}

impl fmt::Display for CalendarSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Run `job` at every trigger of `schedule` until `shutdown` is cancelled.
///
/// Runs are awaited in the loop, so a slow run delays the next wait rather
/// than overlapping it.
pub fn spawn_scheduled<F, Fut>(
    name: &'static str,
    schedule: CalendarSchedule,
    shutdown: CancellationToken,
    mut job: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let Some(next_run) = schedule.next_after(now) else {
                tracing::error!(job = name, schedule = %schedule, "Schedule has no upcoming trigger, stopping");
                break;
            };
            let wait = (next_run - now).to_std().unwrap_or_default();

            tracing::info!(job = name, next_run = %next_run, "Next run scheduled");

            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!(job = name, "Scheduler shutting down");
                    break;
                }
                _ = tokio::time::sleep(wait) => {}
            }

            tracing::info!(job = name, "Scheduled run starting");
            job().await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn schedule(expr: &str) -> CalendarSchedule {
        expr.parse().unwrap()
    }

    #[test]
    fn parses_first_of_month() {
        assert_eq!(schedule("0 0 1 * *"), CalendarSchedule::monthly());
        assert_eq!(CalendarSchedule::monthly().expression(), "0 0 0 1 * *");
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert_eq!("  ".parse::<CalendarSchedule>(), Err(ScheduleError::Empty));
        assert!(matches!(
            "61 0 1 * *".parse::<CalendarSchedule>(),
            Err(ScheduleError::Invalid { .. })
        ));
        assert!(matches!(
            "0 0 1 *".parse::<CalendarSchedule>(),
            Err(ScheduleError::Invalid { .. })
        ));
        assert!(matches!(
            "every month".parse::<CalendarSchedule>(),
            Err(ScheduleError::Invalid { .. })
        ));
    }

    #[test]
    fn accepts_ordinary_cron_expressions() {
        for expr in ["0 0 1 */3 *", "0 0 1 1,4,7,10 *", "@monthly", "0 9 1-7 * Mon"] {
            assert!(expr.parse::<CalendarSchedule>().is_ok(), "{} should parse", expr);
        }
    }

    #[test]
    fn monthly_fires_on_the_next_first() {
        assert_eq!(
            CalendarSchedule::monthly().next_after(utc(2026, 10, 18, 9, 30)),
            Some(utc(2026, 11, 1, 0, 0))
        );
    }

    #[test]
    fn trigger_instant_is_exclusive() {
        assert_eq!(
            CalendarSchedule::monthly().next_after(utc(2026, 11, 1, 0, 0)),
            Some(utc(2026, 12, 1, 0, 0))
        );
    }

    #[test]
    fn rolls_over_the_year() {
        assert_eq!(
            CalendarSchedule::monthly().next_after(utc(2026, 12, 15, 0, 0)),
            Some(utc(2027, 1, 1, 0, 0))
        );
    }

    #[test]
    fn quarterly_skips_the_months_in_between() {
        assert_eq!(
            schedule("0 0 1 1,4,7,10 *").next_after(utc(2026, 4, 2, 0, 0)),
            Some(utc(2026, 7, 1, 0, 0))
        );
    }

    #[test]
    fn day_31_skips_short_months() {
        assert_eq!(
            schedule("0 6 31 * *").next_after(utc(2026, 1, 31, 7, 0)),
            Some(utc(2026, 3, 31, 6, 0))
        );
    }

    #[test]
    fn wildcard_hour_fires_every_hour() {
        assert_eq!(
            schedule("30 * * * *").next_after(utc(2026, 10, 18, 9, 45)),
            Some(utc(2026, 10, 18, 10, 30))
        );
    }

    #[tokio::test]
    async fn cancelled_scheduler_stops() {
        let shutdown = CancellationToken::new();
        let handle = spawn_scheduled(
            "noop",
            CalendarSchedule::monthly(),
            shutdown.clone(),
            || async {},
        );

        shutdown.cancel();

        tokio::time::timeout(std::time::Duration::from_secs(2), handle)
            .await
            .expect("scheduler should stop after cancellation")
            .unwrap();
    }
}
