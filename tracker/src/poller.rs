//! Polling loop — fetches homework statuses, diffs them against what was
//! seen before, and forwards every change to the chat.
//!
//! Each cycle fetches with the current cursor, validates the envelope,
//! handles entries in arrival order and then advances the cursor. Failures
//! never leave the loop: they are logged, announced once in the chat, and
//! the next attempt happens after the usual sleep.

use std::time::Duration;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::api::HomeworkSource;
use crate::error::PollError;
use crate::notify::Notifier;
use crate::render::{parse_homework, status_message};
use crate::response::check_response;
use crate::tracking::{Change, ReportedErrors, TrackingTable};

pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(600);

/// What happened during one cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Status notifications delivered.
    pub notifications: usize,
    /// Failure alerts delivered.
    pub alerts: usize,
    /// Every failure hit during the cycle, in order.
    pub errors: Vec<PollError>,
}

pub struct Poller {
    source: Box<dyn HomeworkSource>,
    notifier: Box<dyn Notifier>,
    tracking: TrackingTable,
    reported: ReportedErrors,
    cursor: i64,
    interval: Duration,
}

impl Poller {
    pub fn new(
        source: Box<dyn HomeworkSource>,
        notifier: Box<dyn Notifier>,
        cursor: i64,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            tracking: TrackingTable::new(),
            reported: ReportedErrors::new(),
            cursor,
            interval,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn tracking(&self) -> &TrackingTable {
        &self.tracking
    }

    pub fn reported(&self) -> &ReportedErrors {
        &self.reported
    }

    /// Poll forever. There is no shutdown path besides killing the process.
    pub async fn run(mut self) {
        info!(
            cursor = self.cursor,
            interval_secs = self.interval.as_secs(),
            "📡 Homework poller starting"
        );

        loop {
            let report = self.poll_once().await;
            if report.errors.is_empty() {
                debug!(
                    notifications = report.notifications,
                    "Poll cycle finished successfully"
                );
            } else {
                warn!(
                    notifications = report.notifications,
                    alerts = report.alerts,
                    failures = report.errors.len(),
                    "Poll cycle finished with errors"
                );
            }

            debug!("Sleeping for {} seconds", self.interval.as_secs());
            time::sleep(self.interval).await;
        }
    }

    /// Run a single fetch/validate/diff/notify cycle.
    pub async fn poll_once(&mut self) -> CycleReport {
        let mut report = CycleReport::default();
        if let Err(e) = self.check_updates(&mut report).await {
            self.handle_failure(e, &mut report).await;
        }
        report
    }

    async fn check_updates(&mut self, report: &mut CycleReport) -> Result<(), PollError> {
        let body = self.source.fetch(Some(self.cursor)).await?;
        let snapshot = check_response(&body)?;

        debug!(
            entries = snapshot.homeworks.len(),
            "Checking homework status updates"
        );

        for entry in &snapshot.homeworks {
            if let Err(e) = self.process_entry(entry, report).await {
                self.handle_failure(e, report).await;
            }
        }

        debug!(from = self.cursor, to = snapshot.current_date, "Advancing cursor");
        self.cursor = snapshot.current_date;
        Ok(())
    }

    async fn process_entry(
        &mut self,
        entry: &serde_json::Value,
        report: &mut CycleReport,
    ) -> Result<(), PollError> {
        let record = parse_homework(entry)?;

        let change = self.tracking.observe(&record.name, record.status);
        match change {
            Change::Unchanged => {
                debug!(homework = %record.name, status = %record.status, "No status change");
                return Ok(());
            }
            Change::New => {
                info!(homework = %record.name, status = %record.status, "New homework status");
            }
            Change::Changed { previous } => {
                info!(
                    homework = %record.name,
                    from = %previous,
                    to = %record.status,
                    "Homework status changed"
                );
            }
        }

        let message = status_message(&record);
        self.notifier.send(&message).await?;
        info!(homework = %record.name, "Notification sent");
        report.notifications += 1;
        Ok(())
    }

    /// Log a failure and, unless it was announced already, alert the chat.
    async fn handle_failure(&mut self, err: PollError, report: &mut CycleReport) {
        error!(kind = ?err.kind(), "Program failure: {}", err);
        report.errors.push(err.clone());

        if !err.is_reportable() {
            return;
        }
        if self.reported.contains(&err) {
            debug!(kind = ?err.kind(), "Failure already reported — not alerting again");
            return;
        }

        match self.notifier.send(&format!("Program failure: {}", err)).await {
            Ok(()) => {
                self.reported.insert(err);
                report.alerts += 1;
            }
            Err(send_err) => {
                error!(kind = ?send_err.kind(), "Could not deliver failure alert: {}", send_err);
                report.errors.push(send_err);
            }
        }
    }
}
