//! Homework status tracking: fetch, validate, diff, notify.

pub mod api;
pub mod error;
pub mod notify;
pub mod poller;
pub mod render;
pub mod response;
pub mod tracking;

pub use api::{HomeworkSource, PracticumClient, DEFAULT_ENDPOINT};
pub use error::{ErrorKind, PollError};
pub use notify::Notifier;
pub use poller::{CycleReport, Poller, DEFAULT_RETRY_INTERVAL};
pub use render::{parse_homework, render_status, status_message};
pub use response::check_response;
pub use tracking::{Change, ReportedErrors, TrackingTable};
