use common::protocol::{HomeworkRecord, Verdict, HOMEWORK_NAME_KEY, STATUS_KEY};
use serde_json::Value;

use crate::error::PollError;

/// Validate a single homework entry.
pub fn parse_homework(entry: &Value) -> Result<HomeworkRecord, PollError> {
    let name = entry
        .get(HOMEWORK_NAME_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| PollError::MissingField(HOMEWORK_NAME_KEY.into()))?;

    let status = entry
        .get(STATUS_KEY)
        .ok_or_else(|| PollError::MissingField(STATUS_KEY.into()))?;

    let verdict = match status.as_str() {
        Some(raw) => raw
            .parse::<Verdict>()
            .map_err(|e| PollError::UnknownVerdict(e.0))?,
        None => return Err(PollError::UnknownVerdict(status.to_string())),
    };

    Ok(HomeworkRecord {
        name: name.to_string(),
        status: verdict,
    })
}

/// Chat message announcing the record's current status.
pub fn status_message(record: &HomeworkRecord) -> String {
    format!(
        "The review status of \"{}\" has changed. {}",
        record.name,
        record.status.description()
    )
}

/// Validate an entry and render its notification text in one step.
pub fn render_status(entry: &Value) -> Result<String, PollError> {
    parse_homework(entry).map(|record| status_message(&record))
}
