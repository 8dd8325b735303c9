use common::protocol::{StatusSnapshot, CURRENT_DATE_KEY, HOMEWORKS_KEY};
use serde_json::Value;

use crate::error::PollError;

/// Check the top-level shape of an API response.
///
/// Only the envelope is validated; individual homework entries are left
/// untouched and checked one by one when they are rendered.
pub fn check_response(response: &Value) -> Result<StatusSnapshot, PollError> {
    let map = response
        .as_object()
        .ok_or_else(|| PollError::ResponseShape("response is not a JSON object".into()))?;

    if map.is_empty() {
        return Err(PollError::ResponseShape("response is an empty object".into()));
    }

    for key in [HOMEWORKS_KEY, CURRENT_DATE_KEY] {
        if !map.contains_key(key) {
            return Err(PollError::ResponseShape(format!("missing key {:?}", key)));
        }
    }

    let homeworks = map[HOMEWORKS_KEY]
        .as_array()
        .ok_or_else(|| PollError::ResponseShape(format!("{:?} is not a list", HOMEWORKS_KEY)))?;

    let current_date = map[CURRENT_DATE_KEY].as_i64().ok_or_else(|| {
        PollError::ResponseShape(format!("{:?} is not an integer", CURRENT_DATE_KEY))
    })?;

    Ok(StatusSnapshot {
        homeworks: homeworks.clone(),
        current_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape_error(value: Value) -> String {
        match check_response(&value) {
            Err(PollError::ResponseShape(msg)) => msg,
            other => panic!("expected ResponseShape, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_response() {
        let snapshot = check_response(&json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1050
        }))
        .unwrap();
        assert_eq!(snapshot.current_date, 1050);
        assert_eq!(snapshot.homeworks.len(), 1);
    }

    #[test]
    fn test_empty_homework_list_is_valid() {
        let snapshot = check_response(&json!({"homeworks": [], "current_date": 7})).unwrap();
        assert!(snapshot.homeworks.is_empty());
    }

    #[test]
    fn test_non_object_rejected() {
        shape_error(json!([{"homeworks": [], "current_date": 1}]));
        shape_error(json!("homeworks"));
        shape_error(Value::Null);
    }

    #[test]
    fn test_empty_object_rejected() {
        assert!(shape_error(json!({})).contains("empty"));
    }

    #[test]
    fn test_missing_keys_named() {
        assert!(shape_error(json!({"current_date": 1})).contains("homeworks"));
        assert!(shape_error(json!({"homeworks": []})).contains("current_date"));
    }

    #[test]
    fn test_homeworks_must_be_list() {
        let msg = shape_error(json!({"homeworks": {"homework_name": "hw1"}, "current_date": 1}));
        assert!(msg.contains("not a list"));
    }

    #[test]
    fn test_current_date_must_be_integer() {
        shape_error(json!({"homeworks": [], "current_date": "yesterday"}));
        shape_error(json!({"homeworks": [], "current_date": null}));
    }
}
