use thiserror::Error;

/// Every failure a poll cycle can run into.
///
/// Values are compared by kind and detail, which is what the poller uses
/// to decide whether a failure has already been reported to the chat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum PollError {
    #[error("endpoint {endpoint} is unreachable: {reason}")]
    EndpointUnreachable { endpoint: String, reason: String },

    #[error("endpoint {endpoint} failed with status {status} (from_date={from_date})")]
    EndpointHttp {
        endpoint: String,
        status: u16,
        from_date: i64,
    },

    #[error("malformed API response: {0}")]
    ResponseShape(String),

    #[error("missing {0:?} key in homework entry")]
    MissingField(String),

    #[error("unknown homework status: {0:?}")]
    UnknownVerdict(String),

    #[error("failed to deliver notification: {0}")]
    NotificationDelivery(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EndpointUnreachable,
    EndpointHttp,
    ResponseShape,
    MissingField,
    UnknownVerdict,
    NotificationDelivery,
}

impl PollError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::EndpointUnreachable { .. } => ErrorKind::EndpointUnreachable,
            PollError::EndpointHttp { .. } => ErrorKind::EndpointHttp,
            PollError::ResponseShape(_) => ErrorKind::ResponseShape,
            PollError::MissingField(_) => ErrorKind::MissingField,
            PollError::UnknownVerdict(_) => ErrorKind::UnknownVerdict,
            PollError::NotificationDelivery(_) => ErrorKind::NotificationDelivery,
        }
    }

    /// Whether a chat alert may be sent for this failure. Delivery failures
    /// are excluded since the alert would go through the same broken path.
    pub fn is_reportable(&self) -> bool {
        self.kind() != ErrorKind::NotificationDelivery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_errors_are_not_reportable() {
        assert!(!PollError::NotificationDelivery("boom".into()).is_reportable());
        assert!(PollError::ResponseShape("empty".into()).is_reportable());
        assert!(PollError::UnknownVerdict("done".into()).is_reportable());
    }

    #[test]
    fn test_http_error_message_carries_diagnostics() {
        let err = PollError::EndpointHttp {
            endpoint: "https://example.test/api".into(),
            status: 503,
            from_date: 1000,
        };
        let text = err.to_string();
        assert!(text.contains("503"));
        assert!(text.contains("from_date=1000"));
        assert!(text.contains("https://example.test/api"));
    }
}
