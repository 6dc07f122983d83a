use thiserror::Error;

/// Why a prediction did not lead anywhere.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The server answered, but not with 200.
    #[error("server answered {status} {reason}")]
    Status { status: u16, reason: String },

    /// No response at all.
    #[error("no response: {0}")]
    Network(String),

    /// A 200 whose body is not JSON or has no `new_url`.
    #[error("malformed reply: {0}")]
    Malformed(String),

    #[error("navigation failed: {0}")]
    Navigation(String),
}

impl PredictError {
    /// Status text for a non-200 reply, the way a browser reports it.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            Self::Status { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_code_and_reason() {
        let err = PredictError::Status {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "server answered 404 Not Found");
        assert_eq!(err.status_text(), Some("Not Found"));
    }

    #[test]
    fn other_kinds_have_no_status_text() {
        assert!(PredictError::Network("refused".into()).status_text().is_none());
        assert!(PredictError::Malformed("eof".into()).status_text().is_none());
    }
}
