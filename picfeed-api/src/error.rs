use http::{Method, StatusCode};

/// A request to the backend did not succeed
///
/// Transport failures and non-2xx answers are collapsed into this one type:
/// callers never branch on the reason, they only report it.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{method} {url} failed: {reason}")]
pub struct RequestFailed {
    pub method: Method,
    pub url: String,
    pub reason: FailureReason,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FailureReason {
    #[error("server answered {0}")]
    Status(StatusCode),

    #[error("{0}")]
    Transport(String),
}

impl RequestFailed {
    pub fn status(method: Method, url: impl Into<String>, status: StatusCode) -> RequestFailed {
        RequestFailed {
            method,
            url: url.into(),
            reason: FailureReason::Status(status),
        }
    }

    pub fn transport(
        method: Method,
        url: impl Into<String>,
        err: impl std::fmt::Display,
    ) -> RequestFailed {
        RequestFailed {
            method,
            url: url.into(),
            reason: FailureReason::Transport(err.to_string()),
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self.reason {
            FailureReason::Status(s) => Some(s),
            FailureReason::Transport(_) => None,
        }
    }
}
