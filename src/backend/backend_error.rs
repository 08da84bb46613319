use thiserror::Error;

/// Backend error code for an expired or revoked session token.
pub const INVALID_SESSION_TOKEN: i64 = 209;
/// Backend error code for an operation rejected by access rules.
pub const OPERATION_FORBIDDEN: i64 = 119;
/// Backend error code for a missing (or unreadable) object.
pub const OBJECT_NOT_FOUND: i64 = 101;

/// Errors that can occur while talking to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BackendError {
    /// Transport failure before a response was received
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with an error payload
    #[error("{message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Unexpected backend response: {0}")]
    Decode(String),

    /// Object missing or not visible to the session user
    #[error("Object not found")]
    NotFound,

    /// The session user does not own the object
    #[error("{0}")]
    Forbidden(String),
}

/// Coarse classification used to pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SessionExpired,
    PermissionDenied,
    Other,
}

impl BackendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::Api { code, .. } if *code == INVALID_SESSION_TOKEN => {
                ErrorKind::SessionExpired
            }
            BackendError::Api { status: 401, .. } => ErrorKind::SessionExpired,
            BackendError::Api { code, .. } if *code == OPERATION_FORBIDDEN => {
                ErrorKind::PermissionDenied
            }
            BackendError::Api { status: 403, .. } => ErrorKind::PermissionDenied,
            BackendError::Forbidden(_) => ErrorKind::PermissionDenied,
            _ => ErrorKind::Other,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        self.kind() == ErrorKind::SessionExpired
    }

    pub fn invalid_session() -> Self {
        BackendError::Api {
            status: 400,
            code: INVALID_SESSION_TOKEN,
            message: "Invalid session token".to_string(),
        }
    }
}
