//! Error Kind
//!
//! Classifies an [`AppError`](super::app_error::AppError) and fixes the HTTP
//! status it is answered with.

use std::fmt;

/// The statuses the gateway answers errors with
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
/// assert_eq!(ErrorKind::Unauthorized.as_str(), "Unauthorized");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed or incomplete input
    BadRequest,
    /// Missing or rejected authentication
    Unauthorized,
    /// Clashes with stored state, e.g. a duplicate account
    Conflict,
    InternalServerError,
}

impl ErrorKind {
    /// Status code and reason phrase
    const fn parts(self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
        }
    }

    pub const fn status_code(self) -> u16 {
        self.parts().0
    }

    /// Reason phrase, used as the problem `title`
    pub const fn as_str(self) -> &'static str {
        self.parts().1
    }

    /// 5xx errors are the server's fault and get logged at error level
    pub const fn is_server_error(self) -> bool {
        self.status_code() >= 500
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let expected = [
            (ErrorKind::BadRequest, 400),
            (ErrorKind::Unauthorized, 401),
            (ErrorKind::Conflict, 409),
            (ErrorKind::InternalServerError, 500),
        ];
        for (kind, status) in expected {
            assert_eq!(kind.status_code(), status, "{kind}");
        }
    }

    #[test]
    fn test_only_internal_is_server_error() {
        assert!(ErrorKind::InternalServerError.is_server_error());
        assert!(!ErrorKind::BadRequest.is_server_error());
        assert!(!ErrorKind::Unauthorized.is_server_error());
        assert!(!ErrorKind::Conflict.is_server_error());
    }

    #[test]
    fn test_display_is_reason_phrase() {
        assert_eq!(ErrorKind::InternalServerError.to_string(), "Internal Server Error");
    }
}
