use std::fmt::{self, Display};

/// The kind of failure an answering service reported.
///
/// Callers of the service are expected to treat every kind the same way
/// when it comes to user-visible behavior. The kind exists for
/// diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request could not be delivered, or the connection broke.
    Transport,
    /// The request did not complete in time.
    Timeout,
    /// The service replied with a non-success status code.
    Status(u16),
    /// The reply could not be decoded.
    InvalidPayload,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => f.write_str("transport error"),
            ErrorKind::Timeout => f.write_str("request timed out"),
            ErrorKind::Status(code) => write!(f, "unexpected status {code}"),
            ErrorKind::InvalidPayload => f.write_str("invalid payload"),
            ErrorKind::Other => f.write_str("other error"),
        }
    }
}
