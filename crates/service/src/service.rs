use std::error::Error;

use crate::answer::ChatAnswer;
use crate::error::ErrorKind;
use crate::request::ChatRequest;

/// The error type for an answering service.
pub trait AnswerServiceError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A remote service that answers one message at a time.
///
/// Once the service is created, it should behave like a stateless object.
/// It can still have internal state (a connection pool, for example), but
/// callers should not rely on it.
pub trait AnswerService: Send + Sync {
    /// The error type that may be returned by the service.
    type Error: AnswerServiceError;

    /// Sends a request and resolves to the complete answer.
    ///
    /// The returned future must not borrow from `self` or `req`, so that
    /// it can be driven on a separate task.
    fn ask(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatAnswer, Self::Error>> + Send + 'static;
}
