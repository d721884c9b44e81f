use std::pin::Pin;
use std::sync::Arc;

use citechat_service::{
    AnswerService, AnswerServiceError, ChatAnswer, ChatRequest,
};
use tracing::Instrument;

pub type AskResult = Result<ChatAnswer, Box<dyn AnswerServiceError>>;
type BoxedAskFuture = Pin<Box<dyn Future<Output = AskResult> + Send>>;
type HandlerFn = Arc<dyn Fn(ChatRequest) -> BoxedAskFuture + Send + Sync>;

/// A wrapper around an answering service that provides a type-erased
/// interface for the other modules.
#[derive(Clone)]
pub struct ServiceClient {
    handler_fn: HandlerFn,
}

impl ServiceClient {
    #[inline]
    pub fn new<S: AnswerService + 'static>(service: S) -> Self {
        // Erase `S` so that the chat state doesn't need a type parameter.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = service.ask(&req);
            Box::pin(
                async move {
                    trace!("sending a request: {req:?}");
                    handle_outcome::<S>(fut.await)
                }
                .instrument(trace_span!("service client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and waits for the outcome.
    ///
    /// Failures are logged here; callers only need to know that the
    /// request failed.
    #[inline]
    pub async fn ask(&self, req: ChatRequest) -> AskResult {
        (self.handler_fn)(req).await
    }
}

fn handle_outcome<S: AnswerService + 'static>(
    outcome: Result<ChatAnswer, S::Error>,
) -> AskResult {
    match outcome {
        Ok(answer) => {
            trace!(
                "got an answer with {} sources, {} chunks",
                answer.sources.len(),
                answer.chunks.len()
            );
            Ok(answer)
        }
        Err(err) => {
            error!("request failed ({:?}): {err}", err.kind());
            Err(Box::new(err))
        }
    }
}
