//! A local fake answering service for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use citechat_service::{
    AnswerService, AnswerServiceError, ChatAnswer, ChatRequest, ErrorKind,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl StdError for Error {}

impl AnswerServiceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    replies: VecDeque<PresetReply>,
    requests: Vec<ChatRequest>,
}

/// A local fake answering service for testing purpose.
///
/// Replies are added to a script up front and consumed one per request,
/// in order. If the script runs out, the request fails. Clones share the
/// same script, so a test can keep one clone around to inspect the
/// requests received by another.
#[derive(Clone, Default)]
pub struct ScriptedAnswerService {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl ScriptedAnswerService {
    #[inline]
    pub fn add_answer(&mut self, answer: ChatAnswer) {
        self.add_reply(PresetReply::Answer(answer));
    }

    #[inline]
    pub fn add_failure(&mut self, kind: ErrorKind) {
        self.add_reply(PresetReply::Failure(kind));
    }

    #[inline]
    pub fn add_reply<R: Into<PresetReply>>(&mut self, reply: R) {
        self.lock().replies.push_back(reply.into());
    }

    /// Delays every reply by the given duration.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns every request received so far.
    #[inline]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A poisoned script only means another test thread panicked.
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AnswerService for ScriptedAnswerService {
    type Error = crate::Error;

    fn ask(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatAnswer, Self::Error>> + Send + 'static
    {
        let reply = {
            let mut script = self.lock();
            script.requests.push(req.clone());
            script.replies.pop_front()
        };
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            match reply {
                Some(PresetReply::Answer(answer)) => Ok(answer),
                Some(PresetReply::Failure(kind)) => Err(Error {
                    message: "scripted failure",
                    kind,
                }),
                None => Err(Error {
                    message: "no enough replies",
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}
