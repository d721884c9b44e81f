use citechat_service::{ChatAnswer, ErrorKind};

/// A scripted reply for one request.
#[derive(Clone, Debug)]
pub enum PresetReply {
    /// Resolve with the given answer.
    Answer(ChatAnswer),
    /// Fail with an error of the given kind.
    Failure(ErrorKind),
}

impl From<ChatAnswer> for PresetReply {
    #[inline]
    fn from(answer: ChatAnswer) -> Self {
        Self::Answer(answer)
    }
}

impl From<ErrorKind> for PresetReply {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::Failure(kind)
    }
}
