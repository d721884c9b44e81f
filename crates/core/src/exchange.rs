//! The request/response state machine.

use std::collections::HashMap;

use citechat_service::{ChatAnswer, ChatRequest};

use crate::citation::CitationResolver;
use crate::config::ChatStrings;
use crate::transcript::{EntryDraft, EntryHandle, TranscriptStore};

/// Whether a request is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExchangePhase {
    /// Waiting for the user.
    #[default]
    Idle,
    /// A request has been issued and its outcome is not known yet.
    Sending,
}

/// The input box and send button a user submits messages with.
///
/// All methods default to doing nothing.
pub trait InputSurface: Send {
    /// Enables or disables the input affordances.
    fn set_enabled(&mut self, _enabled: bool) {}

    /// Empties the input box after its text has been submitted.
    fn clear(&mut self) {}

    /// Moves the input focus back to the user.
    fn focus(&mut self) {}
}

impl InputSurface for () {}

/// Drives one round trip at a time against the answering service.
///
/// The controller doesn't perform any I/O itself: [`submit`] hands back
/// the request to issue, and the caller reports the outcome through
/// [`succeed`] or [`fail`]. Exactly one placeholder entry exists in the
/// transcript while the phase is [`ExchangePhase::Sending`], and none
/// otherwise.
///
/// [`submit`]: ExchangeController::submit
/// [`succeed`]: ExchangeController::succeed
/// [`fail`]: ExchangeController::fail
pub struct ExchangeController {
    transcript: TranscriptStore,
    current: CitationResolver,
    by_entry: HashMap<EntryHandle, CitationResolver>,
    phase: ExchangePhase,
    placeholder: Option<EntryHandle>,
    strings: ChatStrings,
    input: Box<dyn InputSurface>,
}

impl ExchangeController {
    /// Creates an idle controller with an empty transcript.
    pub fn new(strings: ChatStrings, input: Box<dyn InputSurface>) -> Self {
        Self {
            transcript: Default::default(),
            current: Default::default(),
            by_entry: Default::default(),
            phase: Default::default(),
            placeholder: None,
            strings,
            input,
        }
    }

    /// Starts a round trip with the given text.
    ///
    /// Returns the request to send, or `None` if the text is blank or a
    /// request is already in flight. Nothing changes in either case.
    pub fn submit(&mut self, text: &str) -> Option<ChatRequest> {
        if self.phase == ExchangePhase::Sending {
            debug!("a request is in flight, ignoring the submission");
            return None;
        }
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.phase = ExchangePhase::Sending;
        self.input.set_enabled(false);
        self.input.clear();
        self.transcript.append(EntryDraft::user(text));
        let placeholder = self
            .transcript
            .append(EntryDraft::placeholder(self.strings.placeholder.as_str()));
        self.placeholder = Some(placeholder);

        Some(ChatRequest::new(text))
    }

    /// Finishes the round trip with an answer.
    ///
    /// The answer's excerpts become the current citation working set,
    /// replacing the previous one. Returns the handle of the new bot
    /// entry, or `None` if no request was in flight.
    pub fn succeed(&mut self, answer: ChatAnswer) -> Option<EntryHandle> {
        if self.phase != ExchangePhase::Sending {
            warn!("got an answer while idle, discarding it");
            return None;
        }
        let ChatAnswer {
            answer,
            sources,
            chunks,
            intent,
        } = answer;
        if let Some(intent) = intent {
            debug!("answer intent: {intent}");
        }

        let handle = self.finish(EntryDraft::bot(answer, sources));
        self.current = CitationResolver::new(chunks);
        self.by_entry.insert(handle, self.current.clone());
        self.reopen_input();
        Some(handle)
    }

    /// Finishes the round trip with the fixed apology entry.
    ///
    /// Returns the handle of the new bot entry, or `None` if no request
    /// was in flight. The current citation working set is left as is.
    pub fn fail(&mut self) -> Option<EntryHandle> {
        if self.phase != ExchangePhase::Sending {
            warn!("got a failure while idle, discarding it");
            return None;
        }
        let apology = self.strings.apology.clone();
        let handle = self.finish(EntryDraft::bot(apology, Vec::<String>::new()));
        self.reopen_input();
        Some(handle)
    }

    fn finish(&mut self, draft: EntryDraft) -> EntryHandle {
        // The placeholder must be gone before the terminal entry shows up.
        if let Some(placeholder) = self.placeholder.take() {
            self.transcript.remove(placeholder);
        }
        let handle = self.transcript.append(draft);
        self.phase = ExchangePhase::Idle;
        handle
    }

    /// Gives the input focus to the user, e.g. when the page is first
    /// shown.
    #[inline]
    pub fn focus_input(&mut self) {
        self.input.focus();
    }

    fn reopen_input(&mut self) {
        self.input.set_enabled(true);
        self.input.focus();
    }

    /// Returns the current phase.
    #[inline]
    pub fn phase(&self) -> ExchangePhase {
        self.phase
    }

    /// Returns the transcript.
    #[inline]
    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    /// Returns the resolver of the most recent answer.
    #[inline]
    pub fn current_resolver(&self) -> &CitationResolver {
        &self.current
    }

    /// Returns the resolver of the answer that produced the given bot
    /// entry.
    #[inline]
    pub fn resolver_for(&self, entry: EntryHandle) -> Option<&CitationResolver> {
        self.by_entry.get(&entry)
    }

    /// Returns the texts this controller shows.
    #[inline]
    pub fn strings(&self) -> &ChatStrings {
        &self.strings
    }
}
