use citechat_service::AnswerService;

use super::Chat;
use super::state::{CallbackInput, IdleCallback, OverlayCallback, TranscriptCallback};
use crate::config::{ChatStrings, DocumentLinks};
use crate::overlay::OverlayState;
use crate::service_client::ServiceClient;
use crate::transcript::TranscriptStore;

/// [`Chat`] builder.
pub struct ChatBuilder {
    pub(crate) service: ServiceClient,
    pub(crate) strings: ChatStrings,
    pub(crate) links: DocumentLinks,
    pub(crate) input: CallbackInput,
    pub(crate) on_transcript: Option<TranscriptCallback>,
    pub(crate) on_overlay: Option<OverlayCallback>,
    pub(crate) on_idle: Option<IdleCallback>,
}

impl ChatBuilder {
    /// Creates a new builder with the specified answering service.
    #[inline]
    pub fn with_service<S: AnswerService + 'static>(service: S) -> Self {
        Self {
            service: ServiceClient::new(service),
            strings: Default::default(),
            links: Default::default(),
            input: Default::default(),
            on_transcript: None,
            on_overlay: None,
            on_idle: None,
        }
    }

    /// Sets the texts shown to the user.
    #[inline]
    pub fn with_strings(mut self, strings: ChatStrings) -> Self {
        self.strings = strings;
        self
    }

    /// Sets how links to source documents are formed.
    #[inline]
    pub fn with_document_links(mut self, links: DocumentLinks) -> Self {
        self.links = links;
        self
    }

    /// Attaches a callback to be invoked when the input affordances are
    /// enabled or disabled.
    #[inline]
    pub fn on_input_enabled(
        mut self,
        on_input_enabled: impl Fn(bool) + Send + Sync + 'static,
    ) -> Self {
        self.input.on_enabled = Some(Box::new(on_input_enabled));
        self
    }

    /// Attaches a callback to be invoked when the submitted text should be
    /// cleared from the input box.
    #[inline]
    pub fn on_clear_input(
        mut self,
        on_clear_input: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.input.on_clear = Some(Box::new(on_clear_input));
        self
    }

    /// Attaches a callback to be invoked when the input should take the
    /// focus, once at startup and after every round trip.
    #[inline]
    pub fn on_focus_input(
        mut self,
        on_focus_input: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.input.on_focus = Some(Box::new(on_focus_input));
        self
    }

    /// Attaches a callback to be invoked whenever the transcript changes.
    #[inline]
    pub fn on_transcript(
        mut self,
        on_transcript: impl Fn(&TranscriptStore) + Send + Sync + 'static,
    ) -> Self {
        self.on_transcript = Some(Box::new(on_transcript));
        self
    }

    /// Attaches a callback to be invoked whenever the overlay changes.
    #[inline]
    pub fn on_overlay(
        mut self,
        on_overlay: impl Fn(&OverlayState) + Send + Sync + 'static,
    ) -> Self {
        self.on_overlay = Some(Box::new(on_overlay));
        self
    }

    /// Attaches a callback to be invoked when a round trip has finished,
    /// successfully or not.
    #[inline]
    pub fn on_idle(mut self, on_idle: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the chat and starts its event loop.
    ///
    /// Must be called within a Tokio runtime.
    #[inline]
    pub fn build(self) -> Chat {
        Chat::spawn_from_builder(self)
    }
}
