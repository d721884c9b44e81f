mod builder;
mod event_loop;
mod mailbox;
mod state;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::Instrument;

pub use builder::ChatBuilder;
pub use mailbox::ChatClosedError;
use mailbox::{Command, Mailbox, MailboxParts};
use state::ChatState;

use crate::exchange::{ExchangeController, ExchangePhase};
use crate::overlay::{OverlayRegion, OverlayState};
use crate::transcript::{EntryHandle, MessageEntry, TranscriptStore};

/// A chat instance, which owns the transcript, the overlay and the
/// exchange controller, and runs them on a single event-loop task.
///
/// The handle is cheap to clone. Commands are processed in the order they
/// are sent, and a command never waits for the answering service: while a
/// request is in flight, further submissions are simply ignored.
#[derive(Clone)]
pub struct Chat {
    mailbox: Arc<Mailbox>,
}

/// A copy of the chat state at one point in time.
#[derive(Clone, Debug)]
pub struct ChatSnapshot {
    /// Whether a request was in flight.
    pub phase: ExchangePhase,
    /// The transcript.
    pub transcript: TranscriptStore,
    /// The overlay.
    pub overlay: OverlayState,
}

impl ChatSnapshot {
    /// Returns the transcript entries, in order.
    #[inline]
    pub fn entries(&self) -> &[MessageEntry] {
        self.transcript.as_slice()
    }
}

impl Chat {
    /// Submits a message typed by the user.
    ///
    /// Blank messages, and messages submitted while a request is in
    /// flight, are dropped without any effect.
    #[inline]
    pub fn submit<S: Into<String>>(&self, text: S) -> Result<(), ChatClosedError> {
        self.mailbox.send(Command::Submit(text.into()))
    }

    /// Opens the overlay for a citation of the most recent answer.
    #[inline]
    pub fn select_citation<S: Into<String>>(
        &self,
        label: S,
    ) -> Result<(), ChatClosedError> {
        self.mailbox.send(Command::SelectCitation {
            entry: None,
            label: label.into(),
        })
    }

    /// Opens the overlay for a citation of the given bot entry, using the
    /// excerpts of the answer that produced it.
    #[inline]
    pub fn select_entry_citation<S: Into<String>>(
        &self,
        entry: EntryHandle,
        label: S,
    ) -> Result<(), ChatClosedError> {
        self.mailbox.send(Command::SelectCitation {
            entry: Some(entry),
            label: label.into(),
        })
    }

    /// Closes the overlay.
    #[inline]
    pub fn close_overlay(&self) -> Result<(), ChatClosedError> {
        self.mailbox.send(Command::CloseOverlay)
    }

    /// Reports a click on the overlay. Clicks outside the content close it.
    #[inline]
    pub fn click_overlay(
        &self,
        region: OverlayRegion,
    ) -> Result<(), ChatClosedError> {
        self.mailbox.send(Command::ClickOverlay(region))
    }

    /// Returns a copy of the current state, after every command sent
    /// before this call has been processed.
    pub async fn snapshot(&self) -> Result<ChatSnapshot, ChatClosedError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.mailbox.send(Command::Snapshot(reply_tx))?;
        reply_rx.await.map_err(|_| ChatClosedError)
    }

    /// Stops the event loop. A request in flight still runs to
    /// completion, but its outcome is dropped.
    #[inline]
    pub fn shutdown(&self) {
        self.mailbox.try_kill();
    }
}

impl Chat {
    fn spawn_from_builder(builder: ChatBuilder) -> Self {
        let ChatBuilder {
            service,
            strings,
            links,
            input,
            on_transcript,
            on_overlay,
            on_idle,
        } = builder;

        let state = ChatState {
            service,
            exchange: ExchangeController::new(strings, Box::new(input)),
            overlay: Default::default(),
            links,
            on_transcript,
            on_overlay,
            on_idle,
        };

        let MailboxParts {
            mailbox,
            cmd_rx,
            kill_rx,
        } = Mailbox::new();
        let mailbox = Arc::new(mailbox);
        tokio::spawn(
            event_loop::run_chat(
                Arc::downgrade(&mailbox),
                state,
                cmd_rx,
                kill_rx,
            )
            .instrument(trace_span!("chat")),
        );
        Self { mailbox }
    }
}
