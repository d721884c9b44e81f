use std::sync::Arc;

use citechat_service::ChatRequest;

use super::ChatSnapshot;
use super::mailbox::{Command, Mailbox};
use crate::config::DocumentLinks;
use crate::exchange::{ExchangeController, InputSurface};
use crate::overlay::{Overlay, OverlayState};
use crate::service_client::{AskResult, ServiceClient};
use crate::transcript::{EntryHandle, TranscriptStore};

pub type TranscriptCallback = Box<dyn Fn(&TranscriptStore) + Send + Sync>;
pub type OverlayCallback = Box<dyn Fn(&OverlayState) + Send + Sync>;
pub type IdleCallback = Box<dyn Fn() + Send + Sync>;

/// State owned by the chat event loop.
pub struct ChatState {
    pub(super) service: ServiceClient,
    pub(super) exchange: ExchangeController,
    pub(super) overlay: Overlay,
    pub(super) links: DocumentLinks,

    pub(super) on_transcript: Option<TranscriptCallback>,
    pub(super) on_overlay: Option<OverlayCallback>,
    pub(super) on_idle: Option<IdleCallback>,
}

impl ChatState {
    /// Runs once before the first command.
    pub fn start(&mut self) {
        self.exchange.focus_input();
    }

    pub fn handle(&mut self, cmd: Command, mailbox: &Arc<Mailbox>) {
        match cmd {
            Command::Submit(text) => self.submit(&text, mailbox),
            Command::RequestFinished(outcome) => self.request_finished(outcome),
            Command::SelectCitation { entry, label } => {
                self.select_citation(entry, &label);
            }
            Command::CloseOverlay => {
                self.overlay.close();
                self.notify_overlay();
            }
            Command::ClickOverlay(region) => {
                self.overlay.click(region);
                self.notify_overlay();
            }
            Command::Snapshot(reply_tx) => {
                reply_tx.send(self.snapshot()).ok();
            }
        }
    }

    fn submit(&mut self, text: &str, mailbox: &Arc<Mailbox>) {
        let Some(request) = self.exchange.submit(text) else {
            return;
        };
        self.notify_transcript();
        self.spawn_request(request, mailbox);
    }

    fn spawn_request(&self, request: ChatRequest, mailbox: &Arc<Mailbox>) {
        let service = self.service.clone();
        // The task holds a strong reference, so the loop stays alive until
        // the outcome is delivered.
        let mailbox = Arc::clone(mailbox);
        tokio::spawn(async move {
            let outcome = service.ask(request).await;
            mailbox.send(Command::RequestFinished(outcome)).ok();
        });
    }

    fn request_finished(&mut self, outcome: AskResult) {
        let finished = match outcome {
            Ok(answer) => self.exchange.succeed(answer),
            Err(_) => self.exchange.fail(),
        };
        if finished.is_none() {
            return;
        }
        self.notify_transcript();
        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    fn select_citation(&mut self, entry: Option<EntryHandle>, label: &str) {
        let resolver = match entry {
            Some(entry) => self.exchange.resolver_for(entry),
            None => Some(self.exchange.current_resolver()),
        };
        let not_found = self.exchange.strings().excerpt_not_found.as_str();
        let body = resolver
            .map(|r| r.resolve_text(label, not_found))
            .unwrap_or(not_found)
            .to_owned();
        self.overlay.open(label, body, self.links.link_for(label));
        self.notify_overlay();
    }

    fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            phase: self.exchange.phase(),
            transcript: self.exchange.transcript().clone(),
            overlay: self.overlay.state().clone(),
        }
    }

    fn notify_transcript(&self) {
        if let Some(on_transcript) = &self.on_transcript {
            on_transcript(self.exchange.transcript());
        }
    }

    fn notify_overlay(&self) {
        if let Some(on_overlay) = &self.on_overlay {
            on_overlay(self.overlay.state());
        }
    }
}

/// Forwards input affordance changes to the builder's callbacks.
#[derive(Default)]
pub struct CallbackInput {
    pub on_enabled: Option<Box<dyn Fn(bool) + Send + Sync>>,
    pub on_clear: Option<Box<dyn Fn() + Send + Sync>>,
    pub on_focus: Option<Box<dyn Fn() + Send + Sync>>,
}

impl InputSurface for CallbackInput {
    fn set_enabled(&mut self, enabled: bool) {
        if let Some(on_enabled) = &self.on_enabled {
            on_enabled(enabled);
        }
    }

    fn clear(&mut self) {
        if let Some(on_clear) = &self.on_clear {
            on_clear();
        }
    }

    fn focus(&mut self) {
        if let Some(on_focus) = &self.on_focus {
            on_focus();
        }
    }
}
