//! Core logic of a chat whose answers cite their sources: the transcript,
//! the exchange state machine, citation lookup and the detail overlay.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod chat;
mod citation;
mod config;
mod exchange;
mod overlay;
mod service_client;
pub mod transcript;

pub use chat::{Chat, ChatBuilder, ChatClosedError, ChatSnapshot};
pub use citation::CitationResolver;
pub use citechat_service::Excerpt;
pub use config::{ChatStrings, DocumentLinks};
pub use exchange::{ExchangeController, ExchangePhase, InputSurface};
pub use overlay::{Overlay, OverlayRegion, OverlayState};
pub use transcript::{
    CitationRef, EntryDraft, EntryHandle, MessageEntry, Role, TranscriptStore,
};
