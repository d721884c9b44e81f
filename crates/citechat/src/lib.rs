//! A chat front end whose answers cite their sources.
//!
//! The crate renders the transcript and the citation overlay to HTML, and
//! ships a terminal host (the `citechat` binary) that talks to an
//! answering service over HTTP.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod host;
pub mod render;

/// Re-exports of [`citechat_core`] crate.
pub mod core {
    pub use citechat_core::*;
}
