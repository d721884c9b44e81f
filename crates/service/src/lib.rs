//! An abstraction layer for answering services.
//!
//! This crate establishes the protocol a chat front end uses to talk to
//! a remote answering service: one request carrying the user's message,
//! one answer carrying the reply text plus the citations and excerpts it
//! was grounded on.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod answer;
mod error;
mod request;
mod service;

pub use answer::*;
pub use error::*;
pub use request::*;
pub use service::*;
