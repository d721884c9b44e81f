use std::error::Error;
use std::fmt;

use tokio::sync::{mpsc, oneshot, watch};

use crate::overlay::OverlayRegion;
use crate::service_client::AskResult;
use crate::transcript::EntryHandle;

use super::ChatSnapshot;

/// A type of error which can be returned whenever commands are sent to a
/// chat whose event loop has stopped.
pub struct ChatClosedError;

impl fmt::Debug for ChatClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClosedError").finish()
    }
}

impl fmt::Display for ChatClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "the chat has been closed".fmt(f)
    }
}

impl Error for ChatClosedError {}

#[derive(Debug)]
pub enum Command {
    Submit(String),
    SelectCitation {
        entry: Option<EntryHandle>,
        label: String,
    },
    CloseOverlay,
    ClickOverlay(OverlayRegion),
    Snapshot(oneshot::Sender<ChatSnapshot>),
    /// Sent by the request task, never by users.
    RequestFinished(AskResult),
}

pub struct MailboxParts {
    pub mailbox: Mailbox,
    pub cmd_rx: mpsc::UnboundedReceiver<Command>,
    pub kill_rx: watch::Receiver<bool>,
}

pub struct Mailbox {
    cmd_tx: mpsc::UnboundedSender<Command>,
    kill_tx: watch::Sender<bool>,
}

impl Mailbox {
    #[inline]
    pub fn new() -> MailboxParts {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);
        MailboxParts {
            mailbox: Mailbox { cmd_tx, kill_tx },
            cmd_rx,
            kill_rx,
        }
    }

    #[inline]
    pub fn send(&self, cmd: Command) -> Result<(), ChatClosedError> {
        self.cmd_tx.send(cmd).map_err(|_| ChatClosedError)
    }

    #[inline]
    pub fn try_kill(&self) {
        self.kill_tx.send(true).ok();
    }
}
