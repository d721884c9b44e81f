use std::sync::Weak;

use tokio::select;
use tokio::sync::{mpsc, watch};

use super::mailbox::{Command, Mailbox};
use super::state::ChatState;

/// Runs the chat until it is killed or every handle is gone.
///
/// All state changes happen on this one task. The outbound request is the
/// only thing that runs elsewhere, and it reports back through the
/// mailbox.
pub async fn run_chat(
    mailbox: Weak<Mailbox>,
    mut state: ChatState,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    mut kill_rx: watch::Receiver<bool>,
) {
    debug!("started");
    state.start();
    loop {
        let cmd = select! {
            biased;

            _ = kill_rx.changed() => {
                break;
            }
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else {
                    break;
                };
                cmd
            }
        };
        trace!("received command: {cmd:?}");

        {
            let Some(mailbox) = mailbox.upgrade() else {
                warn!("last handle has been dropped, discard the command");
                break;
            };

            let proc_span = trace_span!("proc cmd");
            proc_span.in_scope(|| {
                state.handle(cmd, &mailbox);
                trace!("finished");
            });
        }
    }
    debug!("will terminate");
}
