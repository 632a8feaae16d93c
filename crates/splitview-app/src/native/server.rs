//! The native messaging loop.
//!
//! Four tasks share the connection:
//! - the reader (this future) decodes stdin frames, routes `hostReply`
//!   envelopes straight to the [`NativeHost`], and queues commands;
//! - the controller runs queued commands one at a time;
//! - the event forwarder turns bus events into `event` envelopes;
//! - the writer drains the outbound queue into stdout.
//!
//! Host replies bypass the command queue, so a command waiting on the
//! extension never blocks the reply it is waiting for.

use futures_util::{SinkExt, StreamExt};
use splitview_common::{Command, Event};
use splitview_config::SplitViewConfig;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};

use super::codec;
use super::host::NativeHost;
use super::protocol::{peek_id, Inbound, Outbound};
use crate::app_state::SplitViewApp;

enum Inbox {
    /// `id` is `None` for commands raised locally, which get no reply.
    Command { id: Option<String>, command: Command },
    ConfigChanged(SplitViewConfig),
}

/// Serve one extension connection until it closes or sends `Shutdown`.
pub async fn serve<R, W>(
    app: SplitViewApp,
    host: NativeHost,
    outbound_rx: mpsc::Receiver<Outbound>,
    reader: R,
    writer: W,
    config_updates: Option<watch::Receiver<SplitViewConfig>>,
) where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let writer_task = tokio::spawn(write_frames(writer, outbound_rx));
    let events_task = tokio::spawn(forward_events(app.subscribe(), host.sender()));

    // Unbounded: the reader must never wait on the controller.
    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
    let controller = tokio::spawn(run_controller(app, inbox_rx, host.sender()));
    let config_task = config_updates.map(|rx| tokio::spawn(forward_config(rx, inbox_tx.clone())));

    info!("native messaging host ready");
    let shutdown_requested = read_frames(reader, &host, &inbox_tx).await;

    host.disconnect();
    if !shutdown_requested {
        let _ = inbox_tx.send(Inbox::Command {
            id: None,
            command: Command::Shutdown,
        });
    }
    drop(inbox_tx);
    if let Some(task) = config_task {
        task.abort();
    }

    if let Err(e) = controller.await {
        warn!(error = %e, "controller task failed");
    }
    if let Err(e) = events_task.await {
        warn!(error = %e, "event forwarder failed");
    }
    drop(host);
    if let Err(e) = writer_task.await {
        warn!(error = %e, "writer task failed");
    }
    info!("native messaging host stopped");
}

/// Returns true when the extension asked for shutdown, false when the
/// stream ended or broke.
async fn read_frames<R: AsyncRead + Unpin>(
    reader: R,
    host: &NativeHost,
    inbox: &mpsc::UnboundedSender<Inbox>,
) -> bool {
    let mut frames = FramedRead::new(reader, codec::inbound_codec());
    while let Some(frame) = frames.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "native messaging input broken");
                return false;
            }
        };

        match codec::decode::<Inbound>(&frame) {
            Ok(Inbound::Command { id, command }) => {
                let shutdown = matches!(command, Command::Shutdown);
                if inbox
                    .send(Inbox::Command {
                        id: Some(id),
                        command,
                    })
                    .is_err()
                {
                    return true;
                }
                if shutdown {
                    return true;
                }
            }
            Ok(Inbound::HostReply { id, result, error }) => {
                let outcome = match error {
                    Some(reason) => Err(reason),
                    None => Ok(result),
                };
                host.resolve(&id, outcome);
            }
            Err(e) => {
                warn!(error = %e, bytes = frame.len(), "dropping malformed message");
                if let Some(id) = peek_id(&frame) {
                    let _ = host.sender().try_send(Outbound::failure(id, e.to_string()));
                }
            }
        }
    }
    debug!("native messaging input closed");
    false
}

async fn run_controller(
    mut app: SplitViewApp,
    mut inbox: mpsc::UnboundedReceiver<Inbox>,
    outbound: mpsc::Sender<Outbound>,
) {
    while let Some(item) = inbox.recv().await {
        match item {
            Inbox::Command { id, command } => {
                let shutdown = matches!(command, Command::Shutdown);
                let result = app.handle(command).await;
                if let Some(id) = id {
                    if outbound.send(Outbound::reply(id, &result)).await.is_err() {
                        debug!("reply dropped, output closed");
                    }
                }
                if shutdown {
                    break;
                }
            }
            Inbox::ConfigChanged(config) => {
                app.apply_config(config).await;
            }
        }
    }
}

async fn forward_events(mut events: broadcast::Receiver<Event>, outbound: mpsc::Sender<Outbound>) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if outbound.send(Outbound::Event { event }).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(skipped = n, "event forwarding lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn forward_config(
    mut updates: watch::Receiver<SplitViewConfig>,
    inbox: mpsc::UnboundedSender<Inbox>,
) {
    while updates.changed().await.is_ok() {
        let config = updates.borrow_and_update().clone();
        if inbox.send(Inbox::ConfigChanged(config)).is_err() {
            break;
        }
    }
}

async fn write_frames<W: AsyncWrite + Unpin>(writer: W, mut outbound: mpsc::Receiver<Outbound>) {
    let mut sink = FramedWrite::new(writer, codec::outbound_codec());
    while let Some(message) = outbound.recv().await {
        let frame = match codec::encode(&message) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "outbound message not sent");
                match message.fallback(&e).map(|m| codec::encode(&m)) {
                    Some(Ok(frame)) => frame,
                    _ => continue,
                }
            }
        };
        if let Err(e) = sink.send(frame).await {
            warn!(error = %e, "native messaging output closed");
            break;
        }
    }
}
