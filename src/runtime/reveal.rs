//! Per-message typing reveal task
//!
//! Each bot message gets one spawned task that ticks once per character and
//! broadcasts progress so hosts can render the typewriter effect. Completion
//! feeds back into the engine as an event, so the input gate releases exactly
//! when the last character lands.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use super::UiEvent;
use crate::engine::Event;
use crate::timeline::Message;

/// Spawn the reveal task for a freshly appended bot message.
pub fn spawn(
    message: &Message,
    tick: Duration,
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<UiEvent>,
    cancel: CancellationToken,
) {
    let message_id = message.id;
    // Characters, not bytes: multi-byte text reveals one glyph per tick
    let total = message.text.chars().count();

    tokio::spawn(async move {
        let _ = broadcast_tx.send(UiEvent::RevealStarted { message_id });

        for revealed in 1..=total {
            tokio::select! {
                biased;

                () = cancel.cancelled() => return,

                () = tokio::time::sleep(tick) => {
                    let _ = broadcast_tx.send(UiEvent::RevealProgress { message_id, revealed });
                }
            }
        }

        let _ = broadcast_tx.send(UiEvent::RevealFinished { message_id });
        let _ = event_tx.send(Event::RevealFinished { message_id }).await;
    });
}
