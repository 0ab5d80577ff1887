use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::time::{self, Instant};

use crate::dto::lobby_dto::Lobby;
use crate::services::websocket;

/// Cancellation handle for a lobby's countdown task. At most one countdown
/// is live per lobby; arming again tears the previous one down first.
#[derive(Default)]
pub struct TimerHandle {
    stop: Mutex<Option<oneshot::Sender<()>>>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals the active countdown to stop. Safe to call when nothing is
    /// armed.
    pub fn cancel(&self) {
        let mut slot = self.stop.lock().expect("timer lock poisoned");
        if let Some(stop) = slot.take() {
            let _ = stop.send(());
        }
    }
}

/// Cancels any running countdown and, when the lobby has a timer with
/// seconds remaining, spawns a fresh one ticking once per second. Each tick
/// decrements the remaining seconds under the draft lock and pushes a
/// snapshot; the task stops on its own when the timer hits zero.
pub async fn arm(lobby: &Arc<Lobby>) {
    let remaining = lobby.draft.lock().await.state.timer;

    let mut slot = lobby.timer.stop.lock().expect("timer lock poisoned");
    if let Some(stop) = slot.take() {
        let _ = stop.send(());
    }

    if !lobby.has_timer || remaining == 0 {
        return;
    }

    let (stop_tx, mut stop_rx) = oneshot::channel();
    *slot = Some(stop_tx);
    drop(slot);

    let lobby = Arc::clone(lobby);
    let period = Duration::from_secs(1);
    let mut ticker = time::interval_at(Instant::now() + period, period);
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let mut draft = lobby.draft.lock().await;
                    // A reset may have raced this tick while it waited on the
                    // draft lock; re-check the stop signal before mutating.
                    if !matches!(stop_rx.try_recv(), Err(TryRecvError::Empty)) {
                        return;
                    }
                    if draft.state.timer == 0 {
                        return;
                    }
                    draft.state.timer -= 1;
                    let expired = draft.state.timer == 0;
                    drop(draft);
                    websocket::broadcast_state(&lobby).await;
                    if expired {
                        return;
                    }
                }
                _ = &mut stop_rx => return,
            }
        }
    });
}
