use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::BoardEvent;

/// Delays between the steps of the reveal animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTiming {
    /// Delay between two neighbouring letters of a row.
    pub step: Duration,
    /// How long a single tile stays in its flip animation.
    pub flip: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        RevealTiming {
            step: Duration::from_millis(200),
            flip: Duration::from_millis(500),
        }
    }
}

/// Posts board events back into the event loop after a delay.
///
/// Every callback is tied to a cancellation token. All tokens handed out by
/// [`Scheduler::token`] are children of one root token, so
/// [`Scheduler::shutdown`] cancels every pending callback at once.
#[derive(Clone, Debug)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<BoardEvent>,
    root: CancellationToken,
    timing: RevealTiming,
}

impl Scheduler {
    pub fn new(tx: mpsc::UnboundedSender<BoardEvent>, timing: RevealTiming) -> Self {
        Scheduler {
            tx,
            root: CancellationToken::new(),
            timing,
        }
    }

    pub fn timing(&self) -> RevealTiming {
        self.timing
    }

    /// A fresh token for one group of callbacks.
    pub fn token(&self) -> CancellationToken {
        self.root.child_token()
    }

    /// Send `event` once `delay` has passed, unless `token` is cancelled first.
    pub fn schedule(&self, delay: Duration, token: &CancellationToken, event: BoardEvent) {
        let tx = self.tx.clone();
        let token = token.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    // A cancel that raced the timer still wins.
                    if token.is_cancelled() {
                        return;
                    }
                    if tx.send(event).is_err() {
                        tracing::debug!("board event dropped, receiver closed");
                    }
                }
            }
        });
    }

    /// Cancel every callback that has not fired yet.
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.root.is_cancelled()
    }
}
