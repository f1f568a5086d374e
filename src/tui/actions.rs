use std::sync::{Arc, PoisonError};

use super::*;
use crate::session::SessionError;
use crate::wordle::{CheckResponse, ResetResponse, NGUESSES};

#[derive(Debug)]
pub enum Action {
    Exit,
    Redraw,
    EnterChar(char),
    DeleteChar,
    Submit,
    Reset,
    Checked(Result<CheckResponse, SessionError>),
    ResetDone(Result<ResetResponse, SessionError>),
}

impl App {
    pub fn update(&mut self, action: Action) {
        match action {
            Action::Exit => {
                self.token.cancel();
                self.grid.shutdown();
                self.exit = true;
            }
            Action::Redraw => {}
            Action::EnterChar(c) => {
                if let Err(err) = self.input.push(c) {
                    tracing::debug!(%err, "key rejected");
                }
            }
            Action::DeleteChar => {
                self.input.pop();
            }
            Action::Submit => {
                if self.in_flight {
                    return;
                }
                match self.input.submit() {
                    Ok(word) => self.check_word(word),
                    Err(err) => tracing::debug!(%err, "submit ignored"),
                }
            }
            Action::Reset => {
                if !self.in_flight {
                    self.reset();
                }
            }
            Action::Checked(Ok(response)) if response.is_update => {
                self.in_flight = false;
                self.input.accepted();
                self.message = None;
                self.is_clear = response.is_clear;
                self.show_history(response.history);
            }
            Action::Checked(Ok(_)) => {
                self.in_flight = false;
                self.input.rejected();
                tracing::warn!("guess not taken by the game session");
                self.message = Some("Guess not accepted".to_string());
            }
            Action::Checked(Err(err)) => {
                self.in_flight = false;
                self.input.rejected();
                tracing::warn!(%err, "check_word failed");
                self.message = Some(err.to_string());
            }
            Action::ResetDone(Ok(response)) if response.is_update => {
                self.in_flight = false;
                self.grid.clear();
                self.input.reset();
                self.message = None;
                self.is_clear = false;
                self.show_history(response.history);
            }
            Action::ResetDone(Ok(_)) => {
                self.in_flight = false;
                self.input.rejected();
                tracing::info!("reset changed nothing");
            }
            Action::ResetDone(Err(err)) => {
                self.in_flight = false;
                self.input.rejected();
                tracing::warn!(%err, "reset failed");
                self.message = Some(err.to_string());
            }
        }
    }

    /// Take a new authoritative history and start the reveals it needs.
    fn show_history(&mut self, history: History) {
        self.history = history;
        self.grid.update(&self.history);
        self.input.set_locked(self.is_clear || self.history.len() >= NGUESSES);
        tracing::info!(
            guesses = self.history.len(),
            is_clear = self.is_clear,
            "history updated"
        );
    }

    fn check_word(&mut self, word: String) {
        self.in_flight = true;
        self.call_session(
            move |session| Action::Checked(session.check_word(&word)),
            |err| Action::Checked(Err(err)),
        );
    }

    fn reset(&mut self) {
        self.in_flight = true;
        self.input.begin_request();
        self.call_session(
            |session| Action::ResetDone(session.reset()),
            |err| Action::ResetDone(Err(err)),
        );
    }

    /// Run one session call on the blocking pool and post its result back.
    ///
    /// Session calls may block on I/O, so they never run on the thread that
    /// drives the event loop and the board timers.
    fn call_session<F>(&self, call: F, failed: fn(SessionError) -> Action)
    where
        F: FnOnce(&mut Box<dyn GameSession>) -> Action + Send + 'static,
    {
        let session = Arc::clone(&self.session);
        let tx = self.action_tx.clone();
        let token = self.token.child_token();

        let handle = tokio::task::spawn_blocking(move || {
            let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
            call(&mut guard)
        });

        tokio::spawn(async move {
            let action = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    // The app is shutting down
                    None
                }
                res = handle => match res {
                    Ok(action) => Some(action),
                    Err(err) => {
                        tracing::error!(%err, "game session call panicked");
                        Some(failed(SessionError::Unavailable(err.to_string())))
                    }
                },
            };
            if let Some(action) = action {
                if tx.send(action).is_err() {
                    tracing::debug!("session result dropped, app closed");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::wordle::{HistoryRow, LetterStatus};
    use tokio::time::timeout;

    struct Offline;

    impl GameSession for Offline {
        fn reset(&mut self) -> Result<ResetResponse, SessionError> {
            Err(SessionError::Unavailable("offline".into()))
        }

        fn check_word(&mut self, _word: &str) -> Result<CheckResponse, SessionError> {
            Err(SessionError::Unavailable("offline".into()))
        }
    }

    fn app() -> App {
        let mut app = App::new(Offline, RevealTiming::default());
        // Drop the startup reset, these tests feed responses by hand.
        let _ = app.action_rx.try_recv();
        app
    }

    fn type_word(app: &mut App, word: &str) {
        for c in word.chars() {
            app.update(Action::EnterChar(c));
        }
    }

    #[tokio::test]
    async fn submit_is_single_flight() {
        let mut app = app();
        type_word(&mut app, "crane");
        app.update(Action::Submit);
        assert!(app.is_busy());

        app.update(Action::Submit);
        app.update(Action::Reset);
        app.update(Action::EnterChar('x'));
        assert_eq!(app.input().text(), "CRANE");
        assert!(app.is_busy());
    }

    #[tokio::test]
    async fn not_updated_response_keeps_guess() {
        let mut app = app();
        type_word(&mut app, "crane");
        app.update(Action::Submit);
        app.update(Action::Checked(Ok(CheckResponse {
            history: vec![],
            is_update: false,
            is_clear: false,
        })));

        assert!(!app.is_busy());
        assert_eq!(app.input().text(), "CRANE");
        assert_eq!(app.message(), Some("Guess not accepted"));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_locks_input() {
        let mut app = app();
        type_word(&mut app, "apple");
        app.update(Action::Submit);
        let row = HistoryRow::from_guess("APPLE", [LetterStatus::Correct; 5]).unwrap();
        app.update(Action::Checked(Ok(CheckResponse {
            history: vec![row],
            is_update: true,
            is_clear: true,
        })));

        assert!(app.is_clear());
        assert!(app.input().is_locked());
        assert_eq!(app.history(), &vec![row]);
        assert_eq!(app.input().text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn noop_reset_leaves_board() {
        let mut app = app();
        let row = HistoryRow::from_guess("CRANE", [LetterStatus::Absent; 5]).unwrap();
        app.update(Action::Checked(Ok(CheckResponse {
            history: vec![row],
            is_update: true,
            is_clear: false,
        })));
        app.update(Action::ResetDone(Ok(ResetResponse {
            is_update: false,
            history: vec![],
        })));

        assert_eq!(app.history(), &vec![row]);
        assert_eq!(app.grid().rows()[0].target(), &row);
    }

    #[tokio::test]
    async fn exit_stops_the_loop() {
        let mut app = app();
        app.update(Action::Exit);
        assert!(app.is_exiting());
    }

    #[tokio::test]
    async fn input_frozen_while_reset_pending() {
        let mut app = app();
        type_word(&mut app, "crane");
        app.update(Action::Reset);
        assert!(app.is_busy());
        assert!(app.input().is_pending());
        assert!(!app.input().can_submit());

        app.update(Action::DeleteChar);
        app.update(Action::EnterChar('x'));
        app.update(Action::Submit);
        assert_eq!(app.input().text(), "CRANE");

        // The reset fails, so the guess is handed back.
        app.step().await;
        assert!(!app.is_busy());
        assert_eq!(app.message(), Some("game session unavailable: offline"));
        assert!(app.input().can_submit());
        app.update(Action::DeleteChar);
        assert_eq!(app.input().text(), "CRAN");
    }

    #[tokio::test(start_paused = true)]
    async fn exit_cancels_reveals_in_progress() {
        let mut app = app();
        let row = HistoryRow::from_guess("CRANE", [LetterStatus::Absent; 5]).unwrap();
        app.update(Action::Checked(Ok(CheckResponse {
            history: vec![row],
            is_update: true,
            is_clear: false,
        })));
        assert!(app.grid().is_animating());

        app.update(Action::Exit);
        assert!(!app.grid().is_animating());
        assert!(timeout(Duration::from_secs(2), app.board_rx.recv())
            .await
            .is_err());
    }
}
