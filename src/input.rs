//! The guess being typed, before it is sent to the game session.

use thiserror::Error;

use crate::wordle::NLETTER;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("only letters A-Z are allowed")]
    NotAlphabetic(char),
    #[error("a guess has {} letters", NLETTER)]
    TooLong,
    #[error("a guess needs exactly {} letters", NLETTER)]
    Incomplete,
    #[error("waiting for the last guess")]
    Busy,
    #[error("the game is over")]
    Locked,
}

/// Collects and validates one guess.
///
/// Only one guess may be in flight: after [`InputController::submit`] the
/// input is frozen until [`InputController::accepted`] clears it or
/// [`InputController::rejected`] hands it back unchanged.
#[derive(Debug, Default)]
pub struct InputController {
    buffer: String,
    error: Option<InputError>,
    pending: bool,
    locked: bool,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Message for the last rejected keystroke, cleared by the next good one.
    pub fn error(&self) -> Option<InputError> {
        self.error
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn check_editable(&self) -> Result<(), InputError> {
        if self.pending {
            Err(InputError::Busy)
        } else if self.locked {
            Err(InputError::Locked)
        } else {
            Ok(())
        }
    }

    pub fn push(&mut self, c: char) -> Result<(), InputError> {
        self.check_editable()?;
        let c = c.to_ascii_uppercase();
        let res = if !c.is_ascii_alphabetic() {
            Err(InputError::NotAlphabetic(c))
        } else if self.buffer.len() >= NLETTER {
            Err(InputError::TooLong)
        } else {
            self.buffer.push(c);
            Ok(())
        };
        self.error = res.err();
        res
    }

    pub fn pop(&mut self) -> Option<char> {
        if self.check_editable().is_err() {
            return None;
        }
        self.error = None;
        self.buffer.pop()
    }

    pub fn can_submit(&self) -> bool {
        self.check_editable().is_ok() && self.buffer.len() == NLETTER
    }

    /// Freeze the input and hand out the guess to send.
    pub fn submit(&mut self) -> Result<String, InputError> {
        self.check_editable()?;
        if self.buffer.len() != NLETTER {
            return Err(InputError::Incomplete);
        }
        self.pending = true;
        Ok(self.buffer.clone())
    }

    /// The submitted guess made it into the history.
    pub fn accepted(&mut self) {
        self.buffer.clear();
        self.error = None;
        self.pending = false;
    }

    /// Freeze the input while some other request, such as a new game, is
    /// outstanding.
    pub fn begin_request(&mut self) {
        self.pending = true;
    }

    /// The request failed or changed nothing; keep the text for editing.
    pub fn rejected(&mut self) {
        self.pending = false;
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Back to a blank, unlocked input.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
