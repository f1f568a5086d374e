//! The game session the board talks to.
//!
//! It owns the answer and the authoritative history. The UI only ever sees
//! what comes back from [`GameSession::reset`] and
//! [`GameSession::check_word`].

use std::path::PathBuf;

use thiserror::Error;

use crate::wordle::{CheckResponse, ResetResponse, NLETTER};

mod local;

pub use local::{score, LocalSession, WordList};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0:?} is not a {} letter word", NLETTER)]
    InvalidWord(String),
    #[error("{0} is not in the word list")]
    NotInWordList(String),
    #[error("the game is over")]
    GameOver,
    #[error("the word list is empty")]
    EmptyWordList,
    #[error("could not read word list {}", path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("game session unavailable: {0}")]
    Unavailable(String),
}

pub trait GameSession: Send {
    /// Start a new game. The history in the response is the new
    /// authoritative history, or the old one if `is_update` is false.
    fn reset(&mut self) -> Result<ResetResponse, SessionError>;

    /// Submit a guess. On success the history has one more row.
    fn check_word(&mut self, word: &str) -> Result<CheckResponse, SessionError>;
}

impl<T: GameSession + ?Sized> GameSession for Box<T> {
    fn reset(&mut self) -> Result<ResetResponse, SessionError> {
        (**self).reset()
    }

    fn check_word(&mut self, word: &str) -> Result<CheckResponse, SessionError> {
        (**self).check_word(word)
    }
}
