use tokio_util::sync::CancellationToken;

use super::{BoardEvent, Scheduler, TileAddr};
use crate::wordle::{AnswerHistoryLetter, LetterStatus};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// Keeps its place in the grid but draws no letter box.
    Hidden,
    Visible,
}

/// A single letter cell and its flip animation.
///
/// The flip starts only when the tile goes from no letter to a letter.
/// While it runs the tile holds the token of the pending `FlipDone`
/// callback; the token is cancelled when the flip is restarted, when the
/// tile is emptied and when the tile is dropped.
#[derive(Debug)]
pub struct LetterTile {
    addr: TileAddr,
    letter: Option<char>,
    status: LetterStatus,
    flip_seq: u64,
    flip: Option<CancellationToken>,
}

/// `true` for the one transition that starts a flip.
fn is_flip_edge(previous: Option<char>, next: Option<char>) -> bool {
    previous.is_none() && next.is_some()
}

impl LetterTile {
    pub fn new(addr: TileAddr) -> Self {
        LetterTile {
            addr,
            letter: None,
            status: LetterStatus::None,
            flip_seq: 0,
            flip: None,
        }
    }

    pub fn addr(&self) -> TileAddr {
        self.addr
    }

    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    pub fn status(&self) -> LetterStatus {
        self.status
    }

    pub fn cell(&self) -> AnswerHistoryLetter {
        AnswerHistoryLetter {
            letter: self.letter,
            status: self.status,
        }
    }

    pub fn is_flipping(&self) -> bool {
        self.flip.is_some()
    }

    /// Number of flips started so far.
    pub fn flip_count(&self) -> u64 {
        self.flip_seq
    }

    pub fn visibility(&self) -> Visibility {
        match (self.letter, self.status) {
            (None, LetterStatus::None) => Visibility::Hidden,
            _ => Visibility::Visible,
        }
    }

    /// Render `cell` on this tile. Returns `true` if a flip was started.
    pub fn set(&mut self, cell: AnswerHistoryLetter, scheduler: &Scheduler) -> bool {
        let edge = is_flip_edge(self.letter, cell.letter);
        self.letter = cell.letter;
        self.status = cell.status;

        if edge {
            self.start_flip(scheduler);
        } else if self.letter.is_none() {
            self.cancel_flip();
        }
        edge
    }

    /// Settle the tile if `seq` is the flip currently running.
    pub fn finish_flip(&mut self, seq: u64) -> bool {
        if self.flip.is_some() && seq == self.flip_seq {
            self.flip = None;
            true
        } else {
            tracing::debug!(addr = ?self.addr, seq, "stale flip callback ignored");
            false
        }
    }

    fn start_flip(&mut self, scheduler: &Scheduler) {
        self.cancel_flip();
        self.flip_seq += 1;

        let token = scheduler.token();
        scheduler.schedule(
            scheduler.timing().flip,
            &token,
            BoardEvent::FlipDone {
                addr: self.addr,
                seq: self.flip_seq,
            },
        );
        self.flip = Some(token);
    }

    fn cancel_flip(&mut self) {
        if let Some(token) = self.flip.take() {
            token.cancel();
        }
    }
}

impl Drop for LetterTile {
    fn drop(&mut self) {
        self.cancel_flip();
    }
}
