//! Presentation state of the guess grid.
//!
//! The authoritative history comes from the game session; everything here
//! only decides *when* each part of it becomes visible. Timers post
//! [`BoardEvent`]s into the event loop, which hands them back to
//! [`HistoryGrid::handle`].

use crate::wordle::AnswerHistoryLetter;

mod grid;
mod row;
mod schedule;
mod tile;

pub use grid::{project, HistoryGrid};
pub use row::{GuessRow, RevealState};
pub use schedule::{RevealTiming, Scheduler};
pub use tile::{LetterTile, Visibility};

/// Position of a tile on the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileAddr {
    pub row: usize,
    pub col: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    /// Show `letter` at `addr`, if the row is still on reveal `generation`.
    Reveal {
        addr: TileAddr,
        generation: u64,
        letter: AnswerHistoryLetter,
    },
    /// The flip animation number `seq` of the tile at `addr` is over.
    FlipDone { addr: TileAddr, seq: u64 },
}

impl BoardEvent {
    pub fn addr(&self) -> TileAddr {
        match self {
            BoardEvent::Reveal { addr, .. } | BoardEvent::FlipDone { addr, .. } => *addr,
        }
    }
}
