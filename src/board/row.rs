use tokio_util::sync::CancellationToken;

use super::{BoardEvent, LetterTile, Scheduler, TileAddr};
use crate::wordle::{AnswerHistoryLetter, HistoryRow, NLETTER};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealState {
    /// Nothing to show.
    Empty,
    /// Waiting for the letter at this position.
    Revealing(usize),
    /// The displayed row equals the authoritative row.
    Settled,
}

/// One row of the grid, revealing a guess letter by letter.
///
/// A new authoritative row clears the display and schedules one callback
/// per position, all measured from the same instant: position `i` lands
/// after `i * step`. Callbacks carry the row generation they belong to, so
/// a callback from an earlier reveal that was already queued when the row
/// changed is dropped instead of shown.
#[derive(Debug)]
pub struct GuessRow {
    index: usize,
    target: HistoryRow,
    tiles: [LetterTile; NLETTER],
    state: RevealState,
    generation: u64,
    pending: Option<CancellationToken>,
}

impl GuessRow {
    pub fn new(index: usize) -> Self {
        GuessRow {
            index,
            target: HistoryRow::empty(),
            tiles: std::array::from_fn(|col| LetterTile::new(TileAddr { row: index, col })),
            state: RevealState::Empty,
            generation: 0,
            pending: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tiles(&self) -> &[LetterTile; NLETTER] {
        &self.tiles
    }

    /// The row the display is converging to.
    pub fn target(&self) -> &HistoryRow {
        &self.target
    }

    /// What is on screen right now.
    pub fn displayed(&self) -> HistoryRow {
        HistoryRow {
            letters: std::array::from_fn(|col| self.tiles[col].cell()),
        }
    }

    /// Feed the authoritative content of this row.
    ///
    /// A row counts as new when its first letter differs from the one of the
    /// row being shown. Returns `true` if a new reveal was started.
    pub fn update(&mut self, row: &HistoryRow, scheduler: &Scheduler) -> bool {
        if row.first_letter() == self.target.first_letter() {
            return false;
        }
        self.start_reveal(row, scheduler);
        true
    }

    /// Drop whatever is shown or pending and go back to an empty row.
    pub fn clear(&mut self, scheduler: &Scheduler) {
        self.start_reveal(&HistoryRow::empty(), scheduler);
    }

    fn start_reveal(&mut self, row: &HistoryRow, scheduler: &Scheduler) {
        self.cancel_pending();
        self.generation += 1;
        self.target = *row;
        for tile in self.tiles.iter_mut() {
            tile.set(AnswerHistoryLetter::empty(), scheduler);
        }

        if row.is_empty() {
            self.state = RevealState::Empty;
            return;
        }

        let token = scheduler.token();
        let step = scheduler.timing().step;
        tracing::debug!(
            row = self.index,
            generation = self.generation,
            word = %row.word(),
            "starting reveal"
        );
        for (col, letter) in row.letters.iter().enumerate() {
            scheduler.schedule(
                step * col as u32,
                &token,
                BoardEvent::Reveal {
                    addr: TileAddr {
                        row: self.index,
                        col,
                    },
                    generation: self.generation,
                    letter: *letter,
                },
            );
        }
        self.pending = Some(token);
        self.state = RevealState::Revealing(0);
    }

    /// Apply a reveal callback. Returns `false` for callbacks of an older reveal.
    pub fn reveal(
        &mut self,
        generation: u64,
        col: usize,
        letter: AnswerHistoryLetter,
        scheduler: &Scheduler,
    ) -> bool {
        if generation != self.generation || self.pending.is_none() || col >= NLETTER {
            tracing::debug!(
                row = self.index,
                col,
                generation,
                current = self.generation,
                "stale reveal ignored"
            );
            return false;
        }

        self.tiles[col].set(letter, scheduler);
        self.state = if col + 1 == NLETTER {
            self.pending = None;
            RevealState::Settled
        } else {
            RevealState::Revealing(col + 1)
        };
        true
    }

    pub fn finish_flip(&mut self, col: usize, seq: u64) -> bool {
        match self.tiles.get_mut(col) {
            Some(tile) => tile.finish_flip(seq),
            None => false,
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for GuessRow {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
