use super::{BoardEvent, GuessRow, RevealState, Scheduler};
use crate::wordle::{HistoryRow, NGUESSES};

/// Fixed six-row view of a history: rows past the history are empty, rows
/// past the sixth are dropped.
pub fn project(history: &[HistoryRow]) -> [HistoryRow; NGUESSES] {
    let mut rows = [HistoryRow::empty(); NGUESSES];
    for (slot, row) in rows.iter_mut().zip(history.iter()) {
        *slot = *row;
    }
    rows
}

/// The six guess rows of the board.
///
/// Row `i` always shows guess `i`, so appending a guess never disturbs the
/// rows above it. All timing state lives in the rows.
#[derive(Debug)]
pub struct HistoryGrid {
    rows: [GuessRow; NGUESSES],
    scheduler: Scheduler,
}

impl HistoryGrid {
    pub fn new(scheduler: Scheduler) -> Self {
        HistoryGrid {
            rows: std::array::from_fn(GuessRow::new),
            scheduler,
        }
    }

    pub fn rows(&self) -> &[GuessRow; NGUESSES] {
        &self.rows
    }

    /// Show `history`, starting a reveal on every row that changed.
    pub fn update(&mut self, history: &[HistoryRow]) {
        if history.len() > NGUESSES {
            tracing::warn!(len = history.len(), "history longer than the grid, truncating");
        }
        for (row, content) in self.rows.iter_mut().zip(project(history).iter()) {
            row.update(content, &self.scheduler);
        }
    }

    /// Empty every row and cancel everything in flight.
    pub fn clear(&mut self) {
        for row in self.rows.iter_mut() {
            row.clear(&self.scheduler);
        }
    }

    /// Route a timer callback to the row it belongs to.
    pub fn handle(&mut self, event: BoardEvent) -> bool {
        let addr = event.addr();
        let Some(row) = self.rows.get_mut(addr.row) else {
            tracing::debug!(?addr, "event for a row outside the grid");
            return false;
        };
        match event {
            BoardEvent::Reveal {
                generation, letter, ..
            } => row.reveal(generation, addr.col, letter, &self.scheduler),
            BoardEvent::FlipDone { seq, .. } => row.finish_flip(addr.col, seq),
        }
    }

    pub fn displayed(&self) -> [HistoryRow; NGUESSES] {
        std::array::from_fn(|i| self.rows[i].displayed())
    }

    /// `true` while any row is revealing or any tile is flipping.
    pub fn is_animating(&self) -> bool {
        self.rows.iter().any(|row| {
            matches!(row.state(), RevealState::Revealing(_))
                || row.tiles().iter().any(|tile| tile.is_flipping())
        })
    }

    /// Cancel every pending callback for good. Used on teardown.
    pub fn shutdown(&mut self) {
        self.clear();
        self.scheduler.shutdown();
    }
}
