use std::io::{self, stdout, Stdout};
use std::sync::{Arc, Mutex};

use crossterm::{execute, terminal::*};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::board::{BoardEvent, HistoryGrid, RevealTiming, Scheduler};
use crate::input::InputController;
use crate::session::GameSession;
use crate::wordle::History;

pub use actions::Action;

mod actions;
mod events;
mod ui;

/// A type alias for the terminal type used in this application
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn initialize_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

/// Initialize the terminal
pub fn init() -> io::Result<Tui> {
    execute!(stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(stdout()))
}

/// Restore the terminal to its original state
pub fn restore() -> io::Result<()> {
    execute!(stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

type SharedSession = Arc<Mutex<Box<dyn GameSession>>>;

pub struct App {
    exit: bool,
    history: History,
    is_clear: bool,
    /// A reset or a guess is waiting for the session.
    in_flight: bool,
    message: Option<String>,
    input: InputController,
    grid: HistoryGrid,
    session: SharedSession,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    board_rx: mpsc::UnboundedReceiver<BoardEvent>,
    token: CancellationToken,
}

impl App {
    /// A new app. A fresh game is requested as the first action.
    pub fn new(session: impl GameSession + 'static, timing: RevealTiming) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (board_tx, board_rx) = mpsc::unbounded_channel();
        let session: Box<dyn GameSession> = Box::new(session);

        // Start a new game in the background
        let _ = action_tx.send(Action::Reset);

        App {
            exit: false,
            history: vec![],
            is_clear: false,
            in_flight: false,
            message: None,
            input: InputController::new(),
            grid: HistoryGrid::new(Scheduler::new(board_tx, timing)),
            session: Arc::new(Mutex::new(session)),
            action_tx,
            action_rx,
            board_rx,
            token: CancellationToken::new(),
        }
    }

    /// runs the application's main loop until the user quits
    pub async fn run(&mut self, terminal: &mut Tui) -> io::Result<()> {
        let task = self.handle_events(self.action_tx.clone());

        while !self.exit {
            terminal.draw(|frame| self.render_frame(frame))?;
            self.step().await;
        }
        task.abort();
        Ok(())
    }

    /// Wait for the next action or timer callback and apply it.
    pub async fn step(&mut self) {
        tokio::select! {
            Some(action) = self.action_rx.recv() => self.update(action),
            Some(event) = self.board_rx.recv() => {
                self.grid.handle(event);
            }
        }
    }

    fn render_frame(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.size());
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn grid(&self) -> &HistoryGrid {
        &self.grid
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    /// Last failure reported by the game session.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_clear(&self) -> bool {
        self.is_clear
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn is_exiting(&self) -> bool {
        self.exit
    }
}
