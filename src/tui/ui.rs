use super::App;
use crate::board::{GuessRow, LetterTile, Visibility};
use crate::wordle::{LetterStatus, NGUESSES, NLETTER};
use ratatui::{
    prelude::*,
    widgets::{block::*, *},
};

const TILE_WIDTH: u16 = 7;
const TILE_HEIGHT: u16 = 3;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = self.create_border();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(TILE_HEIGHT * NGUESSES as u16 + 1),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Fill(1),
            ])
            .split(border.inner(area));

        self.render_grid(rows[0], buf);
        self.render_input(rows[1], buf);
        self.render_status(rows[2], buf);

        border.render(area, buf);
    }
}

impl App {
    fn create_border(&self) -> Block<'_> {
        let title = Title::from(" Wordle ".bold());
        let instructions = Title::from(Line::from(vec![
            " Quit ".into(),
            "<Esc> ".blue().bold(),
            " Submit ".into(),
            "<Enter> ".blue().bold(),
            " New game ".into(),
            "<Ctrl-R> ".blue().bold(),
        ]));
        Block::default()
            .title(title.alignment(Alignment::Center))
            .title(
                instructions
                    .alignment(Alignment::Center)
                    .position(Position::Bottom),
            )
            .borders(Borders::ALL)
            .border_set(symbols::border::PLAIN)
    }

    fn render_grid(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::new().padding(Padding {
            left: 0,
            right: 0,
            top: 1,
            bottom: 0,
        });

        let word_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(TILE_HEIGHT); NGUESSES])
            .split(block.inner(area));
        for (i, row) in self.grid.rows().iter().enumerate() {
            row.render(word_rows[i], buf);
        }
        block.render(area, buf);
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(TILE_WIDTH * NLETTER as u16)])
            .flex(layout::Flex::Center)
            .split(area)[0];

        let editable = !self.in_flight && !self.input.is_pending() && !self.input.is_locked();
        let border_style = if editable && self.input.can_submit() {
            Style::default().light_green()
        } else if editable {
            Style::default().white()
        } else {
            Style::default().dark_gray()
        };

        let text = self.input.text();
        let slots: Vec<String> = (0..NLETTER)
            .map(|i| match text.chars().nth(i) {
                Some(c) => c.to_string(),
                None => "_".to_string(),
            })
            .collect();

        Paragraph::new(slots.join(" "))
            .bold()
            .centered()
            .block(
                Block::new()
                    .title(Title::from(" Guess ").alignment(Alignment::Center))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style),
            )
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line<'_>> = vec![];

        if let Some(err) = self.input.error() {
            lines.push(Line::from(err.to_string().red()));
        }
        if let Some(message) = &self.message {
            lines.push(Line::from(message.clone().red()));
        }

        let guesses = self.history.len();
        let status = if self.is_clear {
            format!("Solved in {guesses}!").light_green().bold()
        } else if guesses >= NGUESSES {
            "Out of guesses".light_red().bold()
        } else if self.in_flight {
            "Checking...".dark_gray()
        } else {
            format!("Guess {} of {NGUESSES}", guesses + 1).dark_gray()
        };
        lines.push(Line::from(status));

        Paragraph::new(lines).centered().render(area, buf);
    }
}

/// Colors of a tile with a letter on it.
fn tile_style(status: LetterStatus) -> Style {
    match status {
        LetterStatus::Correct => Style::default().bg(Color::Green).fg(Color::Black).bold(),
        LetterStatus::Present => Style::default().bg(Color::Yellow).fg(Color::Black).bold(),
        LetterStatus::Absent => Style::default().bg(Color::DarkGray).fg(Color::White).bold(),
        LetterStatus::None => Style::default().bold(),
    }
}

trait RenderRow {
    fn render(&self, area: Rect, buf: &mut Buffer);
}

impl RenderRow for GuessRow {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let row_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(TILE_WIDTH); NLETTER])
            .flex(layout::Flex::Center)
            .split(area);
        for (i, tile) in self.tiles().iter().enumerate() {
            tile.render(row_layout[i], buf);
        }
    }
}

trait RenderTile {
    fn render(&self, area: Rect, buf: &mut Buffer);
}

impl RenderTile for LetterTile {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        // The empty cell outline is always drawn to keep the grid shape
        let outline = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().dark_gray());

        if self.visibility() == Visibility::Hidden {
            outline.render(area, buf);
            return;
        }

        let mut style = tile_style(self.status());
        let block = if self.is_flipping() {
            style = style.add_modifier(Modifier::REVERSED);
            Block::new()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().white())
        } else {
            outline
        };

        let letter = match self.letter() {
            Some(l) => l.to_string(),
            None => " ".to_string(),
        };
        Paragraph::new(letter)
            .centered()
            .style(style)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RevealTiming;
    use crate::session::{GameSession, SessionError};
    use crate::tui::Action;
    use crate::wordle::{CheckResponse, HistoryRow, ResetResponse};

    struct Unused;

    impl GameSession for Unused {
        fn reset(&mut self) -> Result<ResetResponse, SessionError> {
            Err(SessionError::Unavailable("unused".into()))
        }

        fn check_word(&mut self, _word: &str) -> Result<CheckResponse, SessionError> {
            Err(SessionError::Unavailable("unused".into()))
        }
    }

    fn screen(app: &App) -> String {
        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        buf.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn style_per_status() {
        assert_eq!(tile_style(LetterStatus::Correct).bg, Some(Color::Green));
        assert_eq!(tile_style(LetterStatus::Present).bg, Some(Color::Yellow));
        assert_eq!(tile_style(LetterStatus::Absent).bg, Some(Color::DarkGray));
        assert_eq!(tile_style(LetterStatus::None).bg, None);
    }

    #[test]
    fn draws_title_and_input() {
        let mut app = App::new(Unused, RevealTiming::default());
        for c in "cra".chars() {
            app.update(Action::EnterChar(c));
        }
        let text = screen(&app);
        assert!(text.contains("Wordle"));
        assert!(text.contains("C R A _ _"));
        assert!(text.contains("Guess 1 of 6"));
    }

    /// Color of the top left corner of the guess box.
    fn input_border(app: &App) -> Option<Color> {
        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        (0..area.height).find_map(|y| {
            let line: String = (0..area.width).map(|x| buf.get(x, y).symbol()).collect();
            if !line.contains("Guess") {
                return None;
            }
            let x = (0..area.width).find(|&x| buf.get(x, y).symbol() == "╭")?;
            Some(buf.get(x, y).fg)
        })
    }

    #[tokio::test]
    async fn ready_border_only_when_submit_goes_through() {
        let mut app = App::new(Unused, RevealTiming::default());
        for c in "crane".chars() {
            app.update(Action::EnterChar(c));
        }
        assert_eq!(input_border(&app), Some(Color::LightGreen));

        app.update(Action::Reset);
        assert_eq!(input_border(&app), Some(Color::DarkGray));
    }

    #[tokio::test(start_paused = true)]
    async fn draws_solved_status() {
        let mut app = App::new(Unused, RevealTiming::default());
        let row = HistoryRow::from_guess("APPLE", [LetterStatus::Correct; 5]).unwrap();
        app.update(Action::Checked(Ok(CheckResponse {
            history: vec![row],
            is_update: true,
            is_clear: true,
        })));
        assert!(screen(&app).contains("Solved in 1!"));
    }
}
