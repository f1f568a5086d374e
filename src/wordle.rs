use std::fmt;

pub const NLETTER: usize = 5;
pub const NGUESSES: usize = 6;

/// Feedback for one letter of a guess.
///
/// `None` marks a slot that has not been revealed (or is empty), which is
/// different from `Absent`: a revealed letter that is not in the answer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LetterStatus {
    Correct,
    Present,
    Absent,
    #[default]
    None,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AnswerHistoryLetter {
    pub letter: Option<char>,
    pub status: LetterStatus,
}

/// One guess: five letters with their feedback, left to right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HistoryRow {
    pub letters: [AnswerHistoryLetter; NLETTER],
}

/// All accepted guesses, oldest first.
pub type History = Vec<HistoryRow>;

/// Authoritative game state as owned by the game session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStatus {
    pub answer: String,
    pub history: History,
    pub is_clear: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResetResponse {
    pub is_update: bool,
    pub history: History,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckResponse {
    pub history: History,
    pub is_update: bool,
    pub is_clear: bool,
}

impl AnswerHistoryLetter {
    /// A revealed letter. The letter is stored uppercase.
    pub fn new(letter: char, status: LetterStatus) -> Self {
        AnswerHistoryLetter {
            letter: Some(letter.to_ascii_uppercase()),
            status,
        }
    }

    pub fn empty() -> Self {
        AnswerHistoryLetter {
            letter: None,
            status: LetterStatus::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.letter.is_none()
    }
}

impl HistoryRow {
    pub fn empty() -> Self {
        HistoryRow {
            letters: [AnswerHistoryLetter::empty(); NLETTER],
        }
    }

    /// Build a row from a guessed word and its feedback.
    ///
    /// Returns `None` unless the word has exactly five letters.
    ///
    /// # Example
    ///
    /// ```
    /// use wordle_tui::wordle::*;
    /// use wordle_tui::wordle::LetterStatus::*;
    /// let row = HistoryRow::from_guess("hello", [Present, Absent, Correct, Correct, Correct]).unwrap();
    /// assert_eq!(row.first_letter(), Some('H'));
    /// assert_eq!(row.to_string(), "[H] {E} (L) (L) (O)");
    /// assert!(HistoryRow::from_guess("abc", [Absent; 5]).is_none());
    /// ```
    pub fn from_guess(word: &str, status: [LetterStatus; NLETTER]) -> Option<HistoryRow> {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() != NLETTER {
            return None;
        }
        let mut row = HistoryRow::empty();
        for (i, item) in row.letters.iter_mut().enumerate() {
            *item = AnswerHistoryLetter::new(chars[i], status[i]);
        }
        Some(row)
    }

    pub fn first_letter(&self) -> Option<char> {
        self.letters[0].letter
    }

    pub fn is_empty(&self) -> bool {
        self.letters.iter().all(|l| l.is_empty())
    }

    pub fn is_solved(&self) -> bool {
        self.letters
            .iter()
            .all(|l| l.status == LetterStatus::Correct)
    }

    /// The guessed word, empty slots skipped.
    pub fn word(&self) -> String {
        self.letters.iter().filter_map(|l| l.letter).collect()
    }

    /// Same layout as `Display`, with colored backgrounds for a terminal.
    pub fn colored(&self) -> String {
        use colored::Colorize;

        self.letters
            .iter()
            .map(|l| {
                let ch = format!(" {} ", l.letter.unwrap_or(' '));
                match l.status {
                    LetterStatus::Correct => ch.black().on_green().to_string(),
                    LetterStatus::Present => ch.black().on_yellow().to_string(),
                    LetterStatus::Absent => ch.white().on_bright_black().to_string(),
                    LetterStatus::None => ch,
                }
            })
            .collect()
    }
}

impl fmt::Display for HistoryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, l) in self.letters.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            let ch = l.letter.unwrap_or('_');
            match l.status {
                LetterStatus::Correct => write!(f, "({ch})")?,
                LetterStatus::Present => write!(f, "[{ch}]")?,
                LetterStatus::Absent => write!(f, "{{{ch}}}")?,
                LetterStatus::None => write!(f, " {ch} ")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "guesses: {}", self.history.len())?;
        for row in &self.history {
            writeln!(f, "{row}")?;
        }
        write!(f, "is_clear: {}", self.is_clear)
    }
}
