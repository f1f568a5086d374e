use std::fs;
use std::path::Path;

use rand::seq::IndexedRandom;

use super::{GameSession, SessionError};
use crate::wordle::{
    CheckResponse, GameStatus, HistoryRow, LetterStatus, ResetResponse, NGUESSES, NLETTER,
};

static EMBEDDED_WORDS: &str = include_str!("../../data/words.txt");

/// Allowed guesses; answers are drawn from the same list.
#[derive(Clone, Debug)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_WORDS)
    }

    pub fn from_file(path: &Path) -> Result<Self, SessionError> {
        let text = fs::read_to_string(path).map_err(|source| SessionError::WordList {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::parse(&text);
        if list.is_empty() {
            return Err(SessionError::EmptyWordList);
        }
        Ok(list)
    }

    /// One word per line. Lines that are not five letters are skipped.
    pub fn parse(text: &str) -> Self {
        let mut words: Vec<String> = text
            .lines()
            .map(|line| line.trim().to_ascii_uppercase())
            .filter(|line| line.len() == NLETTER && line.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();
        words.sort();
        words.dedup();
        WordList { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|w| w.as_str().cmp(word))
            .is_ok()
    }

    pub fn random_word(&self) -> Option<&str> {
        self.words.choose(&mut rand::rng()).map(String::as_str)
    }
}

/// Feedback for `guess` against `answer`.
///
/// Exact matches are taken first; every other guessed letter is `Present`
/// only while the answer still has an unmatched copy of it.
///
/// # Example
///
/// ```
/// use wordle_tui::session::score;
/// use wordle_tui::wordle::LetterStatus::*;
/// assert_eq!(score("APPLE", "PAPER"), [Present, Present, Correct, Present, Absent]);
/// assert_eq!(score("CRANE", "EERIE"), [Absent, Absent, Present, Absent, Correct]);
/// ```
pub fn score(answer: &str, guess: &str) -> [LetterStatus; NLETTER] {
    let answer: Vec<char> = answer.chars().collect();
    let guess: Vec<char> = guess.chars().collect();
    let mut result = [LetterStatus::Absent; NLETTER];
    let mut unmatched: Vec<Option<char>> = answer.iter().copied().map(Some).collect();

    for (i, item) in result.iter_mut().enumerate() {
        if guess.get(i).is_some() && guess.get(i) == answer.get(i) {
            *item = LetterStatus::Correct;
            unmatched[i] = None;
        }
    }

    for (i, item) in result.iter_mut().enumerate() {
        if *item == LetterStatus::Correct {
            continue;
        }
        let Some(&c) = guess.get(i) else {
            continue;
        };
        if let Some(pos) = unmatched.iter().position(|u| *u == Some(c)) {
            *item = LetterStatus::Present;
            unmatched[pos] = None;
        }
    }
    result
}

/// In-process game session backed by a word list.
#[derive(Clone, Debug)]
pub struct LocalSession {
    words: WordList,
    status: GameStatus,
}

impl LocalSession {
    pub fn new(words: WordList) -> Result<Self, SessionError> {
        let answer = words
            .random_word()
            .ok_or(SessionError::EmptyWordList)?
            .to_string();
        Ok(Self::with_answer(words, &answer))
    }

    /// A session with a known answer.
    pub fn with_answer(words: WordList, answer: &str) -> Self {
        LocalSession {
            words,
            status: GameStatus {
                answer: answer.to_ascii_uppercase(),
                history: vec![],
                is_clear: false,
            },
        }
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }
}

impl GameSession for LocalSession {
    fn reset(&mut self) -> Result<ResetResponse, SessionError> {
        let answer = self
            .words
            .random_word()
            .ok_or(SessionError::EmptyWordList)?
            .to_string();
        self.status = GameStatus {
            answer,
            history: vec![],
            is_clear: false,
        };
        tracing::info!(words = self.words.len(), "new game");
        Ok(ResetResponse {
            is_update: true,
            history: vec![],
        })
    }

    fn check_word(&mut self, word: &str) -> Result<CheckResponse, SessionError> {
        let word = word.to_ascii_uppercase();
        if word.len() != NLETTER || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SessionError::InvalidWord(word));
        }
        if self.status.is_clear || self.status.history.len() >= NGUESSES {
            return Err(SessionError::GameOver);
        }
        if !self.words.contains(&word) {
            return Err(SessionError::NotInWordList(word));
        }

        let row = HistoryRow::from_guess(&word, score(&self.status.answer, &word))
            .ok_or_else(|| SessionError::InvalidWord(word.clone()))?;
        self.status.is_clear = row.is_solved();
        self.status.history.push(row);
        tracing::debug!(guess = %row, attempt = self.status.history.len(), "guess accepted");

        Ok(CheckResponse {
            history: self.status.history.clone(),
            is_update: true,
            is_clear: self.status.is_clear,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordle::LetterStatus::{Absent, Correct, Present};

    fn session() -> LocalSession {
        let words = WordList::parse("apple\ngrape\nonion\npeach\nbanana\nabcd\nlemon\nmelon\n");
        LocalSession::with_answer(words, "apple")
    }

    fn statuses(row: &HistoryRow) -> Vec<LetterStatus> {
        row.letters.iter().map(|l| l.status).collect()
    }

    #[test]
    fn parse_word_list() {
        let words = WordList::parse("apple\n Grape \nbanana\n\nab1de\napple\n");
        assert_eq!(words.len(), 2);
        assert!(words.contains("APPLE"));
        assert!(words.contains("GRAPE"));
        assert!(!words.contains("BANANA"));
        assert!(!words.contains("apple"));
    }

    #[test]
    fn embedded_list_is_usable() {
        let words = WordList::embedded();
        assert!(words.len() > 50);
        assert!(words.contains("HELLO"));
        assert!(words.contains(words.random_word().unwrap()));
    }

    #[test]
    fn missing_word_list_file() {
        let err = WordList::from_file(Path::new("/nonexistent/words.txt")).unwrap_err();
        assert!(matches!(err, SessionError::WordList { .. }));
    }

    #[test]
    fn score_handles_duplicates() {
        assert_eq!(score("APPLE", "APPLE"), [Correct; 5]);
        assert_eq!(score("APPLE", "GRAPE"), [Absent, Absent, Present, Present, Correct]);
        assert_eq!(score("WATER", "SLATE"), [Absent, Absent, Present, Present, Present]);
        assert_eq!(score("ABIDE", "SPEED"), [Absent, Absent, Present, Absent, Present]);
        assert_eq!(score("ERASE", "SPEED"), [Present, Absent, Present, Present, Absent]);
        assert_eq!(score("STEAL", "SPEED"), [Correct, Absent, Correct, Absent, Absent]);
        assert_eq!(score("CREPE", "SPEED"), [Absent, Present, Correct, Present, Absent]);
    }

    #[test]
    fn accepted_guess_appends_one_row() {
        let mut session = session();
        let response = session.check_word("grape").unwrap();
        assert_eq!(response.history.len(), 1);
        assert!(!response.is_clear);
        assert_eq!(
            statuses(&response.history[0]),
            vec![Absent, Absent, Present, Present, Correct]
        );
        assert_eq!(response.history[0].word(), "GRAPE");
    }

    #[test]
    fn solving_locks_the_game() {
        let mut session = session();
        let response = session.check_word("APPLE").unwrap();
        assert!(response.is_clear);
        assert!(session.status().is_clear);

        let err = session.check_word("peach").unwrap_err();
        assert!(matches!(err, SessionError::GameOver));
        assert_eq!(session.status().history.len(), 1);
    }

    #[test]
    fn rejected_words_leave_history_alone() {
        let mut session = session();
        session.check_word("onion").unwrap();

        assert!(matches!(
            session.check_word("banana"),
            Err(SessionError::InvalidWord(_))
        ));
        assert!(matches!(
            session.check_word("xyzzy"),
            Err(SessionError::NotInWordList(w)) if w == "XYZZY"
        ));
        assert!(matches!(
            session.check_word("ab1de"),
            Err(SessionError::InvalidWord(_))
        ));
        assert_eq!(session.status().history.len(), 1);
    }

    #[test]
    fn six_guesses_end_the_game() {
        let mut session = session();
        for word in ["onion", "grape", "peach", "lemon", "melon", "onion"] {
            session.check_word(word).unwrap();
        }
        assert!(matches!(
            session.check_word("grape"),
            Err(SessionError::GameOver)
        ));
        assert!(!session.status().is_clear);
    }

    #[test]
    fn reset_clears_history() {
        let mut session = session();
        session.check_word("apple").unwrap();

        let response = session.reset().unwrap();
        assert!(response.is_update);
        assert!(response.history.is_empty());
        assert!(!session.status().is_clear);
        assert!(session.status().history.is_empty());
    }
}
