use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::board::RevealTiming;

/// Play Wordle in the terminal.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "wordle-tui", version, about)]
pub struct Config {
    /// Word list to play with, one five letter word per line
    #[arg(short, long)]
    pub words: Option<PathBuf>,

    /// Delay between revealing two letters of a guess, in milliseconds
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u64).range(50..=2000))]
    pub reveal_step_ms: u64,

    /// Length of a tile flip, in milliseconds
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(0..=5000))]
    pub flip_ms: u64,

    /// Where to write the log (the terminal is taken by the game)
    #[arg(long, default_value = "wordle-tui.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn timing(&self) -> RevealTiming {
        RevealTiming {
            step: Duration::from_millis(self.reveal_step_ms),
            flip: Duration::from_millis(self.flip_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reveal_timing() {
        let config = Config::parse_from(["wordle-tui"]);
        assert_eq!(config.timing(), RevealTiming::default());
        assert_eq!(config.words, None);
        assert_eq!(config.log_file, PathBuf::from("wordle-tui.log"));
    }

    #[test]
    fn custom_values() {
        let config = Config::parse_from([
            "wordle-tui",
            "--words",
            "list.txt",
            "--reveal-step-ms",
            "300",
            "--flip-ms",
            "0",
        ]);
        assert_eq!(config.words, Some(PathBuf::from("list.txt")));
        assert_eq!(config.timing().step, Duration::from_millis(300));
        assert_eq!(config.timing().flip, Duration::ZERO);
    }

    #[test]
    fn step_too_small_for_jitter_is_rejected() {
        assert!(Config::try_parse_from(["wordle-tui", "--reveal-step-ms", "10"]).is_err());
    }
}
