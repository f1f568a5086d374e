use std::fs::File;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wordle_tui::config::Config;
use wordle_tui::session::{LocalSession, WordList};
use wordle_tui::tui::{self, App};

fn init_tracing(config: &Config) -> Result<()> {
    let file = File::create(&config.log_file)
        .wrap_err_with(|| format!("cannot create log file {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::parse();
    init_tracing(&config)?;

    let words = match &config.words {
        Some(path) => WordList::from_file(path)?,
        None => WordList::embedded(),
    };
    tracing::info!(words = words.len(), timing = ?config.timing(), "starting");
    let session = LocalSession::new(words)?;

    tui::initialize_panic_handler();
    let mut terminal = tui::init()?;
    let mut app = App::new(session, config.timing());
    let app_result = app.run(&mut terminal).await;
    tui::restore()?;
    app_result?;

    for row in app.history() {
        println!("{}", row.colored());
    }
    Ok(())
}
