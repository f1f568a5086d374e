use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use super::*;

impl App {
    pub fn handle_events(&self, tx: mpsc::UnboundedSender<Action>) -> tokio::task::JoinHandle<()> {
        let token = self.token.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                let event = tokio::select! {
                    _ = token.cancelled() => break,
                    event = reader.next() => event,
                };
                let action = match event {
                    Some(Ok(Event::Key(key))) => handle_key_event(key),
                    Some(Ok(Event::Resize(_, _))) => Some(Action::Redraw),
                    Some(Ok(_)) => None,
                    Some(Err(err)) => {
                        tracing::error!(%err, "reading terminal events failed");
                        Some(Action::Exit)
                    }
                    None => Some(Action::Exit),
                };
                if let Some(action) = action {
                    if tx.send(action).is_err() {
                        break;
                    }
                }
            }
        })
    }
}

fn handle_key_event(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Esc => Action::Exit,
        KeyCode::Char('c') if ctrl => Action::Exit,
        KeyCode::Char('r') if ctrl => Action::Reset,

        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => Action::DeleteChar,
        // Everything else typed goes to the input, which decides what is valid
        KeyCode::Char(x) if !ctrl => Action::EnterChar(x),
        _ => return None,
    };
    Some(action)
}
