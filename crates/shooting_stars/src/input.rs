//! Handle all the raw input directly from the end user.

use std::io::Read as _;

use color_eyre::eyre::Result;
use termwiz::input::{InputEvent, KeyCode, KeyEvent, Modifiers};

/// Bytes from STDIN
pub type BytesFromSTDIN = [u8; 128];

/// The ASCII "end of text" byte that a raw mode terminal sends for `Ctrl-C`.
const CTRL_C: char = '\u{3}';

/// Handle input from the user
pub(crate) struct Input {
    /// The main protocol channel.
    protocol_tx: tokio::sync::broadcast::Sender<crate::run::Protocol>,
}

impl Input {
    /// Start a thread to listen and parse the end user's STDIN. Quitting keys end the whole
    /// application.
    pub fn start(
        protocol_tx: tokio::sync::broadcast::Sender<crate::run::Protocol>,
    ) -> std::thread::JoinHandle<Result<()>> {
        // The Tokio docs actually suggest using `std::thread` to listen on STDIN for interactive
        // applications.
        std::thread::spawn(move || -> Result<()> {
            let protocol_for_shutdown = protocol_tx.clone();
            let input = Self { protocol_tx };
            let result = input.consume_stdin();
            if let Err(error) = result {
                crate::run::broadcast_protocol_end(&protocol_for_shutdown);
                return Err(error);
            }
            Ok(())
        })
    }

    /// Listen to the end user's STDIN until they ask to quit.
    fn consume_stdin(&self) -> Result<()> {
        tracing::debug!("Starting to listen on STDIN");

        let stdin = std::io::stdin();
        let mut reader = std::io::BufReader::new(stdin);
        let mut parser = termwiz::input::InputParser::new();

        loop {
            let mut buffer: BytesFromSTDIN = [0; 128];
            let count = reader.read(&mut buffer[..])?;
            if count == 0 {
                tracing::debug!("STDIN closed");
                return Ok(());
            }

            let Some(bytes) = buffer.get(0..count) else {
                tracing::warn!("Couldn't get bytes from STDIN input buffer");
                continue;
            };
            tracing::trace!("Received STDIN input: {bytes:x?}");

            let mut is_quitting = false;
            parser.parse(
                bytes,
                |event| {
                    tracing::trace!("Parsed input event: {event:?}");
                    is_quitting |= is_quit_event(&event);
                },
                false,
            );

            if is_quitting {
                tracing::debug!("Quit requested from keyboard");
                crate::run::broadcast_protocol_end(&self.protocol_tx);
                return Ok(());
            }
        }
    }
}

/// `q`, `Esc` and `Ctrl-C` all quit.
pub(crate) fn is_quit_event(event: &InputEvent) -> bool {
    let InputEvent::Key(KeyEvent { key, modifiers }) = event else {
        return false;
    };

    match key {
        KeyCode::Char('q' | CTRL_C) | KeyCode::Escape => true,
        KeyCode::Char('c') => modifiers.contains(Modifiers::CTRL),
        _ => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn key(key: KeyCode, modifiers: Modifiers) -> InputEvent {
        InputEvent::Key(KeyEvent { key, modifiers })
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_event(&key(KeyCode::Char('q'), Modifiers::NONE)));
        assert!(is_quit_event(&key(KeyCode::Escape, Modifiers::NONE)));
        assert!(is_quit_event(&key(KeyCode::Char('c'), Modifiers::CTRL)));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert!(!is_quit_event(&key(KeyCode::Char('c'), Modifiers::NONE)));
        assert!(!is_quit_event(&key(KeyCode::Char('a'), Modifiers::NONE)));
        assert!(!is_quit_event(&key(KeyCode::Enter, Modifiers::NONE)));
    }

    #[test]
    fn raw_bytes_are_parsed_to_quit_events() {
        let mut parser = termwiz::input::InputParser::new();
        let mut events = Vec::new();
        parser.parse(b"xq", |event| events.push(event), false);
        assert_eq!(events.iter().filter(|event| is_quit_event(event)).count(), 1);
    }
}
