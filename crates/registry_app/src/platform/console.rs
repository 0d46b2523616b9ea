use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use registry_logging::registry_debug;

/// Everything the app needs from the person at the keyboard.
pub trait Console {
    /// Blocking yes/no question.
    fn confirm(&mut self, question: &str) -> bool;
    /// Blocking error notification.
    fn alert(&mut self, message: &str);
    /// Redraws the screen with `lines`.
    fn show(&mut self, lines: &[String]);
}

#[derive(Debug, PartialEq, Eq)]
pub enum LineEvent {
    Line(String),
    Idle,
    Closed,
}

/// Stdin/stdout console. A reader thread forwards stdin lines so the main
/// loop can keep draining engine events while waiting for input.
pub struct TerminalConsole {
    input: mpsc::Receiver<String>,
    out: io::Stdout,
}

impl TerminalConsole {
    pub fn spawn_stdin() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        registry_debug!("stdin closed: {}", err);
                        break;
                    }
                }
            }
        });
        Self {
            input: rx,
            out: io::stdout(),
        }
    }

    pub fn next_line(&self, timeout: Duration) -> LineEvent {
        match self.input.recv_timeout(timeout) {
            Ok(line) => LineEvent::Line(line),
            Err(RecvTimeoutError::Timeout) => LineEvent::Idle,
            Err(RecvTimeoutError::Disconnected) => LineEvent::Closed,
        }
    }

    fn write_lines(&mut self, lines: &[String]) {
        let mut out = self.out.lock();
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(out, "{line}"))
            .and_then(|()| out.flush());
        if let Err(err) = result {
            registry_debug!("stdout write failed: {}", err);
        }
    }
}

impl Console for TerminalConsole {
    fn confirm(&mut self, question: &str) -> bool {
        {
            let mut out = self.out.lock();
            let _ = write!(out, "{question} [y/N] ");
            let _ = out.flush();
        }
        // Blocks the main loop; engine events queue up meanwhile.
        match self.input.recv() {
            Ok(answer) => is_affirmative(&answer),
            Err(_) => false,
        }
    }

    fn alert(&mut self, message: &str) {
        self.write_lines(&[format!("!! {message}")]);
    }

    fn show(&mut self, lines: &[String]) {
        self.write_lines(lines);
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_confirms() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" YES \r"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yep"));
    }
}
