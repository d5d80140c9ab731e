//! Echoes key presses received from a background listener.

use crate::cli::Settings;
use anyhow::Result;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tinct::console::{CrosstermKeySource, Key, KeyListener, KeyPress, RawModeGuard, ScriptedKeys};
use tinct::core::{Color, Style, StyleBuilder};

const CAPACITY: usize = 16;

/// Text typed when stdin is not a terminal.
const SCRIPT: &str = "tinct";

/// How long a scripted run waits for the next press before finishing.
const SCRIPT_IDLE: Duration = Duration::from_millis(200);

pub fn run(settings: &Settings, out: &mut dyn Write) -> Result<()> {
    if io::stdin().is_terminal() {
        writeln!(out, "Press keys to see them; q, Esc or Ctrl+C quits.")?;
        out.flush()?;
        let _raw = RawModeGuard::new()?;
        let listener = KeyListener::spawn(CrosstermKeySource, CAPACITY)?;
        // Raw mode does not translate newlines.
        echo(&listener, settings, out, "\r\n", None)?;
        listener.stop()?;
    } else {
        tracing::debug!("stdin is not a terminal, replaying scripted keys");
        let listener = KeyListener::spawn(ScriptedKeys::from_text(SCRIPT), CAPACITY)?;
        echo(&listener, settings, out, "\n", Some(SCRIPT_IDLE))?;
        listener.stop()?;
    }
    Ok(())
}

/// Prints presses until a quit key, the limit, or `idle` without input.
///
/// Returns how many presses were printed.
fn echo(
    listener: &KeyListener,
    settings: &Settings,
    out: &mut dyn Write,
    newline: &str,
    idle: Option<Duration>,
) -> Result<usize> {
    let key_style = Style::new().fg(Color::CYAN).bold();
    let mut count = 0;

    loop {
        if settings.limit.is_some_and(|limit| count >= limit) {
            break;
        }
        let press = match idle {
            Some(timeout) => match listener.recv_timeout(timeout)? {
                Some(press) => press,
                None => break,
            },
            None => listener.recv()?,
        };
        if is_quit(&press) {
            break;
        }

        count += 1;
        let line = StyleBuilder::with_mode(settings.color_mode)
            .text(format_args!("{count:>3}  "))
            .styled(&key_style, press)
            .build();
        write!(out, "{line}{newline}")?;
        out.flush()?;
    }

    Ok(count)
}

fn is_quit(press: &KeyPress) -> bool {
    match press.code {
        Key::Escape => true,
        Key::Char('c') => press.control,
        Key::Char('q') => !press.control && !press.alt,
        _ => false,
    }
}
