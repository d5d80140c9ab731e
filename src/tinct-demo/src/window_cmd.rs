//! Draws a framed status screen through a console window.

use crate::cli::Settings;
use anyhow::Result;
use std::io::{self, IsTerminal};
use tinct::console::{
    AnsiBackend, ConsoleBackend, ConsoleError, CrosstermKeySource, RawModeGuard, Window,
    detect_backend,
};
use tinct::core::{Color, Style};

const TITLE: &str = "tinct demo";

pub fn run(settings: &Settings) -> Result<()> {
    let backend: Box<dyn ConsoleBackend> = if settings.color_mode.is_enabled() {
        detect_backend()
    } else {
        Box::new(AnsiBackend::stdio().with_color_mode(settings.color_mode))
    };
    let mut window = Window::with_title(backend, TITLE)?;
    draw(&mut window)?;

    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        let _raw = RawModeGuard::new()?;
        window.wait_for_key_press(&mut CrosstermKeySource)?;
        window.clear()?;
        window.set_cursor_visible(true)?;
        window.flush()?;
    }
    Ok(())
}

/// Frames the window and fills in the status lines.
fn draw<B: ConsoleBackend>(window: &mut Window<B>) -> Result<()> {
    let (width, height) = (window.width()?, window.height()?);
    window.set_cursor_visible(false)?;
    window.clear()?;

    let frame = Style::new().fg(Color::DARK_GRAY);
    let label = Style::new().fg(Color::ORANGE).bold();
    if width >= 2 && height >= 2 {
        let inner = usize::from(width - 2);
        window.set(format!("┌{}┐", "─".repeat(inner)), (0, 0), Some(&frame))?;
        for y in 1..height - 1 {
            window.set("│", (0, y), Some(&frame))?;
            window.set("│", (width - 1, y), Some(&frame))?;
        }
        window.set(format!("└{}┘", "─".repeat(inner)), (0, height - 1), Some(&frame))?;
    }

    let lines = [
        format!("title: {}", window.title()),
        format!("size:  {width}x{height}"),
        "press any key to exit".to_string(),
    ];
    for (row, text) in (2u16..).zip(lines.iter()) {
        if row + 1 >= height {
            break;
        }
        window.set(text, (2, row), Some(&label))?;
    }

    // Positions outside the window are rejected rather than clamped.
    match window.goto((width, height)) {
        Err(error @ ConsoleError::OutOfBounds { .. }) => {
            tracing::debug!(%error, "cursor move rejected");
        }
        other => other?,
    }

    window.goto((0, height.saturating_sub(1)))?;
    window.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinct::core::ColorMode;
    use tinct::core::ansi::strip_ansi_codes;

    fn render(width: u16, height: u16) -> String {
        let backend = AnsiBackend::new(Vec::new(), Vec::new(), io::empty())
            .with_color_mode(ColorMode::None)
            .with_size(width, height);
        let mut window = Window::with_title(backend, TITLE).unwrap();
        draw(&mut window).unwrap();
        let (out, err, _) = window.into_backend().into_parts();
        assert!(err.is_empty());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_draws_frame_and_status() {
        let text = render(30, 8);
        let plain = strip_ansi_codes(&text);
        assert!(plain.contains(&format!("┌{}┐", "─".repeat(28))));
        assert!(plain.contains(&format!("└{}┘", "─".repeat(28))));
        assert!(plain.contains("title: tinct demo"));
        assert!(plain.contains("size:  30x8"));
        // Bottom-left corner, 1-based in the escape sequence.
        assert!(text.contains("\x1b[8;1H└"));
        assert!(text.ends_with("\x1b[8;1H"));
    }

    #[test]
    fn test_tiny_window_skips_frame() {
        let plain = strip_ansi_codes(&render(1, 1));
        assert!(!plain.contains('┌'));
        assert!(!plain.contains("title:"));
    }
}
