//! Integration tests for backends, windows and key listening together.

use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::time::Duration;
use tinct_console::{
    AnsiBackend, ConsoleBackend, ConsoleError, Key, KeyListener, KeyPress, ScriptedKeys, Window,
};
use tinct_core::{Color, ColorMode, Style};

type Backend = AnsiBackend<Vec<u8>, Vec<u8>, Cursor<Vec<u8>>>;

fn backend(mode: ColorMode) -> Backend {
    AnsiBackend::new(Vec::new(), Vec::new(), Cursor::new(Vec::new()))
        .with_color_mode(mode)
        .with_size(30, 8)
}

fn stdout_of(backend: Backend) -> String {
    String::from_utf8(backend.into_parts().0).unwrap()
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_status_screen_sequence() {
    let mut window = Window::new(backend(ColorMode::None));
    window.clear().unwrap();
    window.set("title", (0, 0), None).unwrap();
    window.set("body", (2, 3), None).unwrap();
    window.clear_line_from((4, 3)).unwrap();

    assert_eq!(
        stdout_of(window.into_backend()),
        "\x1b[1;1H\x1b[0Jtitle\x1b[4;3Hbody\x1b[4;5H\x1b[0K"
    );
}

#[test]
fn test_styled_output_resets_after_text() {
    let mut window = Window::new(backend(ColorMode::TrueColor));
    let style = Style::new().fg(Color::ORANGE).bold();
    window.write("warn", Some(&style)).unwrap();

    let out = stdout_of(window.into_backend());
    assert!(out.starts_with(&style.to_ansi()));
    assert!(out.ends_with("warn\x1b[0m"));
}

#[test]
fn test_basic_mode_uses_palette_codes() {
    let mut b = backend(ColorMode::Basic);
    b.write("x", Some(&Style::new().fg(Color::RED))).unwrap();
    let out = stdout_of(b);
    assert!(!out.contains("38;2;"));
    assert!(out.contains('x'));
}

#[test]
fn test_out_of_bounds_writes_nothing() {
    let mut window = Window::new(backend(ColorMode::None));
    let err = window.set("x", (30, 0), None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "position (30, 0) is outside the 30x8 console"
    );
    assert!(matches!(err, ConsoleError::OutOfBounds { .. }));
    assert_eq!(stdout_of(window.into_backend()), "");
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_listener_feeds_window_loop() {
    let mut window = Window::new(backend(ColorMode::None));
    let script = ScriptedKeys::new([
        KeyPress::char('a'),
        KeyPress::new(Key::Down),
        KeyPress::new(Key::Escape),
    ]);
    let listener = window.listen(script, 4).unwrap();

    let mut row = 0;
    loop {
        let key = listener.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
        match key.code {
            Key::Escape => break,
            Key::Down => row += 1,
            _ => window.set(&key.to_string(), (0, row), None).unwrap(),
        }
    }
    listener.stop().unwrap();

    assert_eq!(row, 1);
    assert_eq!(stdout_of(window.into_backend()), "\x1b[1;1HA");
}
