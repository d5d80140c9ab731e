//! Prints the palette, the 256-color table, a true-color ramp and the text attributes.

use crate::cli::Settings;
use anyhow::Result;
use std::io::Write;
use tinct::core::{Color, ColorMode, Colors, StyleBuilder};

const NAMED: [&str; 14] = [
    "black",
    "white",
    "red",
    "green",
    "blue",
    "light_red",
    "dark_green",
    "dark_blue",
    "yellow",
    "magenta",
    "cyan",
    "orange",
    "gray",
    "dark_gray",
];

const GRADIENT_STEPS: u16 = 48;

pub fn run(settings: &Settings, out: &mut dyn Write) -> Result<()> {
    let mode = settings.color_mode;
    writeln!(out, "{}", heading("Palette", mode))?;
    writeln!(out, "{}", palette(mode))?;
    writeln!(out, "{}", heading("Named colors", mode))?;
    write!(out, "{}", named(mode)?)?;
    writeln!(out, "{}", heading("256-color table", mode))?;
    write!(out, "{}", table(mode))?;
    writeln!(out, "{}", heading("True color", mode))?;
    writeln!(out, "{}", gradient(mode))?;
    writeln!(out, "{}", heading("Attributes", mode))?;
    writeln!(out, "{}", attributes(mode))?;
    Ok(())
}

fn heading(title: &str, mode: ColorMode) -> String {
    StyleBuilder::with_mode(mode)
        .new_line()
        .bold(true)
        .underline(true)
        .text(title)
        .reset()
        .build()
}

fn palette(mode: ColorMode) -> String {
    let mut out = StyleBuilder::with_mode(mode);
    for (i, colors) in Colors::ALL.into_iter().enumerate() {
        if i == 8 {
            out = out.new_line();
        }
        out = out
            .background(colors.into())
            .text(format_args!(" {:>2} ", colors.fg_code()))
            .reset();
    }
    out.build()
}

fn named(mode: ColorMode) -> Result<String> {
    let mut out = StyleBuilder::with_mode(mode);
    for name in NAMED {
        let color = Color::from_name(name)?;
        let hex = color.to_hex().unwrap_or_default();
        out = out
            .foreground(color)
            .text(format_args!("{name:<12}"))
            .reset()
            .text(format_args!(" #{hex}"))
            .new_line();
    }
    Ok(out.build())
}

fn table(mode: ColorMode) -> String {
    let mut out = StyleBuilder::with_mode(mode);
    for row in (16u8..=231).collect::<Vec<_>>().chunks(36) {
        for &index in row {
            out = out.background(Color::Table(index)).text(' ');
        }
        out = out.reset().new_line();
    }
    for index in 232u8..=255 {
        out = out.background(Color::Table(index)).text("  ");
    }
    out.reset().new_line().build()
}

fn gradient(mode: ColorMode) -> String {
    let mut out = StyleBuilder::with_mode(mode);
    for step in 0..GRADIENT_STEPS {
        let t = step * 255 / (GRADIENT_STEPS - 1);
        let r = u8::try_from(t).unwrap_or(u8::MAX);
        out = out.background(Color::rgb(r, 64, 255 - r)).text(' ');
    }
    out.reset().build()
}

fn attributes(mode: ColorMode) -> String {
    StyleBuilder::with_mode(mode)
        .bold(true)
        .text("bold")
        .bold(false)
        .text(' ')
        .faint(true)
        .text("faint")
        .faint(false)
        .text(' ')
        .italic(true)
        .text("italic")
        .italic(false)
        .text(' ')
        .underline(true)
        .text("underline")
        .underline(false)
        .text(' ')
        .double_underline(true)
        .text("double")
        .double_underline(false)
        .text(' ')
        .blink(true)
        .text("blink")
        .blink(false)
        .text(' ')
        .inverse(true)
        .text("inverse")
        .inverse(false)
        .text(' ')
        .strikethrough(true)
        .text("strikethrough")
        .strikethrough(false)
        .text(" [")
        .invisible(true)
        .text("invisible")
        .invisible(false)
        .text(']')
        .build()
}
