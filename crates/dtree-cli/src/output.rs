use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// `ok: ...` / `error: ...` with a colored tag when stdout is a terminal.
pub fn status(ok: bool, msg: &str) -> anyhow::Result<()> {
    let mut out = stdout();
    let (tag, color) = if ok { ("ok", Color::Green) } else { ("error", Color::Red) };

    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{tag}")?;
    out.reset()?;
    writeln!(out, ": {msg}")?;
    Ok(())
}

pub fn line(msg: &str) {
    let _ = writeln!(io::stdout(), "{msg}");
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}
