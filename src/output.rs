//! User-facing lines for the `road` binary.
//!
//! Two kinds of output:
//! - status lines (`ok:`, `warn:`, `error:`) for people, coloured on a TTY;
//! - plain records (`print_user`, `print_field`) for scripts, one per line,
//!   tab-separated, never prefixed.

use owo_colors::{OwoColorize, Style};
use std::fmt::Display;

#[derive(Clone, Copy)]
enum Stream {
    Out,
    Err,
}

impl Stream {
    fn is_tty(self) -> bool {
        match self {
            Stream::Out => atty::is(atty::Stream::Stdout),
            Stream::Err => atty::is(atty::Stream::Stderr),
        }
    }

    fn emit(self, line: &str) {
        match self {
            Stream::Out => println!("{line}"),
            Stream::Err => eprintln!("{line}"),
        }
    }
}

/// `<tag> <msg>`, with the tag styled only when the stream is a terminal.
fn status(stream: Stream, tag: &str, style: Style, msg: &str) {
    let line = if stream.is_tty() {
        format!("{} {msg}", tag.style(style))
    } else {
        format!("{tag} {msg}")
    };
    stream.emit(&line);
}

pub fn print_warn(msg: &str) {
    status(Stream::Err, "warn:", Style::new().yellow().bold(), msg);
}

pub fn print_error(msg: &str) {
    status(Stream::Err, "error:", Style::new().red().bold(), msg);
}

pub fn print_success(msg: &str) {
    status(Stream::Out, "ok:", Style::new().green().bold(), msg);
}

/// Plain line with no prefix (listings, resolved paths).
pub fn print_user(msg: &str) {
    Stream::Out.emit(msg);
}

/// One `key<TAB>value` record. The key is dimmed on a terminal; piped output
/// stays byte-for-byte `key\tvalue`.
pub fn print_field(key: &str, value: impl Display) {
    let line = if Stream::Out.is_tty() {
        format!("{}\t{value}", key.dimmed())
    } else {
        format!("{key}\t{value}")
    };
    Stream::Out.emit(&line);
}
