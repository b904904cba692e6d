//! User-facing console messages.
//! Tagged lines ("info:", "warn:", ...) are colored only when the target stream
//! is a terminal; report lines are always plain.

use owo_colors::{AnsiColors, OwoColorize};

#[derive(Clone, Copy)]
enum Stream {
    Out,
    Err,
}

/// `tag` followed by `msg`, with the tag bold and colored when `color` is set.
fn tagged(tag: &str, tint: AnsiColors, msg: &str, color: bool) -> String {
    if color {
        format!("{} {msg}", tag.color(tint).bold())
    } else {
        format!("{tag} {msg}")
    }
}

fn emit(stream: Stream, tag: &str, tint: AnsiColors, msg: &str) {
    match stream {
        Stream::Out => println!("{}", tagged(tag, tint, msg, atty::is(atty::Stream::Stdout))),
        Stream::Err => eprintln!("{}", tagged(tag, tint, msg, atty::is(atty::Stream::Stderr))),
    }
}

pub fn print_info(msg: &str) {
    emit(Stream::Out, "info:", AnsiColors::Cyan, msg);
}

pub fn print_warn(msg: &str) {
    emit(Stream::Err, "warn:", AnsiColors::Yellow, msg);
}

pub fn print_error(msg: &str) {
    emit(Stream::Err, "error:", AnsiColors::Red, msg);
}

pub fn print_success(msg: &str) {
    emit(Stream::Out, "ok:", AnsiColors::Green, msg);
}

/// Print a plain report line (no prefix, no color). The folder report and the
/// closing summary go through here so they can be redirected and scripted against.
pub fn print_user(msg: &str) {
    println!("{msg}");
}
