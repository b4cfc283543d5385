pub mod styles;

pub use styles::*;

use std::error::Error;
use std::io::{self, Write};

pub fn require(predicate: bool, err: &str) -> Result<(), Box<dyn Error>> {
    if predicate { Ok(()) } else { Err(err.into()) }
}

pub fn warn(mesg: &str) {
    let _ = warn_to(io::stderr(), mesg);
}

/// Like warn but writes to `out`, which is normally stderr.
pub fn warn_to(mut out: impl Write, mesg: &str) -> io::Result<()> {
    writeln!(out, "{}", mesg.warn())
}

pub fn explain(mut out: impl Write, title: &str, text: &str) -> io::Result<()> {
    writeln!(out, "{}: {}", title.explain_title(), text.explain_text())
}

/// Remove escape sequences from the string (e.g. for colors).
#[cfg(test)]
pub fn strip_escapes(s: &str) -> String {
    // Tests normally run with styling off but tabled may still add resets at
    // line ends.
    let mut result = String::with_capacity(s.len());
    let mut escaping = false;

    // See https://gist.github.com/fnky/458719343aabd01cfb17a3a4f7296797
    for c in s.chars() {
        if c == '\x1b' {
            escaping = true;
        } else if escaping {
            if c == 'm' {
                escaping = false;
            }
        } else {
            result.push(c);
        }
    }
    result
}

// macro so insta crate uses a sensible name for the snapshot
#[cfg(test)]
macro_rules! do_test {
    ($bytes:expr, $options:expr, @$snapshot:literal) => {
        let mut v: Vec<u8> = Vec::new();
        let mut diagnostics: Vec<u8> = Vec::new();
        let _ = crate::commands::dump_image(&mut v, &mut diagnostics, &$bytes, &$options)
            .unwrap();
        assert_eq!(String::from_utf8(diagnostics).unwrap(), "");

        let s = String::from_utf8(v).unwrap();
        let s = crate::utils::strip_escapes(&s);
        insta::assert_snapshot!(s, @$snapshot);
    };
}
#[cfg(test)]
pub(crate) use do_test;
