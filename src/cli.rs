//! Command line arguments.
use crate::commands::DumpOptions;
use clap::{ArgAction, Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

/// Dump the DWARF debugging information in ELF files
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Dump .debug_abbrev
    #[arg(short, long)]
    pub abbrev: bool,

    /// Dump .debug_info
    #[arg(short, long)]
    pub info: bool,

    /// Dump .debug_str
    #[arg(short, long)]
    pub strings: bool,

    /// List the section headers
    #[arg(short = 'S', long)]
    pub sections: bool,

    /// Add column titles to tables
    #[arg(short, long)]
    pub titles: bool,

    /// Explain what the fields in a dump mean
    #[arg(short, long)]
    pub explain: bool,

    /// When to style output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Log decoding progress to stderr, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// ELF files to dump
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ColorMode {
    /// Style output if stdout is a terminal
    Auto,

    /// Always style output
    Always,

    /// Never style output
    Never,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColorMode::Auto => fmt.write_str("auto")?,
            ColorMode::Always => fmt.write_str("always")?,
            ColorMode::Never => fmt.write_str("never")?,
        }
        Ok(())
    }
}

impl Cli {
    /// With no dump selected .debug_abbrev, .debug_info, and .debug_str are all dumped.
    pub fn dump_options(&self) -> DumpOptions {
        let nothing = !(self.abbrev || self.info || self.strings || self.sections);
        DumpOptions {
            abbrev: self.abbrev || nothing,
            info: self.info || nothing,
            strings: self.strings || nothing,
            sections: self.sections,
            titles: self.titles,
            explain: self.explain,
        }
    }

    /// The tracing filter used when RUST_LOG isn't set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
