mod cli;
mod commands;
mod debug;
mod elf;
#[cfg(test)]
mod test_util;
mod utils;

use clap::Parser;
use cli::{Cli, ColorMode};
use commands::DumpOptions;
use elf::ElfHeader;
use memmap2::Mmap;
use std::error::Error;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use utils::{Styling, init_styles, require, warn};

/// Maps the file and dumps it. The mapping is released when this returns.
fn dump_file(
    out: &mut impl Write,
    path: &Path,
    options: &DumpOptions,
) -> Result<bool, Box<dyn Error>> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    require(
        size >= ElfHeader::min_size(false) as u64,
        "file too small to be ELF",
    )?;
    require(usize::try_from(size).is_ok(), "file too big to fit memory")?;

    // This is unsafe because it has undefined behavior if the underlying file is
    // modified while the memory map is in use.
    let map = unsafe { Mmap::map(&file) }?;
    debug!("mapped {} ({size} bytes)", path.display());
    Ok(commands::dump_image(out, &mut io::stderr(), &map, options)?)
}

fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let styled = match cli.color {
        ColorMode::Auto => io::stdout().is_terminal(),
        ColorMode::Always => true,
        ColorMode::Never => false,
    };
    init_styles(styled);
    init_logging(&cli);

    let options = cli.dump_options();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = false;
    for (i, path) in cli.files.iter().enumerate() {
        if cli.files.len() > 1 {
            let heading = format!("{}:", path.display());
            let sep = if i > 0 { "\n" } else { "" };
            if writeln!(out, "{sep}{}", heading.heading()).is_err() {
                process::exit(1);
            }
        }
        match dump_file(&mut out, path, &options) {
            Ok(ok) => failed |= !ok,
            Err(err) => {
                warn(&format!("{}: {err}", path.display()));
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}
