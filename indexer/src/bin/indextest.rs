//! Reload an index file and write it back out, to check that the format
//! survives a read/write cycle.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use common::persist::{load_index, write_index};
use common::InvertedIndex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indextest")]
#[command(about = "Reload an index file and rewrite it", long_about = None)]
struct Cli {
    /// Index file produced by the indexer
    old_index_filename: PathBuf,
    /// Where to write the reloaded index
    new_index_filename: PathBuf,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    let (index, out) = match open_args(&cli) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("indextest: {e:#}");
            return ExitCode::from(2);
        }
    };
    match rewrite(&index, out, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("indextest: {e:#}");
            ExitCode::from(3)
        }
    }
}

/// Reload the old index, then create the new file. The old file is read in
/// full first so both names may point at the same file.
fn open_args(cli: &Cli) -> Result<(InvertedIndex, File)> {
    let index = load_index(&cli.old_index_filename)
        .with_context(|| format!("cannot reload {}", cli.old_index_filename.display()))?;
    let out = File::create(&cli.new_index_filename)
        .with_context(|| format!("cannot write index file {}", cli.new_index_filename.display()))?;
    Ok((index, out))
}

fn rewrite(index: &InvertedIndex, out: File, cli: &Cli) -> Result<()> {
    let mut out = BufWriter::new(out);
    write_index(index, &mut out)
        .and_then(|()| out.flush())
        .with_context(|| format!("writing {}", cli.new_index_filename.display()))?;
    tracing::info!(output = %cli.new_index_filename.display(), words = index.len(), "index rewritten");
    Ok(())
}
