use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use common::persist::write_index;
use common::PageDir;
use indexer::{build_index, BuildOptions};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an inverted index from a crawler page directory", long_about = None)]
struct Cli {
    /// Directory produced by the crawler (must contain a .crawler file)
    page_directory: PathBuf,
    /// Index file to create or overwrite
    index_filename: PathBuf,
    /// Shortest word length that gets indexed
    #[arg(long, default_value_t = 3)]
    min_word_len: usize,
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

    let pages = PageDir::new(&cli.page_directory);
    let out = match open_args(&pages, &cli) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("indexer: {e:#}");
            return ExitCode::from(2);
        }
    };
    match run(&pages, out, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("indexer: {e:#}");
            ExitCode::from(3)
        }
    }
}

/// Check the page directory and create the index file before any scanning.
fn open_args(pages: &PageDir, cli: &Cli) -> Result<File> {
    pages.validate()?;
    File::create(&cli.index_filename)
        .with_context(|| format!("cannot write index file {}", cli.index_filename.display()))
}

fn run(pages: &PageDir, out: File, cli: &Cli) -> Result<()> {
    let opts = BuildOptions { min_word_len: cli.min_word_len };
    let index = build_index(pages, &opts)?;
    let mut out = BufWriter::new(out);
    write_index(&index, &mut out)
        .and_then(|()| out.flush())
        .with_context(|| format!("writing {}", cli.index_filename.display()))?;
    tracing::info!(output = %cli.index_filename.display(), words = index.len(), "index build complete");
    Ok(())
}
