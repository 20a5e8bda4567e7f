use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use common::persist::load_index;
use common::{InvertedIndex, PageDir};
use querier::{run_session, SessionOptions};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "querier")]
#[command(about = "Answer and/or queries against an index built by the indexer", long_about = None)]
struct Args {
    /// Directory produced by the crawler (must contain a .crawler file)
    page_directory: PathBuf,
    /// Index file written by the indexer for that directory
    index_filename: PathBuf,
    /// Do not print a prompt before each query
    #[arg(long, default_value_t = false)]
    no_prompt: bool,
    /// Print each hit as a JSON object
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    let pages = PageDir::new(&args.page_directory);
    let index = match load(&pages, &args) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("querier: {e:#}");
            return ExitCode::from(2);
        }
    };

    let opts = SessionOptions { prompt: !args.no_prompt, json: args.json };
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    match run_session(&index, &pages, stdin.lock(), &mut stdout, &opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("querier: {e:#}");
            ExitCode::from(3)
        }
    }
}

fn load(pages: &PageDir, args: &Args) -> Result<InvertedIndex> {
    pages.validate()?;
    load_index(&args.index_filename)
        .with_context(|| format!("cannot load index {}", args.index_filename.display()))
}
