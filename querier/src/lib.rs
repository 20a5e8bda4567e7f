pub mod query;

use anyhow::{Context, Result};
use common::{Counters, DocId, InvertedIndex, PageDir};
use serde::Serialize;
use std::io::{BufRead, Write};

pub use query::{Query, QueryError, Token};

pub const PROMPT: &str = "Query? ";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchHit {
    pub score: u32,
    pub doc_id: DocId,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Print a prompt before reading each line.
    pub prompt: bool,
    /// Emit hits as JSON objects instead of `Score:` lines.
    pub json: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { prompt: true, json: false }
    }
}

/// Score every document against `query`.
///
/// Each and-run scores a document by the smallest count among its terms, and
/// only documents holding every term of the run count at all. Run scores
/// are then summed across `or` branches.
pub fn evaluate(query: &Query, index: &InvertedIndex) -> Counters {
    let empty = Counters::new();
    query.runs().into_iter().fold(Counters::new(), |total, run| {
        let mut terms = run.into_iter().map(|word| index.get(word).unwrap_or(&empty));
        let run_scores = match terms.next() {
            Some(first) => terms.fold(first.clone(), |acc, next| acc.intersect(next)),
            None => Counters::new(),
        };
        total.union(&run_scores)
    })
}

/// Drains a score map highest-first.
///
/// Each step scans for the largest remaining count, yields it, and zeroes
/// it. Ties go to whichever entry the scan meets first, which depends on
/// hash order and is not stable between runs.
pub struct Ranking {
    scores: Counters,
}

impl Ranking {
    pub fn new(scores: Counters) -> Self {
        Self { scores }
    }
}

impl Iterator for Ranking {
    type Item = (DocId, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let mut best: Option<(DocId, u32)> = None;
        self.scores.for_each(|doc_id, count| {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((doc_id, count));
            }
        });
        let (doc_id, _) = best?;
        self.scores.set(doc_id, 0);
        best
    }
}

/// Print `scores` in ranked order, looking each URL up in `pages`.
/// Returns the number of hits printed.
pub fn print_ranked<W: Write>(scores: Counters, pages: &PageDir, out: &mut W, opts: &SessionOptions) -> Result<usize> {
    let mut printed = 0;
    for (doc_id, score) in Ranking::new(scores) {
        let url = pages.read_url(doc_id)?;
        let hit = SearchHit { score, doc_id, url };
        if opts.json {
            writeln!(out, "{}", serde_json::to_string(&hit)?)?;
        } else {
            writeln!(out, "Score:{}  DocID:{}  URL:{}", hit.score, hit.doc_id, hit.url)?;
        }
        printed += 1;
    }
    if printed == 0 {
        writeln!(out, "No documents match")?;
    }
    Ok(printed)
}

/// Answer queries from `input` until it runs dry.
///
/// Malformed queries print `Bad Query` and the session carries on; a
/// missing page record or a failed write ends it with an error.
pub fn run_session<R: BufRead, W: Write>(
    index: &InvertedIndex,
    pages: &PageDir,
    mut input: R,
    out: &mut W,
    opts: &SessionOptions,
) -> Result<()> {
    let mut raw = Vec::new();
    loop {
        if opts.prompt {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        raw.clear();
        if input.read_until(b'\n', &mut raw).context("reading query")? == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD and fail the letters-only check.
        let line = String::from_utf8_lossy(&raw);
        match Query::parse(&line) {
            Ok(None) => {}
            Ok(Some(query)) => {
                writeln!(out, "Query: {query}")?;
                let scores = evaluate(&query, index);
                let hits = print_ranked(scores, pages, out, opts)?;
                tracing::debug!(%query, hits, "query answered");
            }
            Err(e) => {
                tracing::debug!(error = %e, "rejected query");
                writeln!(out, "Bad Query")?;
            }
        }
        out.flush()?;
    }
    if opts.prompt {
        writeln!(out)?;
    }
    Ok(())
}
