//! Line-oriented index file format.
//!
//! One line per word: the word, then `docID count ` for every document it
//! occurs in, then a newline:
//!
//! ```text
//! dartmouth 1 3 4 1
//! computer 2 7
//! ```
//!
//! Line order and pair order follow hash map iteration and carry no meaning.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::{Counters, DocId, InvertedIndex};

pub fn write_index<W: Write>(index: &InvertedIndex, out: &mut W) -> std::io::Result<()> {
    for (word, counters) in index.iter() {
        write!(out, "{word} ")?;
        for (doc_id, count) in counters.iter() {
            write!(out, "{doc_id} {count} ")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Stands in for a file name when reading from an anonymous stream.
const STREAM: &str = "<stream>";

/// Parse an index file. Words are taken verbatim; no re-normalization or
/// length filtering is applied.
pub fn read_index<R: BufRead>(input: R) -> Result<InvertedIndex> {
    read_index_from(input, Path::new(STREAM))
}

fn read_index_from<R: BufRead>(input: R, path: &Path) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::new();
    let mut seen: HashSet<String> = HashSet::new();
    for (i, line) in input.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|e| Error::io(path, e))?;
        let mut tokens = line.split_ascii_whitespace();
        let Some(word) = tokens.next() else { continue };
        if !seen.insert(word.to_string()) {
            return Err(Error::malformed_index(line_no, format!("duplicate word {word:?}")));
        }
        let counters = parse_pairs(tokens, line_no)?;
        if counters.is_empty() {
            return Err(Error::malformed_index(line_no, format!("word {word:?} has no documents")));
        }
        index.insert(word.to_string(), counters);
    }
    Ok(index)
}

fn parse_pairs<'a>(mut tokens: impl Iterator<Item = &'a str>, line_no: usize) -> Result<Counters> {
    let mut counters = Counters::new();
    while let Some(doc_token) = tokens.next() {
        let Some(count_token) = tokens.next() else {
            return Err(Error::malformed_index(line_no, format!("document {doc_token} has no count")));
        };
        let doc_id: DocId = doc_token
            .parse()
            .map_err(|_| Error::malformed_index(line_no, format!("bad document id {doc_token:?}")))?;
        let count: u32 = count_token
            .parse()
            .map_err(|_| Error::malformed_index(line_no, format!("bad count {count_token:?}")))?;
        counters.set(doc_id, count);
    }
    Ok(counters)
}

/// Write `index` to `path`, creating or truncating it.
pub fn save_index(index: &InvertedIndex, path: &Path) -> Result<()> {
    let f = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(f);
    write_index(index, &mut out).map_err(|e| Error::io(path, e))?;
    out.flush().map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), words = index.len(), "index saved");
    Ok(())
}

pub fn load_index(path: &Path) -> Result<InvertedIndex> {
    let f = File::open(path).map_err(|e| Error::io(path, e))?;
    let index = read_index_from(BufReader::new(f), path)?;
    tracing::info!(path = %path.display(), words = index.len(), "index loaded");
    Ok(index)
}
