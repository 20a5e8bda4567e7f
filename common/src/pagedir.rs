//! Page directories written by the crawler.
//!
//! Each fetched page lives in a file named by its document id (`1`, `2`, ...)
//! holding the URL on the first line, the crawl depth on the second and the
//! raw HTML after that. A `.crawler` file marks a directory the crawler
//! finished writing.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::DocId;

pub const COMPLETION_MARKER: &str = ".crawler";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: String,
    pub depth: u32,
    pub html: String,
}

impl PageRecord {
    pub fn new(url: impl Into<String>, depth: u32, html: impl Into<String>) -> Self {
        Self { url: url.into(), depth, html: html.into() }
    }

    /// Split a stored page into URL, depth and body.
    pub fn parse(doc_id: DocId, text: &str) -> Result<Self> {
        let (url, rest) = split_line(text);
        if url.is_empty() {
            return Err(Error::MalformedPage { doc_id, reason: "no URL line".into() });
        }
        let (depth_line, html) = split_line(rest);
        let depth = match depth_line.trim().parse() {
            Ok(depth) => depth,
            Err(_) => {
                tracing::warn!(doc_id, depth = depth_line, "unreadable crawl depth, using 0");
                0
            }
        };
        Ok(Self { url: url.to_string(), depth, html: html.to_string() })
    }
}

fn split_line(text: &str) -> (&str, &str) {
    match text.split_once('\n') {
        Some((line, rest)) => (line.strip_suffix('\r').unwrap_or(line), rest),
        None => (text, ""),
    }
}

#[derive(Debug, Clone)]
pub struct PageDir {
    root: PathBuf,
}

impl PageDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn marker(&self) -> PathBuf {
        self.root.join(COMPLETION_MARKER)
    }

    pub fn page_path(&self, doc_id: DocId) -> PathBuf {
        self.root.join(doc_id.to_string())
    }

    /// Drop the completion marker into the directory.
    pub fn init(&self) -> Result<()> {
        let marker = self.marker();
        File::create(&marker).map_err(|e| Error::io(marker, e))?;
        Ok(())
    }

    pub fn has_marker(&self) -> bool {
        self.marker().is_file()
    }

    /// Fail unless the directory carries the completion marker.
    pub fn validate(&self) -> Result<()> {
        if self.has_marker() {
            Ok(())
        } else {
            Err(Error::MissingCompletionMarker { dir: self.root.clone() })
        }
    }

    pub fn save(&self, page: &PageRecord, doc_id: DocId) -> Result<()> {
        let path = self.page_path(doc_id);
        let write = |path: &Path| -> io::Result<()> {
            let mut f = File::create(path)?;
            write!(f, "{}\n{}\n{}", page.url, page.depth, page.html)?;
            f.flush()
        };
        write(&path).map_err(|e| Error::io(path, e))
    }

    /// Load page `doc_id`, or `None` when its file cannot be opened.
    pub fn load(&self, doc_id: DocId) -> Result<Option<PageRecord>> {
        let path = self.page_path(doc_id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot open page record");
                return Ok(None);
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        PageRecord::parse(doc_id, &text).map(Some)
    }

    /// URL of page `doc_id`, read from the first line only.
    pub fn read_url(&self, doc_id: DocId) -> Result<String> {
        let path = self.page_path(doc_id);
        let f = File::open(&path).map_err(|source| Error::MissingPage { doc_id, dir: self.root.clone(), source })?;
        let mut line = Vec::new();
        BufReader::new(f).read_until(b'\n', &mut line).map_err(|e| Error::io(&path, e))?;
        let line = String::from_utf8_lossy(&line);
        let url = line.trim_end_matches(['\n', '\r']);
        if url.is_empty() {
            return Err(Error::MalformedPage { doc_id, reason: "no URL line".into() });
        }
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_three_fields() {
        let page = PageRecord::parse(1, "http://example.com/\n2\n<html>\nbody\n</html>").unwrap();
        assert_eq!(page.url, "http://example.com/");
        assert_eq!(page.depth, 2);
        assert_eq!(page.html, "<html>\nbody\n</html>");
    }

    #[test]
    fn parse_tolerates_missing_body_and_bad_depth() {
        let page = PageRecord::parse(4, "http://example.com/\nnope").unwrap();
        assert_eq!(page.depth, 0);
        assert_eq!(page.html, "");
    }

    #[test]
    fn parse_rejects_empty_record() {
        assert!(matches!(PageRecord::parse(9, ""), Err(Error::MalformedPage { doc_id: 9, .. })));
    }

    #[test]
    fn crlf_url_is_trimmed() {
        let page = PageRecord::parse(1, "http://example.com/\r\n0\r\n<p>x</p>").unwrap();
        assert_eq!(page.url, "http://example.com/");
        assert_eq!(page.depth, 0);
    }
}
