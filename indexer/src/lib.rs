use common::tokenizer::{normalize_word, words};
use common::{DocId, InvertedIndex, PageDir, PageRecord, Result};

/// Knobs for one index build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Words shorter than this are not indexed.
    pub min_word_len: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { min_word_len: 3 }
    }
}

/// Scan pages `1`, `2`, ... of `pages` until the first one that cannot be
/// opened, indexing every word of each.
///
/// A page that cannot be parsed is skipped but still uses up its id.
pub fn build_index(pages: &PageDir, opts: &BuildOptions) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::new();
    let mut doc_id: DocId = 1;
    let mut skipped = 0usize;
    loop {
        match pages.load(doc_id) {
            Ok(Some(page)) => index_page(&mut index, &page, doc_id, opts),
            Ok(None) => break,
            Err(e @ common::Error::MalformedPage { .. }) => {
                tracing::warn!(doc_id, error = %e, "skipping page");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
        doc_id += 1;
    }
    let num_docs = doc_id - 1;
    tracing::info!(num_docs, skipped, num_words = index.len(), dir = %pages.root().display(), "ingested pages");
    Ok(index)
}

/// Add every long-enough word of `page` to `index` under `doc_id`.
pub fn index_page(index: &mut InvertedIndex, page: &PageRecord, doc_id: DocId, opts: &BuildOptions) {
    let mut added = 0usize;
    for word in words(&page.html) {
        if word.len() < opts.min_word_len {
            continue;
        }
        index.add_occurrence(&normalize_word(word), doc_id);
        added += 1;
    }
    tracing::debug!(doc_id, url = %page.url, words = added, "indexed page");
}
