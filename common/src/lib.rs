pub mod counters;
pub mod error;
pub mod index;
pub mod pagedir;
pub mod persist;
pub mod tokenizer;

pub use counters::Counters;
pub use error::{Error, Result};
pub use index::InvertedIndex;
pub use pagedir::{PageDir, PageRecord};

/// Sequential page identifier, starting at 1 within one crawl.
pub type DocId = u32;
