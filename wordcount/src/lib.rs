//! # wordcount
//!
//! Word-frequency counting backed by a [`keyed_trie::KeyedTrie`].
//!
//! A text source is split into runs of letters, each run is lowercased and
//! counted. Queries are lowercased the same way; a word never seen counts 0.
//!
//! ## Example
//!
//! ```rust
//! use wordcount::WordCounter;
//!
//! let counter = WordCounter::new();
//! counter.ingest_text("The cat sat. The dog sat!");
//!
//! assert_eq!(counter.count("The"), 2);
//! assert_eq!(counter.count("sat"), 2);
//! assert_eq!(counter.count("fish"), 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod counter;
pub mod error;
pub mod ingest;
pub mod serve;
pub mod words;

pub use config::Config;
pub use counter::{WordCount, WordCounter, WordQuery};
pub use error::{ConfigError, IngestError};
pub use ingest::{ingest_file, ingest_reader, IngestReport};
pub use words::{words, Words};
