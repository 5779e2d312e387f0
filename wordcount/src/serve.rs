//! Startup and query answering for the `wordcount` binary.

use std::io::{self, Write};

use tracing::{error, warn};

use crate::config::Config;
use crate::counter::{WordCounter, WordQuery};
use crate::ingest::ingest_file;

/// Builds the counter the queries are answered from.
///
/// Ingests `config.file_path` when one is set. Ingestion failures are logged
/// and never returned: whatever was counted before the failure is served, and
/// a file that could not be opened at all leaves every count at 0.
pub fn load(config: &Config) -> WordCounter {
    let counter = WordCounter::new();
    match &config.file_path {
        Some(path) => {
            if let Err(err) = ingest_file(path, &counter) {
                error!(%err, "ingestion failed, serving partial counts");
            }
        }
        None => warn!("no input file configured, every count will be 0"),
    }
    counter
}

/// Writes the answer for `word` as one line: `word<TAB>count`, or a JSON
/// object when `json` is set.
pub fn answer<W: Write>(out: &mut W, counter: &WordCounter, word: &str, json: bool) -> io::Result<()> {
    let result = counter.query(&WordQuery { word: word.to_owned() });
    if json {
        serde_json::to_writer(&mut *out, &result)?;
        writeln!(out)
    } else {
        writeln!(out, "{}\t{}", result.word, result.count)
    }
}
