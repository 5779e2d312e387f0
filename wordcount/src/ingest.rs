//! Streaming a text source into a [`WordCounter`].

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use crate::counter::WordCounter;
use crate::error::IngestError;

/// Progress of an ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Lines read.
    pub lines: usize,
    /// Words counted.
    pub words: usize,
}

/// Counts every word of the file at `path`.
///
/// On error, the words read so far remain in `counter`.
pub fn ingest_file(path: impl AsRef<Path>, counter: &WordCounter) -> Result<IngestReport, IngestError> {
    let path = path.as_ref();
    let open_err = |source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    };

    if !fs::metadata(path).map_err(open_err)?.is_file() {
        return Err(IngestError::NotAFile(path.to_path_buf()));
    }
    let file = File::open(path).map_err(open_err)?;

    info!(path = %path.display(), "file ingestion started");
    let report = match ingest_reader(BufReader::new(file), counter) {
        Ok(report) => report,
        Err(err) => {
            warn!(path = %path.display(), %err, "file ingestion stopped early");
            return Err(err);
        }
    };
    info!(
        path = %path.display(),
        lines = report.lines,
        words = report.words,
        unique = counter.unique_words(),
        "file ingestion finished"
    );
    Ok(report)
}

/// Counts every word read from `reader`, line by line.
///
/// Line breaks are separators, so no word spans two lines. Bytes that are not
/// valid UTF-8 decode to U+FFFD, which is not a letter, so they split words
/// instead of ending the run. Only I/O failures stop ingestion.
pub fn ingest_reader<R: BufRead>(mut reader: R, counter: &WordCounter) -> Result<IngestReport, IngestError> {
    let mut report = IngestReport::default();
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => return Ok(report),
            Ok(_) => {
                report.lines += 1;
                report.words += counter.ingest_text(&String::from_utf8_lossy(&line));
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(IngestError::Read {
                    ingested: report,
                    source,
                })
            }
        }
    }
}
