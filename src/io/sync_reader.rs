//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over preview requests from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<PreviewRequest, String>` for each CSV row:
//!
//! ```no_run
//! use dinary_fees::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("requests.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(request) => println!("Previewing: {:?}", request),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the
//!   iterator, with line numbers for debugging
//!
//! # Memory Efficiency
//!
//! The reader streams: one record at a time, memory usage independent of
//! file size.

use crate::io::csv_format::{convert_request_record, RequestCsvRecord};
use crate::types::PreviewRequest;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader over preview requests
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// Opens the CSV file and prepares it for streaming iteration.
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<PreviewRequest, String>;

    /// Get the next preview request from the CSV file
    ///
    /// Deserializes the next record and converts it to a domain request.
    /// Parse and conversion failures are yielded as `Err` with the line
    /// number so the pipeline can log and continue.
    fn next(&mut self) -> Option<Self::Item> {
        self.line_num += 1;
        // Line 1 is the header row
        let line = self.line_num + 1;

        let mut record_iter = self.reader.deserialize::<RequestCsvRecord>();
        match record_iter.next()? {
            Ok(record) => Some(
                convert_request_record(record).map_err(|e| format!("Line {}: {}", line, e)),
            ),
            Err(e) => Some(Err(format!("Line {}: {}", line, e))),
        }
    }
}
