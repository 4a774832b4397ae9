//! Main decoder API
//!
//! This module provides the primary interface for the decoder library.
//! The Decoder struct owns the registries and decodes single lines or
//! whole log files.

use crate::registry::{Registry, RegistryStats};
use crate::types::{DecodedEvent, DecodedLine, DecoderError, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Number of characters in the binary time field
pub const TIME_FIELD_LEN: usize = 13;

/// Lines shorter than this are passed through unchanged
pub const MIN_RECORD_LEN: usize = 15;

/// The main decoder struct - entry point for all decoding operations
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    registry: Registry,
}

impl Decoder {
    /// Create a new decoder instance
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Decode a single line into its display form
    ///
    /// Lines shorter than 15 characters are returned unchanged. The only
    /// failure is a time field containing something other than `0`/`1`.
    ///
    /// # Example
    /// ```
    /// use vex_log_decoder::Decoder;
    ///
    /// let decoder = Decoder::new();
    /// assert_eq!(
    ///     decoder.decode_line("0000000000000Q9XYZ").unwrap(),
    ///     "(0000000000000Q9XYZ) 0.00s UNKNOWN 9 XYZ"
    /// );
    /// assert_eq!(decoder.decode_line("ABC").unwrap(), "ABC");
    /// ```
    pub fn decode_line(&self, raw: &str) -> Result<String> {
        Ok(self.decode_record(raw)?.to_string())
    }

    /// Decode a single line into its structured form
    ///
    /// Returns `DecodedLine::Event` or `DecodedLine::PassThrough`, never
    /// `DecodedLine::Invalid` (that variant only appears in batch output).
    pub fn decode_record(&self, raw: &str) -> Result<DecodedLine> {
        if raw.chars().count() < MIN_RECORD_LEN {
            return Ok(DecodedLine::PassThrough { raw: raw.to_string() });
        }

        // Byte offset of the device letter; the length check above guarantees it exists
        let device_at = raw
            .char_indices()
            .nth(TIME_FIELD_LEN)
            .map(|(idx, _)| idx)
            .unwrap_or(raw.len());

        let (time_field, rest) = raw.split_at(device_at);
        let time_hundredths = parse_time_field(time_field)?;

        let mut rest_chars = rest.chars();
        let device_code = match rest_chars.next() {
            Some(c) => c,
            None => return Ok(DecodedLine::PassThrough { raw: raw.to_string() }),
        };
        let rest = rest_chars.as_str();

        let port_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (port, action_code) = rest.split_at(port_len);

        Ok(DecodedLine::Event(DecodedEvent {
            raw: raw.to_string(),
            time_hundredths,
            device_code,
            device: self.registry.device_name_or_unknown(device_code).to_string(),
            port: port.to_string(),
            action_code: action_code.to_string(),
            action: self.registry.action_description_or_code(action_code).to_string(),
        }))
    }

    /// Decode a log file into display lines, in file order
    ///
    /// Blank and whitespace-only lines are skipped. A line that fails to
    /// decode is replaced by a marked placeholder and decoding continues.
    /// If the file cannot be opened or read, no lines are returned.
    ///
    /// # Example
    /// ```no_run
    /// use vex_log_decoder::Decoder;
    /// use std::path::Path;
    ///
    /// let decoder = Decoder::new();
    /// for line in decoder.decode_file(Path::new("V:/run1.txt")).unwrap() {
    ///     println!("{}", line);
    /// }
    /// ```
    pub fn decode_file(&self, path: &Path) -> Result<Vec<String>> {
        let records = self.decode_file_records(path)?;
        Ok(records.iter().map(ToString::to_string).collect())
    }

    /// Decode a log file into structured lines, in file order
    ///
    /// Same batch rules as [`Decoder::decode_file`]; isolated failures are
    /// returned as `DecodedLine::Invalid`.
    pub fn decode_file_records(&self, path: &Path) -> Result<Vec<DecodedLine>> {
        let file_access = |source: io::Error| DecoderError::FileAccess {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(file_access)?;
        self.decode_reader(BufReader::new(file)).map_err(file_access)
    }

    /// Decode every non-blank line from a reader, in order
    ///
    /// A read error aborts the whole batch.
    pub fn decode_reader<R: BufRead>(&self, reader: R) -> io::Result<Vec<DecodedLine>> {
        let mut decoded = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            decoded.push(self.decode_isolated(line));
        }

        Ok(decoded)
    }

    /// Get statistics about the loaded registries
    pub fn registry_stats(&self) -> RegistryStats {
        self.registry.stats()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn decode_isolated(&self, line: String) -> DecodedLine {
        match self.decode_record(&line) {
            Ok(decoded) => decoded,
            Err(e) => DecodedLine::Invalid {
                reason: e.to_string(),
                raw: line,
            },
        }
    }
}

/// Parse the 13-character binary time field into hundredths of a second
fn parse_time_field(field: &str) -> Result<u16> {
    let invalid = || DecoderError::InvalidTimeField {
        field: field.to_string(),
    };

    let mut value: u16 = 0;
    for b in field.bytes() {
        let bit = match b {
            b'0' => 0,
            b'1' => 1,
            _ => return Err(invalid()),
        };
        value = (value << 1) | bit;
    }

    Ok(value)
}
