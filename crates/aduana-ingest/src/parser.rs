//! Positional extract parser
//!
//! Customs extracts are semicolon-delimited text files without a header row,
//! encoded in a legacy single-byte charset, with decimal commas. Only five
//! columns are read, by zero-based position:
//!
//! ```text
//! col  0   declaration date (DDMMYYYY, leading zero sometimes lost)
//! col 14   region code
//! col 20   destination country
//! col 69   product (HS) code
//! col 73   FOB value
//! ```

use aduana_common::ExportRecord;
use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{Encoding, WINDOWS_1252};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::normalize::{
    normalize_product_code, parse_declaration_date, parse_fob_value, region_name, year_month,
};

pub const DATE_COLUMN: usize = 0;
pub const REGION_COLUMN: usize = 14;
pub const COUNTRY_COLUMN: usize = 20;
pub const PRODUCT_COLUMN: usize = 69;
pub const FOB_COLUMN: usize = 73;

/// Records shorter than this cannot hold every extracted column
pub const MIN_FIELDS: usize = FOB_COLUMN + 1;

/// The five extracted columns of one source record, untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub date: String,
    pub region_code: String,
    pub destination_country: String,
    pub product_code: String,
    pub fob_value: String,
}

impl RawRow {
    /// Pick the extracted columns out of a full record
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        Some(Self {
            date: record.get(DATE_COLUMN)?.to_string(),
            region_code: record.get(REGION_COLUMN)?.to_string(),
            destination_country: record.get(COUNTRY_COLUMN)?.to_string(),
            product_code: record.get(PRODUCT_COLUMN)?.to_string(),
            fob_value: record.get(FOB_COLUMN)?.to_string(),
        })
    }

    /// Normalize into an [`ExportRecord`], `None` if the row is malformed
    pub fn normalize(&self) -> Option<ExportRecord> {
        let date = parse_declaration_date(&self.date)?;
        let (year, month) = year_month(date);
        let product_code = normalize_product_code(&self.product_code)?;
        let fob_value = parse_fob_value(&self.fob_value)?;

        Some(ExportRecord {
            year,
            month,
            region_name: region_name(&self.region_code),
            destination_country: self.destination_country.clone(),
            product_code,
            fob_value,
        })
    }
}

/// Result of parsing one extract
#[derive(Debug, Clone, Default)]
pub struct ParsedExtract {
    pub records: Vec<ExportRecord>,
    /// Source rows seen (blank lines excluded)
    pub rows_read: usize,
    /// Rows dropped as malformed
    pub rows_dropped: usize,
}

/// Parser for semicolon-delimited positional extracts
#[derive(Debug, Clone)]
pub struct ExtractParser {
    delimiter: u8,
    encoding: &'static Encoding,
    /// Maximum number of rows to read (None for unlimited)
    parse_limit: Option<usize>,
}

impl Default for ExtractParser {
    fn default() -> Self {
        Self {
            delimiter: b';',
            encoding: WINDOWS_1252,
            parse_limit: None,
        }
    }
}

impl ExtractParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after `limit` source rows
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.parse_limit = Some(limit);
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Decode raw file bytes and parse them
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedExtract> {
        let text = self.decode(bytes)?;
        self.parse_str(&text)
    }

    /// Decode file bytes using the configured charset
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
        if had_errors {
            return Err(IngestError::Decode {
                encoding: self.encoding.name(),
            });
        }
        Ok(text.into_owned())
    }

    /// Parse already-decoded extract text.
    ///
    /// The first record fixes the layout: if it has too few fields the file
    /// does not match the positional schema and fails. Later short records
    /// and rows with unrepairable values are counted and dropped.
    pub fn parse_str(&self, content: &str) -> Result<ParsedExtract> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut parsed = ParsedExtract::default();
        let mut record = StringRecord::new();
        let mut lines = LineCounter::new(content);

        while reader.read_record(&mut record)? {
            let line = record
                .position()
                .map(|p| lines.line_at(p.byte() as usize))
                .unwrap_or(0);

            if record.len() == 1 && record.get(0).is_some_and(|f| f.trim().is_empty()) {
                continue;
            }

            if let Some(limit) = self.parse_limit {
                if parsed.rows_read >= limit {
                    debug!("Reached parse limit of {} rows", limit);
                    break;
                }
            }

            let first = parsed.rows_read == 0;
            parsed.rows_read += 1;

            let Some(raw) = RawRow::from_record(&record) else {
                if first {
                    return Err(IngestError::Schema {
                        line: line as u64,
                        expected: MIN_FIELDS,
                        found: record.len(),
                    });
                }
                parsed.rows_dropped += 1;
                debug!(line, fields = record.len(), "Dropping short row");
                continue;
            };

            match raw.normalize() {
                Some(export) => parsed.records.push(export),
                None => {
                    parsed.rows_dropped += 1;
                    debug!(line, date = %raw.date, product = %raw.product_code, "Dropping malformed row");
                },
            }
        }

        Ok(parsed)
    }
}

/// Maps record start offsets to 1-based line numbers.
///
/// Only `\n` is counted, so CRLF and LF input agree. Line terminators at the
/// offset belong to skipped blank lines and are stepped over. Offsets must be
/// queried in increasing order.
struct LineCounter<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            bytes: content.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, byte: usize) -> usize {
        let mut end = byte.min(self.bytes.len());
        while end < self.bytes.len() && matches!(self.bytes[end], b'\r' | b'\n') {
            end += 1;
        }
        if end > self.offset {
            self.line += self.bytes[self.offset..end].iter().filter(|&&b| b == b'\n').count();
            self.offset = end;
        }
        self.line
    }
}
