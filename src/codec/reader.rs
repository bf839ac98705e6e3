//! Block decoder
//!
//! Reads a data file line by line and rebuilds records through the
//! [`Record`] trait. Decoding rules:
//!
//! - `end` completes the record in progress; it must have every field
//! - `name:[a,b]` is a list field, `name:a` a single field; the shape must
//!   match the schema
//! - fields must appear in schema order, each exactly once
//! - a trailing block without `end` is dropped silently, even if its last
//!   line is cut short
//!
//! The first malformed line that is followed by another line aborts the
//! decode. [`decode_prefix`] keeps the records read before it.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::errors::{CodecError, CodecResult, LineFault};
use super::record::{FieldValue, Record, Scalar};
use super::schema::{FieldSpec, Multiplicity};
use super::writer::END_MARKER;

/// Sequential reader over the blocks of one data file.
///
/// The file handle lives as long as the reader. A reader only moves
/// forward; to start over, open a new one.
pub struct RecordReader<R: Record> {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    /// 1-based number of the last line read
    line_number: usize,
    /// Set after the first error; the reader yields nothing more
    failed: bool,
    /// Set when end of file cut a block short
    partial_tail: bool,
    _record: PhantomData<R>,
}

impl<R: Record> RecordReader<R> {
    /// Opens a data file for decoding.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the file does not exist and `ReadFailure` for
    /// any other open error.
    pub fn open(path: &Path) -> CodecResult<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CodecError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CodecError::read_failure(path, e)
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_number: 0,
            failed: false,
            partial_tail: false,
            _record: PhantomData,
        })
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Whether the file ended inside a block. Appending to such a file
    /// would glue the new block onto the broken one.
    pub fn partial_tail(&self) -> bool {
        self.partial_tail
    }

    /// Reads the next complete record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` when an `end` line closes a block
    /// - `Ok(None)` at end of file, including after a trailing partial block
    /// - `Err(MalformedLine)` for the first line that breaks the format, once
    ///   the next line shows it is not a cut-off tail
    pub fn read_next(&mut self) -> CodecResult<Option<R>> {
        if self.failed {
            return Ok(None);
        }

        let result = self.read_block();
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    fn read_block(&mut self) -> CodecResult<Option<R>> {
        let schema = R::SCHEMA;
        let mut record = R::default();
        let mut seen = 0usize;
        // A bad line is only fatal once something follows it. A bad last
        // line is what an interrupted append leaves behind.
        let mut pending: Option<CodecError> = None;

        loop {
            let line = match self.lines.next() {
                Some(line) => line.map_err(|e| CodecError::read_failure(&self.path, e))?,
                None => {
                    if seen > 0 || pending.is_some() {
                        self.partial_tail = true;
                        tracing::debug!(
                            path = %self.path.display(),
                            fields = seen,
                            "dropping incomplete trailing block"
                        );
                    }
                    return Ok(None);
                }
            };
            self.line_number += 1;

            if let Some(err) = pending.take() {
                return Err(err);
            }

            // Accept files written with CRLF line endings.
            let line = line.strip_suffix('\r').unwrap_or(&line);

            if line == END_MARKER {
                if let Some(missing) = schema.fields.get(seen) {
                    return Err(self.malformed(line, LineFault::MissingField(missing.name.into())));
                }
                return Ok(Some(record));
            }

            let expected = schema.fields.get(seen);
            let decoded = decode_line::<R>(line, expected)
                .and_then(|(name, value)| record.set(name, value));
            match decoded {
                Ok(()) => seen += 1,
                Err(fault) => pending = Some(self.malformed(line, fault)),
            }
        }
    }

    fn malformed(&self, line: &str, fault: LineFault) -> CodecError {
        CodecError::malformed(self.line_number, line, fault)
    }
}

impl<R: Record> Iterator for RecordReader<R> {
    type Item = CodecResult<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

/// Parses one `name:value` line against the field expected at this point
/// of the block.
fn decode_line<'a, R: Record>(
    line: &'a str,
    expected: Option<&FieldSpec>,
) -> Result<(&'a str, FieldValue), LineFault> {
    let (name, raw) = line.split_once(':').ok_or(LineFault::MissingSeparator)?;

    let spec = R::SCHEMA
        .field(name)
        .ok_or_else(|| LineFault::UnknownField(name.to_string()))?;

    match expected {
        Some(expected) if expected.name == name => {}
        Some(expected) => {
            return Err(LineFault::UnexpectedField {
                expected: expected.name.to_string(),
                found: name.to_string(),
            })
        }
        None => {
            return Err(LineFault::UnexpectedField {
                expected: END_MARKER.to_string(),
                found: name.to_string(),
            })
        }
    }

    let bracketed = raw.len() >= 2 && raw.starts_with('[') && raw.ends_with(']');
    let found = if bracketed {
        Multiplicity::List
    } else {
        Multiplicity::Single
    };
    if found != spec.multiplicity {
        return Err(LineFault::MultiplicityMismatch {
            field: name.to_string(),
            declared: spec.multiplicity,
            found,
        });
    }

    let value = if bracketed {
        let inner = &raw[1..raw.len() - 1];
        if inner.is_empty() {
            FieldValue::List(Vec::new())
        } else {
            let items = inner
                .split(',')
                .map(|item| Scalar::parse(spec.kind, item))
                .collect::<Result<Vec<_>, _>>()?;
            FieldValue::List(items)
        }
    } else {
        FieldValue::Single(Scalar::parse(spec.kind, raw)?)
    };

    Ok((name, value))
}

/// Records read from one data file, and the error that ended the read
/// early, if any.
#[derive(Debug)]
pub struct Decoded<R> {
    /// Every record completed before the error, in file order
    pub records: Vec<R>,
    pub error: Option<CodecError>,
    /// The file ended inside a block, which was dropped
    pub partial_tail: bool,
}

impl<R> Decoded<R> {
    /// True when every line of the file belongs to a decoded record.
    pub fn is_clean(&self) -> bool {
        self.error.is_none() && !self.partial_tail
    }

    /// All records, or the error if the file could not be read to the end.
    pub fn into_result(self) -> CodecResult<Vec<R>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.records),
        }
    }
}

/// Decodes `path` up to its first malformed line.
///
/// A missing file is not an error: it means nothing was saved yet and
/// decodes as empty. Each call reopens the file and starts from the top.
///
/// # Errors
///
/// Returns `ReadFailure` only if the file exists but cannot be opened.
/// Failures after that are reported in [`Decoded::error`].
pub fn decode_prefix<R: Record>(path: &Path) -> CodecResult<Decoded<R>> {
    let mut reader = match RecordReader::<R>::open(path) {
        Ok(reader) => reader,
        Err(e) if e.is_not_found() => {
            tracing::info!(
                path = %path.display(),
                record = R::SCHEMA.record_name,
                "no previous tracking data found"
            );
            return Ok(Decoded {
                records: Vec::new(),
                error: None,
                partial_tail: false,
            });
        }
        Err(e) => return Err(e),
    };

    let mut records = Vec::new();
    let error = loop {
        match reader.read_next() {
            Ok(Some(record)) => records.push(record),
            Ok(None) => break None,
            Err(e) => break Some(e),
        }
    };

    tracing::debug!(
        path = %path.display(),
        record = R::SCHEMA.record_name,
        count = records.len(),
        lines = reader.line_number(),
        complete = error.is_none(),
        "decoded data file"
    );
    Ok(Decoded {
        records,
        error,
        partial_tail: reader.partial_tail(),
    })
}

/// Decodes every record in `path`, in file order.
///
/// Same as [`decode_prefix`] but fails on the first malformed line.
pub fn decode<R: Record>(path: &Path) -> CodecResult<Vec<R>> {
    decode_prefix(path)?.into_result()
}
