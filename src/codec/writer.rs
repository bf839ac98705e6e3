//! Block encoder and file mutations
//!
//! Writing is append-only. The only other mutation is truncating a file
//! with [`clear`], which [`rewrite`] uses to replace every block at once.
//!
//! A block is one `name:value` line per schema field, in schema order,
//! followed by a line holding only `end`.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::errors::{CodecError, CodecResult};
use super::record::Record;

/// Terminator line of every block
pub const END_MARKER: &str = "end";

/// Encodes a record as a text block, trailing newline included.
///
/// # Errors
///
/// Returns `MissingValue` if the record does not expose one of its schema
/// fields.
pub fn encode<R: Record>(record: &R) -> CodecResult<String> {
    let schema = R::SCHEMA;
    let mut block = String::with_capacity(64 * (schema.len() + 1));

    for spec in schema.fields {
        let value = record.get(spec.name).ok_or(CodecError::MissingValue {
            record: schema.record_name,
            field: spec.name,
        })?;
        block.push_str(spec.name);
        block.push(':');
        value.encode_into(&mut block);
        block.push('\n');
    }

    block.push_str(END_MARKER);
    block.push('\n');
    Ok(block)
}

/// Appends one encoded block to the end of `path`.
///
/// The file (and its parent directory) is created if missing. The handle
/// is opened and closed within this call.
///
/// # Errors
///
/// Returns `WriteFailure` if the file cannot be opened, written or synced.
pub fn append<R: Record>(path: &Path, record: &R) -> CodecResult<()> {
    // Encode before opening so a bad record never touches the file.
    let block = encode(record)?;

    ensure_parent_dir(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CodecError::write_failure(path, e))?;

    file.write_all(block.as_bytes())
        .map_err(|e| CodecError::write_failure(path, e))?;

    file.sync_all()
        .map_err(|e| CodecError::write_failure(path, e))?;

    tracing::debug!(
        path = %path.display(),
        record = R::SCHEMA.record_name,
        bytes = block.len(),
        "appended record"
    );

    Ok(())
}

/// Truncates `path` to zero length, creating it if absent.
pub fn clear(path: &Path) -> CodecResult<()> {
    ensure_parent_dir(path)?;

    let file = File::create(path).map_err(|e| CodecError::write_failure(path, e))?;
    file.sync_all()
        .map_err(|e| CodecError::write_failure(path, e))?;

    tracing::debug!(path = %path.display(), "cleared data file");
    Ok(())
}

/// Outcome of a clear-then-append rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteReport {
    /// Records appended successfully
    pub written: usize,
    /// Records whose append failed
    pub lost: usize,
}

impl RewriteReport {
    pub fn total(&self) -> usize {
        self.written + self.lost
    }

    pub fn is_complete(&self) -> bool {
        self.lost == 0
    }

    /// Converts a lossy rewrite into a `PartialRewrite` error.
    pub fn check(&self) -> CodecResult<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(CodecError::PartialRewrite {
                lost: self.lost,
                total: self.total(),
            })
        }
    }
}

/// Replaces the contents of `path` with `records`, in order.
///
/// Not transactional: the file is cleared first and every record is then
/// appended on its own. A failed append is counted in the report and the
/// remaining records are still written.
///
/// # Errors
///
/// Returns `WriteFailure` only if the clear itself fails, in which case
/// nothing is appended.
pub fn rewrite<R: Record>(path: &Path, records: &[R]) -> CodecResult<RewriteReport> {
    clear(path)?;

    let mut report = RewriteReport::default();
    for record in records {
        match append(path, record) {
            Ok(()) => report.written += 1,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    code = e.code(),
                    error = %e,
                    "record lost during rewrite"
                );
                report.lost += 1;
            }
        }
    }

    Ok(report)
}

fn ensure_parent_dir(path: &Path) -> CodecResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| CodecError::write_failure(parent, e))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{lift, Lift};
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_encode_block_layout() {
        let block = encode(&lift("Squat", &["legs", "core"], 82.456, 5)).unwrap();
        assert_eq!(
            block,
            "name:\"Squat\"\ntags:[\"legs\",\"core\"]\nload:82.46\nreps:5\nend\n"
        );
    }

    #[test]
    fn test_encode_empty_list() {
        let block = encode(&lift("Plank", &[], 0.0, 1)).unwrap();
        assert!(block.contains("tags:[]\n"));
    }

    #[test]
    fn test_encode_missing_value() {
        let mut record = lift("Squat", &[], 1.0, 1);
        record.hide_reps = true;
        let err = encode(&record).unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingValue { field: "reps", .. }
        ));
    }

    #[test]
    fn test_append_creates_file_and_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("lifts.txt");

        append(&path, &lift("Squat", &["legs"], 100.0, 3)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("name:\"Squat\"\n"));
        assert!(contents.ends_with("end\n"));
    }

    #[test]
    fn test_append_never_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lifts.txt");

        append(&path, &lift("Squat", &[], 1.0, 1)).unwrap();
        append(&path, &lift("Deadlift", &[], 2.0, 2)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("end\n").count(), 2);
        assert!(contents.find("Squat").unwrap() < contents.find("Deadlift").unwrap());
    }

    #[test]
    fn test_missing_value_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lifts.txt");

        let mut record = lift("Squat", &[], 1.0, 1);
        record.hide_reps = true;
        assert!(append(&path, &record).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_append_to_directory_is_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let err = append(temp_dir.path(), &lift("Squat", &[], 1.0, 1)).unwrap_err();
        assert_eq!(err.code(), "GYM_CODEC_WRITE_FAILURE");
    }

    #[test]
    fn test_clear_truncates_and_creates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lifts.txt");

        clear(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        append(&path, &lift("Squat", &[], 1.0, 1)).unwrap();
        clear(&path).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_rewrite_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lifts.txt");

        append(&path, &lift("Old", &[], 1.0, 1)).unwrap();

        let records = vec![lift("A", &[], 1.0, 1), lift("C", &[], 3.0, 3)];
        let report = rewrite(&path, &records).unwrap();
        assert_eq!(report, RewriteReport { written: 2, lost: 0 });
        assert!(report.check().is_ok());

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("Old"));
        assert_eq!(contents.matches("end\n").count(), 2);
    }

    #[test]
    fn test_rewrite_counts_lost_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lifts.txt");

        let mut broken = lift("B", &[], 2.0, 2);
        broken.hide_reps = true;
        let records = vec![lift("A", &[], 1.0, 1), broken, lift("C", &[], 3.0, 3)];

        let report = rewrite(&path, &records).unwrap();
        assert_eq!(report.written, 2);
        assert_eq!(report.lost, 1);
        assert_eq!(report.total(), 3);
        assert!(matches!(
            report.check(),
            Err(CodecError::PartialRewrite { lost: 1, total: 3 })
        ));
    }

    #[test]
    fn test_rewrite_fails_when_clear_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = rewrite::<Lift>(temp_dir.path(), &[]);
        assert!(matches!(result, Err(CodecError::WriteFailure { .. })));
    }
}
