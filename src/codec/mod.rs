//! Flat-file record codec
//!
//! Persists records as line-oriented text, one file per record type:
//!
//! ```text
//! name:"Bench Press"
//! primaryMuscles:["chest"]
//! secondaryMuscles:["triceps","shoulders"]
//! type:"push"
//! end
//! ```
//!
//! # Design Principles
//!
//! - Schema declared statically per record type, read through [`Record`]
//! - Append-only; update and delete go through clear-then-rewrite
//! - Every file handle is opened and closed within one call
//! - Missing file decodes as empty, malformed content aborts the decode
//! - A block cut off at end of file is ignored
//!
//! # Known format limitations
//!
//! Text is quoted but never escaped. A comma inside a list element, or a
//! newline anywhere in text, does not survive a round trip.

mod errors;
mod reader;
mod record;
mod schema;
mod writer;

pub use errors::{CodecError, CodecResult, LineFault};
pub use reader::{decode, decode_prefix, Decoded, RecordReader};
pub use record::{rejected, FieldValue, Record, Scalar};
pub use schema::{FieldSpec, Multiplicity, RecordSchema, ScalarKind};
pub use writer::{append, clear, encode, rewrite, RewriteReport, END_MARKER};
