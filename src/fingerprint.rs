//! Content-derived document identity.
//!
//! Both persisted collections are keyed by a truncated md5 digest rather than
//! a random id. This is a deliberate, documented identity function — not an
//! incidental hashing detail — because downstream consumers rely on it:
//!
//! * **Question id** = first 8 hex chars of `md5(stem)`. Identical stems
//!   across requests collapse to the same document (idempotent overwrite);
//!   collisions between distinct stems are accepted as out of scope.
//! * **Question-set id** = first 12 hex chars of `md5(source_path)`.
//!   Re-processing the same source path deterministically overwrites the
//!   same set.

use md5::{Digest, Md5};

/// Hex length of a question document id.
const QUESTION_ID_LEN: usize = 8;

/// Hex length of a question-set document id.
const SET_ID_LEN: usize = 12;

fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Stable id for a question, derived from its stem text.
pub fn question_id(stem: &str) -> String {
    let mut hex = md5_hex(stem);
    hex.truncate(QUESTION_ID_LEN);
    hex
}

/// Stable id for a question set, derived from the source path it was
/// extracted from.
pub fn question_set_id(source_path: &str) -> String {
    let mut hex = md5_hex(source_path);
    hex.truncate(SET_ID_LEN);
    hex
}
