//! Pipeline stages for PDF-to-quiz extraction.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets the backend wire them
//! to different client implementations without touching stage logic.
//!
//! ## Data Flow
//!
//! ```text
//! validate ──▶ retrieve ──▶ extract ──▶ normalize ──▶ persist
//! (request)   (obj store)  (model+     (canonical    (batched
//!                          fallback)    docs)         write)
//! ```
//!
//! 1. [`validate`]  — confirm the source reference is present and the
//!    category belongs to the deployment's set
//! 2. [`retrieve`]  — existence check, then download the raw PDF bytes
//! 3. [`extract`]   — upload once, invoke the cost-efficient model, escalate
//!    exactly once to the stronger model on an empty result
//! 4. [`normalize`] — map model output into the canonical persisted shape,
//!    deriving fingerprints and the correct-answer fields
//! 5. [`persist`]   — one all-or-nothing batch write, then read the set back
//!
//! Stages run strictly sequentially within an invocation; there is no
//! internal parallelism.

pub mod extract;
pub mod normalize;
pub mod persist;
pub mod retrieve;
pub mod validate;
