//! # primer-core
//!
//! Enhanced primitive containers - THE LOGIC.
//!
//! Each container owns a native value and exposes a reviewed operation set
//! on top of it:
//! - `IndexedMapping` → ordered map addressable by key, position or slice
//! - `BoundedSequence` / `ImmutableSequence` → in-place and copy-on-write
//!   sequences sharing the `SequenceOps` operation set
//! - `TextUtility` → fuzzy matching, common prefix/suffix/substring, masking
//!   and digests
//! - `WeakInt` / `CorrectFloat` → numeric families with base conversion,
//!   primality and artifact-free decimal addition
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: NO async, NO I/O
//! - Errors surface to the caller as `PrimitiveError`; nothing is logged at
//!   error level and nothing is downgraded to a default
//! - Single-threaded by contract

// =============================================================================
// MODULES
// =============================================================================

pub mod boolean;
pub mod formats;
pub mod mapping;
pub mod numeric;
pub mod primitives;
pub mod sequence;
pub mod text;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Key, KindSet, Kinded, PrimitiveError, Value, ValueKind};

// =============================================================================
// RE-EXPORTS: Containers
// =============================================================================

pub use boolean::RichBool;
pub use mapping::{IndexedMapping, Lookup, Slice};
pub use numeric::{CorrectFloat, Scalar, WeakInt};
pub use sequence::{Aggregate, BoundedSequence, Cycle, ImmutableSequence, SequenceOps};
pub use text::{DigestAlgorithm, MatchOptions, TextMatch, TextUtility, edit_distance};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{mapping_from_json, mapping_to_json};
