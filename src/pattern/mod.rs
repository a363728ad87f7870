mod analysis;
mod compiled;
mod error;
mod segment;

pub use analysis::{optionals_overlap, repetition_variants};
pub use compiled::SegmentPattern;
pub use error::{PatternError, PatternResult};
pub use segment::{DOUBLE_WILDCARD, SegmentKind, WILDCARD, classify_segment};
