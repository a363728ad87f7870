use crate::enums::HttpMethod;
use crate::path::ROOT_FRAGMENT;
use memchr::{memchr, memmem};

use super::{PatternError, PatternResult};

pub const PARAM_PREFIX: u8 = b':';
pub const WILDCARD: &str = "*";
pub const DOUBLE_WILDCARD: &str = "**";

/// Syntactic kind of one rule key. Kinds are mutually exclusive; the first
/// matching shape wins in the order listed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    Literal,
    Method(HttpMethod),
    Param { name: Box<str> },
    DoubleWildcard,
    Wildcard,
    /// A character followed by `?` is optional.
    Optional,
    /// A regex fragment using the native `+` quantifier.
    Repetition,
    /// `*` mixed with literal characters. One-sided forms (`img*`, `*.png`)
    /// are accepted as well and behave as prefix or suffix shapes.
    PartialWildcard,
}

#[tracing::instrument(level = "trace", fields(segment=%seg))]
pub fn classify_segment(seg: &str) -> PatternResult<SegmentKind> {
    if seg == ROOT_FRAGMENT {
        return Ok(SegmentKind::Literal);
    }

    if let Some(method) = HttpMethod::from_keyword(seg) {
        return Ok(SegmentKind::Method(method));
    }

    let bytes = seg.as_bytes();

    if memchr(b':', &bytes[1.min(bytes.len())..]).is_some() {
        return Err(PatternError::InvalidColon {
            segment: seg.to_string(),
        });
    }

    match bytes.first().copied() {
        Some(b'?') => {
            return Err(PatternError::InvalidQuestion {
                segment: seg.to_string(),
            });
        }
        Some(b'+') => {
            return Err(PatternError::InvalidPlus {
                segment: seg.to_string(),
            });
        }
        Some(PARAM_PREFIX) => {
            if bytes.len() == 1 {
                return Err(PatternError::ParameterMissingName {
                    segment: seg.to_string(),
                });
            }
            return Ok(SegmentKind::Param {
                name: seg[1..].into(),
            });
        }
        _ => {}
    }

    if seg == DOUBLE_WILDCARD {
        return Ok(SegmentKind::DoubleWildcard);
    }
    if seg == WILDCARD {
        return Ok(SegmentKind::Wildcard);
    }

    if memchr(b'?', bytes).is_some() {
        // every `?` needs a character of its own to make optional
        if memmem::find(bytes, b"??").is_some() {
            return Err(PatternError::InvalidQuestion {
                segment: seg.to_string(),
            });
        }
        return Ok(SegmentKind::Optional);
    }

    if memchr(b'+', bytes).is_some() {
        return Ok(SegmentKind::Repetition);
    }

    if memchr(b'*', bytes).is_some() {
        return Ok(SegmentKind::PartialWildcard);
    }

    Ok(SegmentKind::Literal)
}
