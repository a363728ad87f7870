use crate::router::PatternAnchoring;
use regex::Regex;

use super::{PatternError, PatternResult, SegmentKind, classify_segment};

/// A classified rule key, with its regex compiled when the kind needs one.
#[derive(Debug, Clone)]
pub struct SegmentPattern {
    raw: Box<str>,
    kind: SegmentKind,
    regex: Option<Regex>,
}

impl PartialEq for SegmentPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for SegmentPattern {}

impl SegmentPattern {
    pub fn compile(raw: &str, anchoring: PatternAnchoring) -> PatternResult<Self> {
        let kind = classify_segment(raw)?;
        let source = match kind {
            SegmentKind::Optional => Some(optional_source(raw)),
            SegmentKind::Repetition => Some(match anchoring {
                PatternAnchoring::Loose => raw.to_string(),
                PatternAnchoring::Strict => format!("^(?:{raw})$"),
            }),
            SegmentKind::PartialWildcard => Some(partial_wildcard_source(raw, anchoring)),
            _ => None,
        };

        let regex = source
            .map(|src| {
                Regex::new(&src).map_err(|err| PatternError::InvalidRegex {
                    segment: raw.to_string(),
                    reason: err.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            raw: raw.into(),
            kind,
            regex,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &SegmentKind {
        &self.kind
    }

    /// Regex test for optional, repetition and partial-wildcard keys. Other
    /// kinds never match here; they are resolved structurally.
    #[inline]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(value))
    }
}

/// `ab?cd` becomes `^ab?cd$` with every other character escaped.
pub(super) fn optional_source(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    out.push('^');
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '?' {
            continue;
        }
        out.push_str(&regex::escape(ch.encode_utf8(&mut [0u8; 4])));
        if chars.peek() == Some(&'?') {
            out.push('?');
        }
    }
    out.push('$');
    out
}

fn partial_wildcard_source(raw: &str, anchoring: PatternAnchoring) -> String {
    let body = raw
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    match anchoring {
        PatternAnchoring::Loose => body,
        PatternAnchoring::Strict => format!("^{body}$"),
    }
}
