use crate::path::{PathError, PathResult};
use memchr::{memchr2, memmem};
use smallvec::SmallVec;

/// Key of the synthetic node every rule tree descends through first.
pub const ROOT_FRAGMENT: &str = "/";

pub type Fragments<'a> = SmallVec<[&'a str; 8]>;

/// Checks a registration address (one rule key, possibly slash-abbreviated).
#[inline]
pub fn validate_address(address: &str) -> PathResult<()> {
    if address.is_empty() {
        return Err(PathError::EmptyFragment {
            address: address.to_string(),
        });
    }

    if address.chars().any(char::is_whitespace) {
        return Err(PathError::IncludesSpace {
            address: address.to_string(),
        });
    }

    if memmem::find(address.as_bytes(), b"//").is_some() {
        return Err(PathError::DoubleSlash {
            address: address.to_string(),
        });
    }

    Ok(())
}

/// Validates `address` and splits it into its fragments. Top-level keys get
/// the synthetic root prepended; nested keys must name at least one fragment.
#[tracing::instrument(level = "trace", skip_all, fields(address=%address, is_root=is_root))]
pub fn split_address(address: &str, is_root: bool) -> PathResult<Fragments<'_>> {
    validate_address(address)?;

    let mut fragments = Fragments::new();
    if is_root {
        fragments.push(ROOT_FRAGMENT);
    }
    fragments.extend(address.split('/').filter(|f| !f.is_empty()));

    if fragments.is_empty() {
        return Err(PathError::EmptyFragment {
            address: address.to_string(),
        });
    }

    Ok(fragments)
}

/// Splits a request path into its non-empty segments. The synthetic root is
/// implied and not part of the output.
#[inline]
pub fn split_request_path(path: &str, strip_query: bool) -> Fragments<'_> {
    let path = if strip_query {
        match memchr2(b'?', b'#', path.as_bytes()) {
            Some(end) => &path[..end],
            None => path,
        }
    } else {
        path
    };

    path.split('/').filter(|s| !s.is_empty()).collect()
}
