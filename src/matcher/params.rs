use crate::types::{CapturedParam, RouteParams};
use smallvec::SmallVec;

pub(crate) type ParamBuffer = SmallVec<[CapturedParam; 4]>;

/// Later captures under the same key overwrite earlier ones.
pub(crate) fn into_route_params(captures: ParamBuffer) -> RouteParams {
    let mut map = RouteParams::with_capacity(captures.len());
    for (name, value) in captures {
        map.insert(name, value);
    }
    map
}
