mod error;
mod split;

pub use error::{PathError, PathResult};
pub use split::{
    Fragments, ROOT_FRAGMENT, split_address, split_request_path, validate_address,
};
