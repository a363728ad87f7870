use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("uri include space: '{address}'")]
    IncludesSpace { address: String },
    #[error("empty uri frag: '{address}'")]
    EmptyFragment { address: String },
    #[error("invalid double slash: '{address}'")]
    DoubleSlash { address: String },
}

pub type PathResult<T> = Result<T, PathError>;
