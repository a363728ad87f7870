use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("invalid colon route: '{segment}'")]
    InvalidColon { segment: String },
    #[error("invalid question route: '{segment}'")]
    InvalidQuestion { segment: String },
    #[error("invalid plus route: '{segment}'")]
    InvalidPlus { segment: String },
    #[error("parameter segment '{segment}' is missing a name")]
    ParameterMissingName { segment: String },
    #[error("segment '{segment}' does not compile as a regular expression: {reason}")]
    InvalidRegex { segment: String, reason: String },
}

pub type PatternResult<T> = Result<T, PatternError>;
