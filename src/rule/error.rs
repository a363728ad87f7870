use crate::enums::HttpMethod;
use crate::path::PathError;
use crate::pattern::PatternError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("no rule: '{address}' has no handler to register")]
    NoRule { address: String },
    #[error("no rule in rule object: '{address}'")]
    EmptyRuleObject { address: String },
    #[error("invalid rule or defaultMethod not set: '{address}'")]
    DefaultMethodNotSet { address: String },
    #[error("'**' must be the last segment of '{address}'")]
    DoubleWildcardNotTerminal { address: String },
    #[error("method keyword must be the last segment of '{address}'")]
    MisplacedMethodKeyword { address: String },
    #[error("method keyword {method} under '{address}' must map to a handler")]
    InvalidMethodRule { method: HttpMethod, address: String },
    #[error("method {method} registered twice for '{address}'")]
    DuplicateMethod { method: HttpMethod, address: String },
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

pub type RuleResult<T> = Result<T, RuleError>;
