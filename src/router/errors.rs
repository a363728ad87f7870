use crate::registry::RegistryError;
use crate::router::RouterOptionsError;
use crate::rule::RuleError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Options(#[from] RouterOptionsError),
    #[error("request method is missing")]
    MissingMethod,
    #[error("unsupported request method '{method}'")]
    InvalidMethod { method: String },
}

pub type RouterResult<T> = Result<T, RouterError>;
