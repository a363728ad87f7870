use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicated colon routing under '{parent}': {keys:?}")]
    DuplicatedColon { parent: String, keys: Vec<String> },
    #[error("duplicated question routing under '{parent}': '{pattern}' overlaps '{conflicts_with}'")]
    DuplicatedQuestion {
        parent: String,
        pattern: String,
        conflicts_with: String,
    },
    #[error("duplicated plus routing under '{parent}': '{pattern}' overlaps '{conflicts_with}'")]
    DuplicatedPlus {
        parent: String,
        pattern: String,
        conflicts_with: String,
    },
    #[error("duplicated asterisk routing under '{parent}': {keys:?}")]
    DuplicatedAsterisk { parent: String, keys: Vec<String> },
}

pub type RegistryResult<T> = Result<T, RegistryError>;
