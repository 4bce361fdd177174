use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid name: {0:?}")]
    InvalidName(String),
    #[error("Registry store unavailable: {0}")]
    StoreUnavailable(String),
}
