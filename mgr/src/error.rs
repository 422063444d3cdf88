use thiserror::Error;

#[derive(Error, Debug)]
pub enum MgrError {
    #[error("expected {expected} grid numbers, got {found}")]
    TokenCount { expected: usize, found: usize },

    #[error("invalid grid number '{0}'")]
    Number(String),
}
