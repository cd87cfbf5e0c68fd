use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid sex code: {0:?} (expected \"M\" or \"F\")")]
    InvalidSex(String),
}
