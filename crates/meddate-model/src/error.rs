use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid text span {begin}..{end}: begin must be before end")]
    InvalidSpan { begin: usize, end: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
