use thiserror::Error;

/// Why a pattern did not match. `token` is the index of the top-level token
/// that failed and `offset` the byte offset it was tried at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("input ended before token {token} could match (offset {offset})")]
    UnexpectedEnd { token: usize, offset: usize },
    #[error("token {token} does not match at offset {offset}")]
    Mismatch { token: usize, offset: usize },
}

impl MatchError {
    pub fn offset(&self) -> usize {
        match self {
            MatchError::UnexpectedEnd { offset, .. } | MatchError::Mismatch { offset, .. } => {
                *offset
            }
        }
    }

    pub fn token(&self) -> usize {
        match self {
            MatchError::UnexpectedEnd { token, .. } | MatchError::Mismatch { token, .. } => *token,
        }
    }
}
