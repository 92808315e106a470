use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("invalid lexicon archive: {0}")]
    InvalidArchive(String),

    #[error("failed to encode lexicon: {0}")]
    Encode(String),
}
