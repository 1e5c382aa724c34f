use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error("record must have a title")]
    MissingTitle,

    #[error("record must have a source_id")]
    MissingSourceId,
}
