//! Conversion of stored idea rows into [`IdeaInspiration`](ideasrc_core::IdeaInspiration)
//! records.

pub mod error;
pub mod metadata;
pub mod processor;

pub use error::ProcessError;
pub use metadata::flatten_score_dictionary;
pub use processor::{IdeaProcessor, MAX_DESCRIPTION_CHARS};
