pub mod chord;
pub mod chord_type;
pub mod interval;
pub mod note;
pub mod pitch;
pub mod scale_type;

pub use chord::*;
pub use chord_type::*;
pub use interval::*;
pub use note::*;
pub use pitch::*;
pub use scale_type::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    #[error("invalid note name: {0}")]
    InvalidNote(String),
    #[error("invalid interval: {0}")]
    InvalidInterval(String),
    #[error("unknown chord type: {0}")]
    UnknownChordType(String),
    #[error("unknown scale: {0}")]
    UnknownScale(String),
}
