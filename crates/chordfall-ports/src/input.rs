use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Live note set reported by the input collaborator, already debounced.
/// `chords` is ordered by confidence; `chords[0]` is the display guess.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputChange {
    pub notes: Vec<String>,
    pub chords: Vec<String>,
}

impl InputChange {
    pub fn new<N, C>(notes: N, chords: C) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            notes: notes.into_iter().map(Into::into).collect(),
            chords: chords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.chords.is_empty()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("input source unavailable: {0}")]
    Unavailable(String),
    #[error("backend error: {0}")]
    Backend(String),
}

/// Input stream handle: drop closes it.
pub trait InputStream: Send {
    fn close(self: Box<Self>);
}

pub type InputChangeCallback = Arc<dyn Fn(InputChange) + Send + Sync + 'static>;

pub trait InputPort: Send + Sync {
    /// Open the input: implementation may invoke cb from a background thread/callback.
    fn open(&self, cb: InputChangeCallback) -> Result<Box<dyn InputStream>, InputError>;
}
