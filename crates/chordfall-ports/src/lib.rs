pub mod input;
pub mod random;
pub mod settings;
pub mod types;

pub use input::*;
pub use random::*;
pub use settings::*;
pub use types::*;
