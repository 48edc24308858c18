pub mod factory;
pub mod matching;
pub mod registry;
pub mod target;

pub use factory::*;
pub use matching::*;
pub use registry::*;
pub use target::*;
