pub mod app;
pub mod game;
pub mod ipc;
pub mod observer;
pub mod scheduler;

pub use app::*;
pub use game::*;
pub use ipc::*;
pub use observer::*;
pub use scheduler::*;
