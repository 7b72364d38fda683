pub mod scheduler;
pub mod time;

pub use scheduler::{ClearMode, FrameDriver, Scene};
pub use time::FrameTimer;
