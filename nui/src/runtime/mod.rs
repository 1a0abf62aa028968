//! Runtime support: drives components from a tokio task.

mod frame_loop;

pub use frame_loop::{FrameLoop, spawn_frame_loop};
