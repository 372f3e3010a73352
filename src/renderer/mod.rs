//! Terminal renderer - frame buffer and differential output.

mod buffer;
mod diff;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
