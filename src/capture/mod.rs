//! Hand-tracking frame sources
//!
//! This module consolidates:
//! - The `FrameSource` boundary that upstream trackers push through
//! - Replay of recorded landmark streams (replay.rs)
//! - A depth-1 hand-off for trackers running on another thread (channel.rs)

pub mod channel;
pub mod replay;

pub use channel::{FrameReceiver, FrameSender, frame_channel};
pub use replay::ReplaySource;

use crate::domain::FrameInput;

/// Producer of landmark frames
///
/// `Ok(None)` means the source is exhausted or was stopped. An error is a
/// tracking failure and ends the session; callers do not retry.
pub trait FrameSource {
    fn next_frame(&mut self) -> anyhow::Result<Option<FrameInput>>;
}
