use crate::foundation::error::{SequenceError, SequenceResult};

/// 0-based index into a numbered image sequence.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

impl FrameIndex {
    /// Last valid index of a sequence with `frame_count` frames.
    ///
    /// Empty sequences clamp to frame 0.
    pub fn last(frame_count: u32) -> Self {
        Self(frame_count.saturating_sub(1))
    }

    /// Clamp into `[0, frame_count - 1]`.
    pub fn clamp_to(self, frame_count: u32) -> Self {
        Self(self.0.min(Self::last(frame_count).0))
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Intrinsic drawing surface size in pixels, fixed for the lifetime of a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with a non-zero area.
    pub fn new(width: u32, height: u32) -> SequenceResult<Self> {
        if width == 0 || height == 0 {
            return Err(SequenceError::validation(
                "canvas width and height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Return `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes needed for an RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
