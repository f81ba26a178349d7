use crate::config::SequenceConfig;
use crate::foundation::core::FrameIndex;

/// Scroll fractions at or below this are treated as "at rest" and show frame 0.
pub const REST_FRACTION_EPSILON: f64 = 0.000_001;

/// Geometry snapshot read from the host at the time of a scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollGeometry {
    /// Pixels the page is currently scrolled.
    pub scroll_top: f64,
    /// Cached container offset relative to its anchor.
    pub container_top: f64,
    /// Scrollable height of the container.
    pub container_height: f64,
}

/// The configuration subset the mapper reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapperParams {
    pub scroll_area_percent: f64,
    pub frame_count: u32,
    pub pinned_to_top: bool,
}

impl From<&SequenceConfig> for MapperParams {
    fn from(cfg: &SequenceConfig) -> Self {
        Self {
            scroll_area_percent: cfg.scroll_area_percent,
            frame_count: cfg.frame_count,
            pinned_to_top: cfg.pinned_to_top,
        }
    }
}

/// Result of mapping one scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameMapping {
    /// Scroll is above the trigger zone; keep whatever frame is showing.
    Hold,
    /// Recompute happened; `frame` is always inside `[0, frame_count - 1]`.
    Update { frame: FrameIndex, fraction: f64 },
}

impl FrameMapping {
    pub fn should_update(self) -> bool {
        matches!(self, Self::Update { .. })
    }

    pub fn frame(self) -> Option<FrameIndex> {
        match self {
            Self::Hold => None,
            Self::Update { frame, .. } => Some(frame),
        }
    }
}

/// Scroll distance over which the whole sequence plays.
pub fn max_scroll(geom: ScrollGeometry, scroll_area_percent: f64) -> f64 {
    scroll_area_percent * (geom.container_height + geom.container_top)
}

/// Map a scroll position to a frame of the sequence.
pub fn map_scroll(geom: ScrollGeometry, params: MapperParams) -> FrameMapping {
    let at_pinned_top = params.pinned_to_top && geom.scroll_top <= 0.0;
    if geom.scroll_top < geom.container_top && !at_pinned_top {
        return FrameMapping::Hold;
    }

    let max = max_scroll(geom, params.scroll_area_percent);
    if !max.is_finite() || max <= 0.0 {
        return FrameMapping::Update {
            frame: FrameIndex(0),
            fraction: 0.0,
        };
    }

    let fraction = (geom.scroll_top - geom.container_top) / max;
    let mut frame = frame_for_fraction(fraction, params.frame_count);
    if fraction <= REST_FRACTION_EPSILON && !params.pinned_to_top {
        frame = FrameIndex(0);
    }

    FrameMapping::Update { frame, fraction }
}

fn frame_for_fraction(fraction: f64, frame_count: u32) -> FrameIndex {
    let raw = (fraction * f64::from(frame_count)).ceil();
    if !raw.is_finite() || raw <= 0.0 {
        return FrameIndex(0);
    }
    // `as` saturates for values above u32::MAX.
    FrameIndex(raw as u32).clamp_to(frame_count)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/position.rs"]
mod tests;
