use crate::assets::handle::{ImageHandle, LoadStatus};
use crate::render::surface::DrawSurface;

/// How a recomputed frame reaches the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// Issue a fresh load and paint when it completes. Used on first paint and pinned-to-top entry.
    Immediate,
    /// Paint on the next animation-frame tick from whatever the resolver returns.
    Deferred,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn,
    /// Handle still loading, or its load failed; nothing was painted.
    NotReady,
    /// The surface rejected the draw; nothing was painted.
    Suppressed,
}

impl DrawOutcome {
    pub fn is_drawn(self) -> bool {
        self == Self::Drawn
    }
}

/// Paint `handle` at the canvas origin, if it is drawable.
///
/// Never fails: a missing or broken frame degrades to "nothing drawn this tick".
pub fn draw(surface: &mut dyn DrawSurface, handle: &ImageHandle) -> DrawOutcome {
    let image = match handle.status() {
        LoadStatus::Ready(image) => image,
        LoadStatus::Pending => return DrawOutcome::NotReady,
        LoadStatus::Failed(reason) => {
            tracing::debug!(
                source = handle.source(),
                reason = %reason,
                "skipping draw of failed frame"
            );
            return DrawOutcome::NotReady;
        }
    };

    match surface.draw_image(&image, 0.0, 0.0) {
        Ok(()) => DrawOutcome::Drawn,
        Err(e) => {
            tracing::debug!(source = handle.source(), error = %e, "draw suppressed");
            DrawOutcome::Suppressed
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
