use crate::eval::visibility::Visibility;

/// Native stand-in for the host's intersection observer.
///
/// Emits a visibility signal on the first observation and afterwards only when the element crosses
/// the viewport boundary (threshold 0). `root_margin_px` grows the viewport on both ends.
#[derive(Clone, Debug, Default)]
pub struct ViewportObserver {
    root_margin_px: f64,
    last: Option<Visibility>,
}

impl ViewportObserver {
    pub fn new(root_margin_px: f64) -> Self {
        Self {
            root_margin_px,
            last: None,
        }
    }

    /// Observe an element's vertical extent against the current viewport.
    pub fn observe(
        &mut self,
        element_top: f64,
        element_height: f64,
        viewport_top: f64,
        viewport_height: f64,
    ) -> Option<&'static str> {
        let lo = viewport_top - self.root_margin_px;
        let hi = viewport_top + viewport_height + self.root_margin_px;
        let element_bottom = element_top + element_height.max(0.0);
        let intersecting = element_top < hi && element_bottom > lo;

        let now = if intersecting {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if self.last == Some(now) {
            return None;
        }
        self.last = Some(now);
        Some(now.as_signal())
    }

    /// Forget the last state so the next observation emits again.
    pub fn disconnect(&mut self) {
        self.last = None;
    }
}
