/// Geometry reads the animation needs from its host page.
pub trait LayoutProbe {
    /// Pixels the page is currently scrolled.
    fn scroll_top(&self) -> f64;
    /// Vertical offset of `container_id` relative to `parent_id`; `None` if either is missing.
    fn relative_top(&self, container_id: &str, parent_id: &str) -> Option<f64>;
    /// Scrollable height of `container_id`; `None` if it is missing.
    fn container_height(&self, container_id: &str) -> Option<f64>;
}

/// Layout with a single container at a fixed position; ids are not checked.
///
/// Useful for headless rendering and tests. Set a field to `None` to simulate a missing element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedLayout {
    pub scroll_top: f64,
    pub container_top: Option<f64>,
    pub container_height: Option<f64>,
}

impl FixedLayout {
    pub fn new(container_top: f64, container_height: f64) -> Self {
        Self {
            scroll_top: 0.0,
            container_top: Some(container_top),
            container_height: Some(container_height),
        }
    }

    pub fn scroll_to(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top;
    }
}

impl LayoutProbe for FixedLayout {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn relative_top(&self, _container_id: &str, _parent_id: &str) -> Option<f64> {
        self.container_top
    }

    fn container_height(&self, _container_id: &str) -> Option<f64> {
        self.container_height
    }
}
