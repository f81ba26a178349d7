/// Signal string emitted by the intersection collaborator when the element enters the viewport.
pub const SIGNAL_VISIBLE: &str = "VISIBLE";
/// Signal string emitted when the element leaves the viewport.
pub const SIGNAL_HIDDEN: &str = "HIDDEN";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    /// Parse a collaborator signal. Anything other than the two known strings is ignored.
    pub fn from_signal(signal: &str) -> Option<Self> {
        match signal {
            SIGNAL_VISIBLE => Some(Self::Visible),
            SIGNAL_HIDDEN => Some(Self::Hidden),
            _ => None,
        }
    }

    pub fn as_signal(self) -> &'static str {
        match self {
            Self::Visible => SIGNAL_VISIBLE,
            Self::Hidden => SIGNAL_HIDDEN,
        }
    }
}

/// Where the gate's current state comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateSource {
    /// No signal seen yet; the gate starts open.
    Unobserved,
    /// At least one signal has been applied.
    Observed,
    /// The collaborator failed to start; the gate is pinned open.
    Unavailable,
}

/// Enables or suspends scroll reactions based on viewport visibility.
#[derive(Clone, Debug)]
pub struct VisibilityGate {
    visibility: Visibility,
    source: GateSource,
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityGate {
    pub fn new() -> Self {
        Self {
            visibility: Visibility::Visible,
            source: GateSource::Unobserved,
        }
    }

    /// Apply a raw collaborator signal. Returns `true` if the gate changed state.
    pub fn apply_signal(&mut self, signal: &str) -> bool {
        match Visibility::from_signal(signal) {
            Some(v) => self.apply(v),
            None => {
                tracing::trace!(signal, "ignoring unknown visibility signal");
                false
            }
        }
    }

    pub fn apply(&mut self, visibility: Visibility) -> bool {
        if self.source == GateSource::Unavailable {
            return false;
        }
        self.source = GateSource::Observed;
        let changed = self.visibility != visibility;
        self.visibility = visibility;
        changed
    }

    /// Record that the collaborator could not be started. The gate stays open for good.
    pub fn mark_unavailable(&mut self, reason: &str) {
        tracing::warn!(reason, "viewport observation unavailable; treating as always visible");
        self.source = GateSource::Unavailable;
        self.visibility = Visibility::Visible;
    }

    pub fn is_active(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn source(&self) -> GateSource {
        self.source
    }

    /// Canvas opacity cue: fully opaque while active, transparent while hidden.
    pub fn opacity(&self) -> f32 {
        if self.is_active() { 1.0 } else { 0.0 }
    }
}
