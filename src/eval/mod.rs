/// Scroll offset to frame index mapping.
pub mod position;
/// Native intersection-signal source.
pub mod viewport;
/// Visibility-gated activation.
pub mod visibility;
