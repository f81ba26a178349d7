/// Per-instance animation lifecycle.
pub mod animation;
/// Host geometry capability.
pub mod host;
