/// CPU canvas backend.
pub mod cpu;
/// Frame painting and update strategies.
pub mod renderer;
/// Drawing-surface capability.
pub mod surface;
