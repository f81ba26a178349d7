//! Scroll-linked frame-sequence animation.
//!
//! As a page scrolls, one frame of a pre-numbered image sequence is selected from the scroll
//! position and painted onto a canvas, giving a "scrubbed video" effect. The engine is split into:
//!
//! - the position mapper ([`map_scroll`]), a pure scroll → frame function
//! - the [`AnimationStateStore`], which keeps each animation's frame cache across instances
//! - the resolver ([`resolve`]), a local → shared → fresh-load frame lookup
//! - the renderer ([`draw`]) painting onto any [`DrawSurface`]
//! - the [`VisibilityGate`], suspending work while the element is off-screen
//!
//! [`SequenceAnimation`] ties them together for one mounted instance.
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod config;
pub mod eval;
pub mod render;
pub mod session;

pub use crate::foundation::core::{Canvas, FrameIndex};
pub use crate::foundation::error::{SequenceError, SequenceResult};

pub use crate::assets::handle::{ImageHandle, LoadStatus, PreparedImage};
pub use crate::assets::loader::{FsImageLoader, ImageLoader};
pub use crate::assets::resolve::{Resolution, Tier, preload, resolve};
pub use crate::assets::source::{frame_source, frame_source_for};
pub use crate::assets::store::{AnimationState, AnimationStateStore};
pub use crate::config::SequenceConfig;
pub use crate::eval::position::{FrameMapping, MapperParams, ScrollGeometry, map_scroll};
pub use crate::eval::viewport::ViewportObserver;
pub use crate::eval::visibility::{Visibility, VisibilityGate};
pub use crate::render::cpu::PixmapSurface;
pub use crate::render::renderer::{DrawOutcome, UpdateStrategy, draw};
pub use crate::render::surface::{DrawSurface, FrameRGBA};
pub use crate::session::animation::SequenceAnimation;
pub use crate::session::host::{FixedLayout, LayoutProbe};
