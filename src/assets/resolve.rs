use crate::assets::handle::{ImageHandle, PreparedImage};
use crate::assets::loader::ImageLoader;
use crate::assets::source::frame_source_for;
use crate::assets::store::AnimationState;
use crate::config::SequenceConfig;
use crate::foundation::core::FrameIndex;

/// Which lookup produced a handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    /// The instance's own frame cache.
    Local,
    /// The store entry left behind by an earlier instance with the same identifier.
    Shared,
    /// Nothing cached; a new load was issued.
    Fresh,
}

/// Outcome of a frame lookup. The handle may still be loading; check before drawing.
#[derive(Clone, Debug)]
pub struct Resolution {
    pub handle: ImageHandle,
    pub tier: Tier,
}

impl Resolution {
    pub fn is_ready(&self) -> bool {
        self.handle.is_ready()
    }

    /// The drawable image, or `None` while pending or after a failed load.
    pub fn ready_image(&self) -> Option<PreparedImage> {
        self.handle.image()
    }
}

/// Look up frame `index`: local cache, then the shared store entry, then a fresh load.
///
/// Shared hits are adopted into the local cache. Fresh handles are cached before they complete so
/// a second request for the same frame does not issue another load.
pub fn resolve(
    state: &mut AnimationState,
    shared: Option<&AnimationState>,
    index: FrameIndex,
    cfg: &SequenceConfig,
    loader: &mut dyn ImageLoader,
) -> Resolution {
    if let Some(handle) = state.image(index) {
        tracing::trace!(%index, "frame resolved from local cache");
        return Resolution {
            handle: handle.clone(),
            tier: Tier::Local,
        };
    }

    if let Some(handle) = shared.and_then(|s| s.image(index)).cloned() {
        tracing::trace!(%index, "frame adopted from shared store");
        state.set_image(index, handle.clone());
        return Resolution {
            handle,
            tier: Tier::Shared,
        };
    }

    let source = frame_source_for(cfg, index);
    tracing::trace!(%index, source = %source, "frame not cached; issuing load");
    let handle = loader.load(&source);
    state.set_image(index, handle.clone());
    Resolution {
        handle,
        tier: Tier::Fresh,
    }
}

/// Issue a load for every frame of the sequence up front, filling the local cache.
///
/// Returns the number of loads issued.
pub fn preload(
    state: &mut AnimationState,
    cfg: &SequenceConfig,
    loader: &mut dyn ImageLoader,
) -> usize {
    let n = state.images.len().min(cfg.frame_count as usize);
    for i in 0..n {
        let index = FrameIndex(i as u32);
        let handle = loader.load(&frame_source_for(cfg, index));
        state.set_image(index, handle);
    }
    tracing::debug!(frames = n, id = %cfg.id, "preload issued");
    n
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
