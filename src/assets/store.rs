use std::collections::HashMap;

use crate::assets::handle::ImageHandle;
use crate::foundation::core::FrameIndex;

/// Mutable state of one animation identifier: its frame cache and cached container offset.
#[derive(Clone, Debug, Default)]
pub struct AnimationState {
    /// Set once on first initialization.
    pub id: Option<String>,
    /// One slot per frame; `None` means "not requested yet".
    pub images: Vec<Option<ImageHandle>>,
    /// Container offset relative to its anchor. `None` marks the whole entry as invalid.
    pub container_top: Option<f64>,
}

impl AnimationState {
    /// A state entry is live once its container offset has been measured.
    pub fn is_valid(&self) -> bool {
        self.container_top.is_some()
    }

    /// Whether the frame cache is allocated for exactly `frame_count` frames.
    pub fn is_initialized(&self, frame_count: u32) -> bool {
        self.id.is_some() && self.images.len() >= 2 && self.images.len() == frame_count as usize
    }

    /// Reset the frame cache to `frame_count` empty slots and stamp the id.
    pub fn initialize(&mut self, id: &str, frame_count: u32) {
        self.id = Some(id.to_owned());
        self.images.clear();
        self.images.resize(frame_count as usize, None);
    }

    pub fn image(&self, index: FrameIndex) -> Option<&ImageHandle> {
        self.images.get(index.as_usize()).and_then(Option::as_ref)
    }

    /// Store `handle` at `index`. Out-of-range indices are ignored.
    pub fn set_image(&mut self, index: FrameIndex, handle: ImageHandle) {
        if let Some(slot) = self.images.get_mut(index.as_usize()) {
            *slot = Some(handle);
        }
    }

    /// Number of slots holding a completed, drawable image.
    pub fn ready_count(&self) -> usize {
        self.images
            .iter()
            .flatten()
            .filter(|h| h.is_ready())
            .count()
    }
}

/// Registry of [`AnimationState`] keyed by animation identifier.
///
/// One store is owned by the application and lent to every animation instance; it outlives the
/// instances so a re-mounted animation finds the frames an earlier instance already loaded.
#[derive(Debug, Default)]
pub struct AnimationStateStore {
    states: HashMap<String, AnimationState>,
}

impl AnimationStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of the live state for `id`, installing a fresh one if the entry is absent or
    /// invalid.
    ///
    /// Handles are shared between the copy and the stored entry, so frames that finish loading are
    /// visible through both.
    pub fn get_or_create(&mut self, id: &str) -> AnimationState {
        let state = self.states.entry(id.to_owned()).or_default();
        if !state.is_valid() {
            *state = AnimationState::default();
        }
        state.clone()
    }

    pub fn get(&self, id: &str) -> Option<&AnimationState> {
        self.states.get(id)
    }

    /// Replace the entry for `id` verbatim.
    pub fn update(&mut self, id: &str, state: AnimationState) {
        self.states.insert(id.to_owned(), state);
    }

    /// Drop every entry and the image handles they hold.
    pub fn clear(&mut self) {
        tracing::debug!(entries = self.states.len(), "clearing animation state store");
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
