use std::cell::RefCell;
use std::rc::Rc;

use crate::assets::handle::ImageHandle;
use crate::assets::loader::ImageLoader;
use crate::assets::resolve::{preload, resolve};
use crate::assets::source::frame_source_for;
use crate::assets::store::{AnimationState, AnimationStateStore};
use crate::config::SequenceConfig;
use crate::eval::position::{FrameMapping, MapperParams, ScrollGeometry, map_scroll};
use crate::eval::visibility::VisibilityGate;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SequenceError, SequenceResult};
use crate::render::renderer::{DrawOutcome, UpdateStrategy, draw};
use crate::render::surface::DrawSurface;
use crate::session::host::LayoutProbe;

type FrameListener = Box<dyn FnMut(FrameIndex)>;

/// A load whose completion should paint `frame`, if that frame is still current by then.
struct AwaitingDraw {
    frame: FrameIndex,
    handle: ImageHandle,
}

/// One mounted scroll-linked sequence animation.
///
/// The host drives it from its event loop:
///
/// - [`SequenceAnimation::mount`] (or [`SequenceAnimation::mount_with_listener`]) once the canvas
///   and container exist
/// - [`SequenceAnimation::on_scroll`] for every scroll event
/// - [`SequenceAnimation::on_animation_frame`] once per display frame
/// - [`SequenceAnimation::flush_ready`] after the loader has completed loads
/// - [`SequenceAnimation::on_visibility`] for intersection signals
/// - [`SequenceAnimation::unmount`] when the element is torn down
///
/// Each call runs to completion before the next one starts; nothing here blocks on I/O.
pub struct SequenceAnimation {
    config: SequenceConfig,
    container_id: String,
    state: AnimationState,
    gate: VisibilityGate,
    current: FrameIndex,
    scheduled: Option<FrameIndex>,
    awaiting: Option<AwaitingDraw>,
    completed: Rc<RefCell<Vec<ImageHandle>>>,
    listener: Option<FrameListener>,
}

impl SequenceAnimation {
    /// Set up the animation and request its first paint.
    ///
    /// Reuses the store's state for `config.id` when it is live; otherwise allocates the frame
    /// cache and preloads every frame. Fails if the configuration is invalid, the surface has no
    /// area, or the container/anchor cannot be measured.
    pub fn mount(
        config: SequenceConfig,
        store: &mut AnimationStateStore,
        layout: &dyn LayoutProbe,
        surface: &mut dyn DrawSurface,
        loader: &mut dyn ImageLoader,
    ) -> SequenceResult<Self> {
        Self::mount_inner(config, store, layout, surface, loader, None)
    }

    /// [`SequenceAnimation::mount`] with the frame listener installed before the first
    /// recomputation, so a pinned-to-top mount reports its initial frame.
    pub fn mount_with_listener(
        config: SequenceConfig,
        store: &mut AnimationStateStore,
        layout: &dyn LayoutProbe,
        surface: &mut dyn DrawSurface,
        loader: &mut dyn ImageLoader,
        listener: impl FnMut(FrameIndex) + 'static,
    ) -> SequenceResult<Self> {
        Self::mount_inner(config, store, layout, surface, loader, Some(Box::new(listener)))
    }

    #[tracing::instrument(skip_all, fields(id = %config.id))]
    fn mount_inner(
        config: SequenceConfig,
        store: &mut AnimationStateStore,
        layout: &dyn LayoutProbe,
        surface: &mut dyn DrawSurface,
        loader: &mut dyn ImageLoader,
        listener: Option<FrameListener>,
    ) -> SequenceResult<Self> {
        config.validate()?;
        if surface.width() == 0 || surface.height() == 0 {
            return Err(SequenceError::initialization(format!(
                "canvas '{}' has no drawing area",
                config.canvas_id()
            )));
        }

        let container_id = config.container_id();
        if layout.container_height(&container_id).is_none() {
            return Err(SequenceError::initialization(format!(
                "container '{container_id}' not found"
            )));
        }

        let mut state = store.get_or_create(&config.id);
        let reused = state.is_initialized(config.frame_count);
        if !reused {
            state.initialize(&config.id, config.frame_count);
            preload(&mut state, &config, loader);
        }

        let mut anim = Self {
            config,
            container_id,
            state,
            gate: VisibilityGate::new(),
            current: FrameIndex(0),
            scheduled: None,
            awaiting: None,
            completed: Rc::new(RefCell::new(Vec::new())),
            listener,
        };

        if anim.state.container_top.is_none() {
            let top = anim.measure_container(layout).ok_or_else(|| {
                SequenceError::initialization(format!(
                    "anchor '{}' for container '{}' not found",
                    anim.config.parent_element_id, anim.container_id
                ))
            })?;
            anim.state.container_top = Some(top);
        }

        if anim.config.pinned_to_top {
            anim.analyse(layout, UpdateStrategy::Immediate, loader);
        } else {
            anim.request(FrameIndex(0), UpdateStrategy::Immediate, loader);
        }
        anim.flush_ready(surface);

        tracing::info!(
            frames = anim.config.frame_count,
            reused_cache = reused,
            container_top = ?anim.state.container_top,
            "sequence animation mounted"
        );
        Ok(anim)
    }

    /// React to a page scroll. Ignored while the gate is closed.
    ///
    /// On an update the frame is scheduled for the next animation-frame tick; several scrolls
    /// within one tick collapse into the latest frame.
    pub fn on_scroll(
        &mut self,
        layout: &dyn LayoutProbe,
        loader: &mut dyn ImageLoader,
    ) -> FrameMapping {
        if !self.gate.is_active() {
            return FrameMapping::Hold;
        }
        if (self.config.refresh_layout_on_scroll || self.state.container_top.is_none())
            && let Some(top) = self.measure_container(layout)
        {
            self.state.container_top = Some(top);
        }
        self.analyse(layout, UpdateStrategy::Deferred, loader)
    }

    /// Map the current scroll position and route any resulting frame through `strategy`.
    ///
    /// This bypasses the visibility gate; [`SequenceAnimation::on_scroll`] is the gated entry.
    pub fn analyse(
        &mut self,
        layout: &dyn LayoutProbe,
        strategy: UpdateStrategy,
        loader: &mut dyn ImageLoader,
    ) -> FrameMapping {
        let mapping = self.recompute(layout);
        if let Some(frame) = mapping.frame() {
            self.request(frame, strategy, loader);
        }
        mapping
    }

    /// Paint the scheduled frame, if any. Returns `None` when nothing was scheduled.
    ///
    /// A frame that is still loading is painted later by [`SequenceAnimation::flush_ready`],
    /// provided no newer frame has been selected in the meantime.
    pub fn on_animation_frame(
        &mut self,
        store: &AnimationStateStore,
        surface: &mut dyn DrawSurface,
        loader: &mut dyn ImageLoader,
    ) -> Option<DrawOutcome> {
        let frame = self.scheduled.take()?;
        let resolution = resolve(
            &mut self.state,
            store.get(&self.config.id),
            frame,
            &self.config,
            loader,
        );

        if resolution.is_ready() {
            self.awaiting = None;
            return Some(draw(surface, &resolution.handle));
        }
        if resolution.handle.is_pending() {
            self.await_draw(frame, resolution.handle);
        }
        Some(DrawOutcome::NotReady)
    }

    /// Deliver load completions: paint the awaited frame if its load finished and it is still
    /// the current frame.
    pub fn flush_ready(&mut self, surface: &mut dyn DrawSurface) -> Option<DrawOutcome> {
        let completed: Vec<ImageHandle> = self.completed.borrow_mut().drain(..).collect();
        let awaiting = self.awaiting.as_ref()?;
        if !completed.iter().any(|h| h.same_handle(&awaiting.handle)) {
            return None;
        }

        let awaiting = self.awaiting.take()?;
        if awaiting.frame != self.current {
            tracing::trace!(
                frame = %awaiting.frame,
                current = %self.current,
                "dropping stale frame completion"
            );
            return None;
        }
        Some(draw(surface, &awaiting.handle))
    }

    /// Apply a raw `"VISIBLE"` / `"HIDDEN"` signal. Returns whether the gate changed.
    pub fn on_visibility(&mut self, signal: &str) -> bool {
        self.gate.apply_signal(signal)
    }

    /// The intersection collaborator could not start; keep reacting to scroll forever.
    pub fn visibility_unavailable(&mut self, reason: &str) {
        self.gate.mark_unavailable(reason);
    }

    /// Forget the cached container offset; it is measured again on the next scroll.
    pub fn invalidate_layout(&mut self) {
        self.state.container_top = None;
    }

    /// Register the frame-index notification, fired on every recomputation.
    pub fn set_frame_listener(&mut self, listener: impl FnMut(FrameIndex) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Persist this instance's state so a later mount with the same id reuses its frames.
    pub fn unmount(self, store: &mut AnimationStateStore) {
        tracing::info!(
            id = %self.config.id,
            ready_frames = self.state.ready_count(),
            "sequence animation unmounted"
        );
        store.update(&self.config.id, self.state);
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn current_frame(&self) -> FrameIndex {
        self.current
    }

    pub fn scheduled_frame(&self) -> Option<FrameIndex> {
        self.scheduled
    }

    pub fn is_awaiting_draw(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.gate.is_active()
    }

    pub fn opacity(&self) -> f32 {
        self.gate.opacity()
    }

    fn measure_container(&self, layout: &dyn LayoutProbe) -> Option<f64> {
        layout.relative_top(&self.container_id, &self.config.parent_element_id)
    }

    fn recompute(&mut self, layout: &dyn LayoutProbe) -> FrameMapping {
        let Some(container_top) = self.state.container_top else {
            return FrameMapping::Hold;
        };
        let Some(container_height) = layout.container_height(&self.container_id) else {
            tracing::debug!(container = %self.container_id, "container missing; holding frame");
            return FrameMapping::Hold;
        };

        let geom = ScrollGeometry {
            scroll_top: layout.scroll_top(),
            container_top,
            container_height,
        };
        let mapping = map_scroll(geom, MapperParams::from(&self.config));
        if let Some(frame) = mapping.frame() {
            self.current = frame;
            if let Some(listener) = self.listener.as_mut() {
                listener(frame);
            }
        }
        mapping
    }

    fn request(
        &mut self,
        frame: FrameIndex,
        strategy: UpdateStrategy,
        loader: &mut dyn ImageLoader,
    ) {
        match strategy {
            UpdateStrategy::Immediate => {
                let handle = loader.load(&frame_source_for(&self.config, frame));
                self.await_draw(frame, handle);
            }
            UpdateStrategy::Deferred => self.scheduled = Some(frame),
        }
    }

    fn await_draw(&mut self, frame: FrameIndex, handle: ImageHandle) {
        if let Some(awaiting) = self.awaiting.as_mut()
            && awaiting.handle.same_handle(&handle)
        {
            awaiting.frame = frame;
            return;
        }
        let completed = Rc::clone(&self.completed);
        handle.on_ready(move |h| completed.borrow_mut().push(h.clone()));
        self.awaiting = Some(AwaitingDraw { frame, handle });
    }
}

impl std::fmt::Debug for SequenceAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceAnimation")
            .field("id", &self.config.id)
            .field("current", &self.current)
            .field("scheduled", &self.scheduled)
            .field("awaiting", &self.awaiting.as_ref().map(|a| a.frame))
            .field("gate", &self.gate)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/animation.rs"]
mod tests;
