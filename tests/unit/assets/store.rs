use super::*;
use crate::assets::handle::PreparedImage;
use std::sync::Arc;

fn live_state(id: &str, frames: u32) -> AnimationState {
    let mut s = AnimationState::default();
    s.initialize(id, frames);
    s.container_top = Some(120.0);
    s
}

#[test]
fn get_or_create_installs_fresh_entry() {
    let mut store = AnimationStateStore::new();
    let s = store.get_or_create("roots");
    assert!(s.id.is_none());
    assert!(s.images.is_empty());
    assert_eq!(store.len(), 1);
    assert!(store.get("roots").is_some());
}

#[test]
fn valid_entry_is_returned_as_is() {
    let mut store = AnimationStateStore::new();
    store.update("roots", live_state("roots", 4));

    let s = store.get_or_create("roots");
    assert_eq!(s.id.as_deref(), Some("roots"));
    assert_eq!(s.images.len(), 4);
    assert_eq!(s.container_top, Some(120.0));
}

#[test]
fn invalid_entry_is_recreated() {
    let mut store = AnimationStateStore::new();
    let mut stale = live_state("roots", 4);
    stale.container_top = None;
    store.update("roots", stale);

    let s = store.get_or_create("roots");
    assert!(s.id.is_none());
    assert!(s.images.is_empty());
    assert!(store.get("roots").unwrap().images.is_empty());
    assert_eq!(store.len(), 1);
}

#[test]
fn copies_share_handles_with_the_store() {
    let mut store = AnimationStateStore::new();
    let mut s = live_state("roots", 3);
    let h = ImageHandle::pending("/seq/00001.jpg");
    s.set_image(FrameIndex(1), h.clone());
    store.update("roots", s);

    let copy = store.get_or_create("roots");
    h.complete(Ok(PreparedImage {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![0, 0, 0, 255]),
    }));
    assert!(copy.image(FrameIndex(1)).unwrap().is_ready());
    assert_eq!(store.get("roots").unwrap().ready_count(), 1);
}

#[test]
fn initialization_tracks_frame_count() {
    let mut s = AnimationState::default();
    assert!(!s.is_initialized(3));
    s.initialize("x", 3);
    assert!(s.is_initialized(3));
    assert!(!s.is_initialized(4));

    s.set_image(FrameIndex(9), ImageHandle::pending("ignored"));
    assert!(s.images.iter().all(Option::is_none));
}

#[test]
fn clear_drops_everything() {
    let mut store = AnimationStateStore::new();
    store.update("a", live_state("a", 2));
    store.update("b", live_state("b", 2));
    store.clear();
    assert!(store.is_empty());
    assert!(store.get("a").is_none());
}
