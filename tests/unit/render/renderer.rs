use std::sync::Arc;

use super::*;
use crate::assets::handle::PreparedImage;
use crate::foundation::error::{SequenceError, SequenceResult};

#[derive(Default)]
struct RecordingSurface {
    drawn: Vec<(u32, u32, f64, f64)>,
    reject: bool,
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> u32 {
        4
    }

    fn height(&self) -> u32 {
        4
    }

    fn draw_image(&mut self, image: &PreparedImage, x: f64, y: f64) -> SequenceResult<()> {
        if self.reject {
            return Err(SequenceError::render("context lost"));
        }
        self.drawn.push((image.width, image.height, x, y));
        Ok(())
    }
}

fn img() -> PreparedImage {
    PreparedImage {
        width: 3,
        height: 2,
        rgba8_premul: Arc::new(vec![0; 24]),
    }
}

#[test]
fn ready_handle_is_drawn_at_origin() {
    let mut s = RecordingSurface::default();
    let h = ImageHandle::ready("a", img());
    assert_eq!(draw(&mut s, &h), DrawOutcome::Drawn);
    assert_eq!(s.drawn, vec![(3, 2, 0.0, 0.0)]);
}

#[test]
fn pending_and_failed_handles_are_not_drawn() {
    let mut s = RecordingSurface::default();
    let pending = ImageHandle::pending("a");
    assert_eq!(draw(&mut s, &pending), DrawOutcome::NotReady);

    let failed = ImageHandle::pending("b");
    failed.complete(Err(SequenceError::load("404")));
    assert_eq!(draw(&mut s, &failed), DrawOutcome::NotReady);
    assert!(s.drawn.is_empty());
}

#[test]
fn surface_errors_are_suppressed() {
    let mut s = RecordingSurface {
        reject: true,
        ..Default::default()
    };
    let h = ImageHandle::ready("a", img());
    let outcome = draw(&mut s, &h);
    assert_eq!(outcome, DrawOutcome::Suppressed);
    assert!(!outcome.is_drawn());
}
