use super::*;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(rgba.repeat((w * h) as usize)),
    }
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn surface_has_fixed_canvas_size() {
    let s = PixmapSurface::new(Canvas {
        width: 16,
        height: 9,
    })
    .unwrap();
    assert_eq!((s.width(), s.height()), (16, 9));
    let f = s.frame();
    assert_eq!(f.data.len(), 16 * 9 * 4);
    assert!(f.premultiplied);
    assert!(f.data.iter().all(|&b| b == 0));
}

#[test]
fn rejects_empty_and_oversized_canvases() {
    assert!(
        PixmapSurface::new(Canvas {
            width: 0,
            height: 4
        })
        .is_err()
    );
    assert!(
        PixmapSurface::new(Canvas {
            width: 70_000,
            height: 4
        })
        .is_err()
    );
}

#[test]
fn draw_fills_the_canvas_with_the_frame() {
    let mut s = PixmapSurface::new(Canvas {
        width: 8,
        height: 8,
    })
    .unwrap();
    s.draw_image(&solid(2, 2, [255, 0, 0, 255]), 0.0, 0.0)
        .unwrap();
    assert_eq!(s.draws(), 1);

    let f = s.frame();
    let center = pixel(&f, 4, 4);
    assert!(center[0] > 200, "red channel {center:?}");
    assert_eq!(center[3], 255);
}

#[test]
fn malformed_images_are_render_errors() {
    let mut s = PixmapSurface::new(Canvas {
        width: 4,
        height: 4,
    })
    .unwrap();
    let broken = PreparedImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new(vec![0; 3]),
    };
    let err = s.draw_image(&broken, 0.0, 0.0).unwrap_err();
    assert!(err.to_string().contains("render error:"));

    let empty = PreparedImage {
        width: 0,
        height: 0,
        rgba8_premul: Arc::new(Vec::new()),
    };
    assert!(s.draw_image(&empty, 0.0, 0.0).is_err());
    assert_eq!(s.draws(), 0);
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let mut px = [64u8, 32, 0, 128, 10, 20, 30, 255, 5, 5, 5, 0];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[128, 64, 0, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..], &[5, 5, 5, 0]);
}
