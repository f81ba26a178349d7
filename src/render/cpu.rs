use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::assets::handle::PreparedImage;
use crate::foundation::core::Canvas;
use crate::foundation::error::{SequenceError, SequenceResult};
use crate::render::surface::{DrawSurface, FrameRGBA};

/// CPU canvas backed by a `vello_cpu` pixmap.
pub struct PixmapSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    draws: u64,
}

impl PixmapSurface {
    pub fn new(canvas: Canvas) -> SequenceResult<Self> {
        if canvas.is_empty() {
            return Err(SequenceError::initialization(
                "canvas has no drawing area",
            ));
        }
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SequenceError::validation("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SequenceError::validation("canvas height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            draws: 0,
        })
    }

    /// Number of successful draws since creation.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Snapshot of the current canvas contents (premultiplied).
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Write the canvas as a straight-alpha PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> SequenceResult<()> {
        let path = path.as_ref();
        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        image::save_buffer_with_format(
            path,
            &data,
            u32::from(self.width),
            u32::from(self.height),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

impl DrawSurface for PixmapSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn draw_image(&mut self, image: &PreparedImage, x: f64, y: f64) -> SequenceResult<()> {
        let pixmap =
            image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        let iw = f64::from(image.width);
        let ih = f64::from(image.height);
        let sx = f64::from(self.width) / iw;
        let sy = f64::from(self.height) / ih;

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(
            vello_cpu::kurbo::Affine::translate((x, y))
                * vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy),
        );
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        self.draws += 1;
        Ok(())
    }
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> SequenceResult<vello_cpu::Pixmap> {
    if width == 0 || height == 0 {
        return Err(SequenceError::render("image has no pixels"));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| SequenceError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SequenceError::render("image height exceeds u16"))?;
    let expected_len = Canvas { width, height }.rgba8_len();
    if rgba8_premul.len() != expected_len {
        return Err(SequenceError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
