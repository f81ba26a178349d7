use crate::assets::handle::PreparedImage;
use crate::foundation::error::SequenceResult;

/// A painted canvas as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Drawing capability the renderer paints frames onto.
///
/// Dimensions are fixed when the surface is created. `draw_image` fits the image to the full
/// `width × height` area with its top-left corner at `(x, y)`.
pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn draw_image(&mut self, image: &PreparedImage, x: f64, y: f64) -> SequenceResult<()>;
}
