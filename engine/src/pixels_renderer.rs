use pixels::Pixels;

use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::{Surface, SurfaceSize};

/// The window's rendering context: a `pixels` surface plus its current size.
///
/// Built once at startup and owned by `AppContext`; everything that draws gets it passed in.
pub struct PixelsRenderer2d {
    pixels: Pixels,
    size: SurfaceSize,
}

impl PixelsRenderer2d {
    pub fn new(mut pixels: Pixels, size: SurfaceSize) -> Result<Self, pixels::Error> {
        pixels.resize_buffer(size.width, size.height)?;
        Ok(Self { pixels, size })
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    pub fn draw_frame<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut dyn Renderer2d) -> R,
    {
        let mut cpu = CpuRenderer::new(self.pixels.frame_mut(), self.size);
        cpu.begin_frame(self.size);
        f(&mut cpu)
    }
}

/// Resizes the backing store and only then records the new size, so a failed resize leaves
/// `current` matching the buffer that is still there. A minimised window reports 0x0; that keeps
/// the last usable buffer.
fn commit_resize<E>(
    current: &mut SurfaceSize,
    requested: SurfaceSize,
    resize_backing: impl FnOnce(SurfaceSize) -> Result<(), E>,
) -> Result<(), E> {
    if requested.is_empty() {
        return Ok(());
    }
    resize_backing(requested)?;
    *current = requested;
    Ok(())
}

impl Surface for PixelsRenderer2d {
    type Error = pixels::Error;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn frame_mut(&mut self) -> &mut [u8] {
        self.pixels.frame_mut()
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), Self::Error> {
        let pixels = &mut self.pixels;
        commit_resize(&mut self.size, size, |s| -> Result<(), pixels::Error> {
            pixels.resize_surface(s.width, s.height)?;
            pixels.resize_buffer(s.width, s.height)?;
            Ok(())
        })
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.pixels.render()
    }
}
