//! Raster image blitted into a destination rectangle.

use super::Primitive;
use crate::draw::{HitColor, Style, render};
use std::any::Any;
use std::fmt;
use std::fs::File;
use std::path::Path;

/// Image drawn with its top-left corner at the anchor, scaled to
/// `width` x `height`.
#[derive(Clone)]
pub struct ImageShape {
    pub image: cairo::ImageSurface,
    pub width: f64,
    pub height: f64,
}

impl fmt::Debug for ImageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageShape")
            .field("source", &(self.image.width(), self.image.height()))
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl ImageShape {
    pub fn new(image: cairo::ImageSurface, width: f64, height: f64) -> Self {
        Self {
            image,
            width,
            height,
        }
    }

    /// Image drawn at its natural pixel size.
    pub fn natural(image: cairo::ImageSurface) -> Self {
        let (width, height) = (image.width() as f64, image.height() as f64);
        Self::new(image, width, height)
    }

    /// Loads a PNG file at its natural size.
    pub fn from_png(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|err| anyhow::anyhow!("Failed to open image {}: {err}", path.display()))?;
        let image = cairo::ImageSurface::create_from_png(&mut file)
            .map_err(|err| anyhow::anyhow!("Failed to decode PNG {}: {err}", path.display()))?;
        Ok(Self::natural(image))
    }
}

impl Primitive for ImageShape {
    fn kind(&self) -> &'static str {
        "image"
    }

    fn trace(&self, ctx: &cairo::Context, x: f64, y: f64) {
        ctx.rectangle(x, y, self.width, self.height);
    }

    fn render(
        &self,
        ctx: &cairo::Context,
        x: f64,
        y: f64,
        style: &Style,
    ) -> Result<(), cairo::Error> {
        let (source_w, source_h) = (self.image.width() as f64, self.image.height() as f64);
        if source_w <= 0.0 || source_h <= 0.0 || self.width <= 0.0 || self.height <= 0.0 {
            return Ok(());
        }

        ctx.save()?;
        ctx.translate(x, y);
        ctx.scale(self.width / source_w, self.height / source_h);
        ctx.rectangle(0.0, 0.0, source_w, source_h);
        ctx.clip();
        ctx.set_source_surface(&self.image, 0.0, 0.0)?;
        ctx.paint_with_alpha(style.effective_opacity())?;
        ctx.restore()
    }

    fn render_hit(
        &self,
        ctx: &cairo::Context,
        x: f64,
        y: f64,
        _style: &Style,
        color: HitColor,
        _stroke_padding: f64,
    ) -> Result<(), cairo::Error> {
        render::paint_rect_silhouette(ctx, color, x, y, self.width, self.height)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_size_matches_source() {
        let source = cairo::ImageSurface::create(cairo::Format::ARgb32, 12, 7).unwrap();
        let image = ImageShape::natural(source);
        assert_eq!((image.width, image.height), (12.0, 7.0));
    }

    #[test]
    fn missing_png_reports_path() {
        let err = ImageShape::from_png("/nonexistent/picture.png").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/picture.png"));
    }
}
