//! Off-screen identification target used for pointer hit testing.
//!
//! Every live primitive is painted here as a flat silhouette in a color unique
//! to it. Resolving a pointer is a single pixel read followed by a registry
//! lookup; the last silhouette drawn over a pixel owns it, which gives
//! topmost-wins semantics without sorting.
//!
//! Readback is exact-match only. The target is drawn without antialiasing and
//! any pixel that is not fully opaque counts as background.

use crate::draw::{HitColor, render};
use crate::error::{Result, SceneError};
use crate::scene::ShapeId;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

pub struct HitCanvas {
    surface: cairo::ImageSurface,
    registry: HashMap<HitColor, ShapeId>,
    rng: StdRng,
}

impl std::fmt::Debug for HitCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitCanvas")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .field("registered", &self.registry.len())
            .finish()
    }
}

impl HitCanvas {
    /// Allocates a transparent target of `width` x `height` device pixels.
    ///
    /// Fails when Cairo cannot allocate the raster; there is no fallback.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Same as [`HitCanvas::new`] with a deterministic color sequence.
    pub fn with_seed(width: i32, height: i32, seed: u64) -> Result<Self> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: i32, height: i32, rng: StdRng) -> Result<Self> {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
            .map_err(|source| SceneError::SurfaceCreation {
                target: "identification",
                width,
                height,
                source,
            })?;
        debug!("Created identification surface {width}x{height}");
        Ok(Self {
            surface,
            registry: HashMap::new(),
            rng,
        })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Drawing context for the identification pass.
    ///
    /// Antialiasing is off so silhouette edges never blend into colors that
    /// belong to nobody. Drop the context before calling [`HitCanvas::query`].
    pub fn context(&self) -> Result<cairo::Context> {
        let ctx = cairo::Context::new(&self.surface)?;
        ctx.set_antialias(cairo::Antialias::None);
        Ok(ctx)
    }

    /// Ensures `id` owns a registered color and returns it.
    ///
    /// `current` is the color the shape already holds; it is kept when the
    /// registry still maps it to `id`. Otherwise a fresh color is drawn until
    /// one is found that no live shape uses.
    pub fn assign(&mut self, id: ShapeId, current: Option<HitColor>) -> HitColor {
        if let Some(color) = current {
            if self.registry.get(&color) == Some(&id) {
                return color;
            }
        }

        loop {
            let color = HitColor::new(self.rng.r#gen(), self.rng.r#gen(), self.rng.r#gen());
            match self.registry.entry(color) {
                Entry::Vacant(slot) => {
                    slot.insert(id);
                    trace!("Assigned {color} to {id:?}");
                    return color;
                }
                Entry::Occupied(_) => trace!("Color {color} already taken, regenerating"),
            }
        }
    }

    /// Frees `color` if it is registered to `id`.
    pub fn release(&mut self, id: ShapeId, color: HitColor) -> bool {
        if self.registry.get(&color) == Some(&id) {
            self.registry.remove(&color);
            trace!("Released {color} from {id:?}");
            true
        } else {
            false
        }
    }

    pub fn lookup(&self, color: HitColor) -> Option<ShapeId> {
        self.registry.get(&color).copied()
    }

    pub fn registered(&self) -> usize {
        self.registry.len()
    }

    /// Color of the device pixel at (`x`, `y`).
    ///
    /// Returns `None` outside the target and for pixels that are not fully
    /// opaque.
    pub fn query(&mut self, x: i32, y: i32) -> Result<Option<HitColor>> {
        let Some(argb) = read_pixel(&mut self.surface, x, y)? else {
            return Ok(None);
        };
        if argb >> 24 != 0xff {
            return Ok(None);
        }
        Ok(Some(HitColor::new(
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
        )))
    }

    /// Shape whose silhouette covers device pixel (`x`, `y`), if any.
    pub fn shape_at(&mut self, x: i32, y: i32) -> Result<Option<ShapeId>> {
        Ok(self.query(x, y)?.and_then(|color| self.lookup(color)))
    }

    /// Resets every pixel to transparent. Registered colors are kept.
    pub fn clear(&self) -> Result<()> {
        let ctx = self.context()?;
        render::clear_surface(&ctx)?;
        Ok(())
    }

    pub fn pixels(&mut self) -> Result<Vec<u8>> {
        snapshot(&mut self.surface)
    }
}

/// Reads one premultiplied ARGB pixel, `None` when outside the surface.
pub(crate) fn read_pixel(surface: &mut cairo::ImageSurface, x: i32, y: i32) -> Result<Option<u32>> {
    if x < 0 || y < 0 || x >= surface.width() || y >= surface.height() {
        return Ok(None);
    }
    surface.flush();
    let stride = surface.stride() as usize;
    let data = surface.data()?;
    let offset = y as usize * stride + x as usize * 4;
    let bytes = [
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ];
    Ok(Some(u32::from_ne_bytes(bytes)))
}

/// Copy of the raw pixel buffer, for comparing two renders.
pub(crate) fn snapshot(surface: &mut cairo::ImageSurface) -> Result<Vec<u8>> {
    surface.flush();
    let data = surface.data()?;
    Ok(data.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(count: usize) -> Vec<ShapeId> {
        let mut map: SlotMap<ShapeId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn assign_is_stable_for_registered_color() {
        let mut hit = HitCanvas::with_seed(10, 10, 7).unwrap();
        let id = ids(1)[0];
        let color = hit.assign(id, None);
        assert_eq!(hit.assign(id, Some(color)), color);
        assert_eq!(hit.registered(), 1);
        assert_eq!(hit.lookup(color), Some(id));
    }

    #[test]
    fn assigned_colors_are_unique() {
        let mut hit = HitCanvas::with_seed(10, 10, 1).unwrap();
        let colors: std::collections::HashSet<_> =
            ids(500).into_iter().map(|id| hit.assign(id, None)).collect();
        assert_eq!(colors.len(), 500);
        assert_eq!(hit.registered(), 500);
    }

    #[test]
    fn color_owned_by_another_shape_is_replaced() {
        let mut hit = HitCanvas::with_seed(10, 10, 3).unwrap();
        let shapes = ids(2);
        let first = hit.assign(shapes[0], None);
        let second = hit.assign(shapes[1], Some(first));
        assert_ne!(first, second);
        assert_eq!(hit.lookup(first), Some(shapes[0]));
    }

    #[test]
    fn release_only_frees_own_color() {
        let mut hit = HitCanvas::with_seed(10, 10, 5).unwrap();
        let shapes = ids(2);
        let color = hit.assign(shapes[0], None);
        assert!(!hit.release(shapes[1], color));
        assert!(hit.release(shapes[0], color));
        assert_eq!(hit.lookup(color), None);
    }

    #[test]
    fn query_reads_back_painted_color_exactly() {
        let mut hit = HitCanvas::with_seed(20, 20, 9).unwrap();
        let id = ids(1)[0];
        let color = hit.assign(id, None);
        {
            let ctx = hit.context().unwrap();
            render::paint_rect_silhouette(&ctx, color, 5.0, 5.0, 10.0, 10.0).unwrap();
        }
        assert_eq!(hit.query(8, 8).unwrap(), Some(color));
        assert_eq!(hit.shape_at(8, 8).unwrap(), Some(id));
        assert_eq!(hit.query(1, 1).unwrap(), None);
    }

    #[test]
    fn out_of_bounds_query_is_not_an_error() {
        let mut hit = HitCanvas::with_seed(20, 20, 9).unwrap();
        assert_eq!(hit.query(-1, 3).unwrap(), None);
        assert_eq!(hit.query(20, 3).unwrap(), None);
        assert_eq!(hit.query(3, 400).unwrap(), None);
    }

    #[test]
    fn clear_keeps_registry_but_wipes_pixels() {
        let mut hit = HitCanvas::with_seed(20, 20, 11).unwrap();
        let id = ids(1)[0];
        let color = hit.assign(id, None);
        {
            let ctx = hit.context().unwrap();
            render::paint_rect_silhouette(&ctx, color, 0.0, 0.0, 20.0, 20.0).unwrap();
        }
        hit.clear().unwrap();
        assert_eq!(hit.query(10, 10).unwrap(), None);
        assert_eq!(hit.lookup(color), Some(id));
    }

    #[test]
    fn invalid_size_fails_construction() {
        let err = HitCanvas::new(-5, 10).unwrap_err();
        assert!(matches!(err, SceneError::SurfaceCreation { .. }));
    }
}
