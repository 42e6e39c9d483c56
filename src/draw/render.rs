//! Cairo-based painting helpers shared by every primitive.

use super::color::{Color, HitColor};
use super::style::Style;

/// Resets the whole surface to fully transparent.
///
/// Runs under an identity matrix inside save/restore, so any transform the
/// caller installed survives the clear.
pub fn clear_surface(ctx: &cairo::Context) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.identity_matrix();
    ctx.set_operator(cairo::Operator::Clear);
    ctx.paint()?;
    ctx.restore()
}

/// Fills the entire surface with a solid background color, if one is set.
///
/// Should be called after clearing the surface but before rendering shapes.
pub fn render_background(ctx: &cairo::Context, color: Option<Color>) -> Result<(), cairo::Error> {
    if let Some(bg) = color {
        ctx.save()?;
        ctx.identity_matrix();
        bg.apply(ctx, 1.0);
        ctx.paint()?;
        ctx.restore()?;
    }
    Ok(())
}

/// Paints a traced path with the effective style.
///
/// Order: drop shadow, stroke, fill. A shape with neither `stroke` nor `fill`
/// leaves no ink. `trace` must only build the path; it is called once per pass.
pub fn paint_path<F>(ctx: &cairo::Context, style: &Style, trace: F) -> Result<(), cairo::Error>
where
    F: Fn(&cairo::Context),
{
    if style.fill.is_none() && style.stroke.is_none() {
        return Ok(());
    }

    let opacity = style.effective_opacity();
    ctx.save()?;
    style.apply_line(ctx);

    if let Some(shadow) = style.shadow {
        ctx.save()?;
        ctx.translate(shadow.offset_x, shadow.offset_y);
        ctx.new_path();
        trace(ctx);
        shadow.color.apply(ctx, opacity);
        if style.fill.is_some() {
            ctx.fill_preserve()?;
        }
        if style.stroke.is_some() {
            ctx.stroke_preserve()?;
        }
        ctx.new_path();
        ctx.restore()?;
    }

    if let Some(stroke) = style.stroke {
        ctx.new_path();
        trace(ctx);
        stroke.apply(ctx, opacity);
        ctx.stroke()?;
    }

    if let Some(fill) = style.fill {
        ctx.new_path();
        trace(ctx);
        fill.apply(ctx, opacity);
        ctx.fill()?;
    }

    ctx.restore()
}

/// Paints the flat identification silhouette of a traced path.
///
/// The key color is used for both fill and stroke at full opacity, ignoring
/// the shape's own colors. `filled` is false for open geometry such as lines.
pub fn paint_silhouette<F>(
    ctx: &cairo::Context,
    color: HitColor,
    line_width: f64,
    filled: bool,
    trace: F,
) -> Result<(), cairo::Error>
where
    F: Fn(&cairo::Context),
{
    ctx.save()?;
    ctx.new_path();
    trace(ctx);
    color.apply(ctx);
    if filled {
        ctx.fill_preserve()?;
    }
    if line_width > 0.0 {
        ctx.set_line_width(line_width);
        ctx.set_line_cap(cairo::LineCap::Butt);
        ctx.set_line_join(cairo::LineJoin::Miter);
        ctx.set_dash(&[], 0.0);
        ctx.stroke()?;
    }
    ctx.new_path();
    ctx.restore()
}

/// Paints a flat axis-aligned rectangle silhouette.
pub fn paint_rect_silhouette(
    ctx: &cairo::Context,
    color: HitColor,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    paint_silhouette(ctx, color, 0.0, true, |ctx| {
        ctx.rectangle(x, y, width, height);
    })
}

/// Composites another surface over the whole target at the given alpha.
pub fn composite_surface(
    ctx: &cairo::Context,
    surface: &cairo::ImageSurface,
    alpha: f64,
) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.identity_matrix();
    ctx.set_source_surface(surface, 0.0, 0.0)?;
    ctx.paint_with_alpha(alpha)?;
    ctx.restore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    fn pixel(surface: &mut cairo::ImageSurface, x: i32, y: i32) -> u32 {
        let stride = surface.stride() as usize;
        let data = surface.data().expect("exclusive surface");
        let offset = y as usize * stride + x as usize * 4;
        u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    }

    #[test]
    fn paint_path_without_colors_leaves_surface_empty() {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 20, 20).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        paint_path(&ctx, &Style::new(), |ctx| ctx.rectangle(0.0, 0.0, 20.0, 20.0)).unwrap();
        drop(ctx);
        assert_eq!(pixel(&mut surface, 10, 10), 0);
    }

    #[test]
    fn paint_path_fills_with_style_color() {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 20, 20).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        paint_path(&ctx, &Style::new().fill(RED), |ctx| {
            ctx.rectangle(0.0, 0.0, 20.0, 20.0)
        })
        .unwrap();
        drop(ctx);
        assert_eq!(pixel(&mut surface, 10, 10), 0xffff_0000);
    }

    #[test]
    fn clear_surface_preserves_transform() {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 20, 20).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.scale(2.0, 2.0);
        render_background(&ctx, Some(BLUE)).unwrap();
        clear_surface(&ctx).unwrap();
        assert_eq!(ctx.matrix(), cairo::Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0));
        drop(ctx);
        assert_eq!(pixel(&mut surface, 19, 19), 0);
    }

    #[test]
    fn silhouette_uses_exact_key_color() {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 20, 20).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_antialias(cairo::Antialias::None);
        paint_rect_silhouette(&ctx, HitColor::new(17, 34, 51), 0.0, 0.0, 10.0, 10.0).unwrap();
        drop(ctx);
        assert_eq!(pixel(&mut surface, 5, 5), 0xff11_2233);
        assert_eq!(pixel(&mut surface, 15, 15), 0);
    }
}
