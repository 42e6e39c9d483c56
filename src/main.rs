use anyhow::Context;
use clap::Parser;
use shapecanvas::canvas::Canvas;
use shapecanvas::config::Config;
use shapecanvas::draw::{BLACK, BLUE, Color, Font, GREEN, ORANGE, Shadow, Style, TextAlign};
use shapecanvas::input::shape_event::CLICK;
use shapecanvas::input::{MouseButton, PointerInput, ShapeEvent, listener};
use shapecanvas::scene::{Attrs, ShapeId};
use shapecanvas::shapes::{ArcShape, LineShape, PathShape, PolygonShape, RectShape, TextShape};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "shapecanvas")]
#[command(
    version,
    about = "Retained-mode 2D scene graph with color-keyed hit testing"
)]
struct Cli {
    /// Write the rendered demo scene to this PNG file
    #[arg(long, short = 'o', value_name = "PNG")]
    output: Option<PathBuf>,

    /// Write the identification surface to this PNG file
    #[arg(long, value_name = "PNG")]
    hit_output: Option<PathBuf>,

    /// Replay a left click at logical coordinates X,Y and report the shape hit
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    click: Option<(f64, f64)>,

    /// Read settings from this TOML file instead of the default location
    #[arg(long, short = 'c', value_name = "TOML")]
    config: Option<PathBuf>,
}

fn parse_point(value: &str) -> Result<(f64, f64), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|err| format!("invalid coordinate '{part}': {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}

/// Adds a named shape to `group`; the name is stored as user data.
fn add_named(
    canvas: &mut Canvas,
    group: ShapeId,
    name: &'static str,
    attrs: Attrs,
    primitive: impl shapecanvas::shapes::Primitive,
) -> anyhow::Result<ShapeId> {
    let id = canvas.create(attrs, primitive)?;
    canvas.set_data(id, name)?;
    canvas.group_add(group, id)?;
    Ok(id)
}

fn build_demo_scene(canvas: &mut Canvas) -> anyhow::Result<()> {
    let panel = canvas.create_group(
        Attrs::at(40.0, 40.0).style(Style::new().line_width(2.0)),
    )?;
    canvas.add(panel)?;

    add_named(
        canvas,
        panel,
        "card",
        Attrs::at(0.0, 0.0).style(
            Style::new()
                .fill(Color::from_rgb8(250, 245, 230))
                .shadow(Shadow::new(Color::new(0.0, 0.0, 0.0, 0.3), 6.0, 4.0, 4.0)),
        ),
        RectShape::new(320.0, 220.0).with_radius([12.0; 4]),
    )?;
    add_named(
        canvas,
        panel,
        "dot",
        Attrs::at(80.0, 80.0).style(Style::new().fill(BLUE)).draggable(true),
        ArcShape::circle(36.0),
    )?;
    add_named(
        canvas,
        panel,
        "hexagon",
        Attrs::at(220.0, 80.0).style(Style::new().fill(GREEN)).draggable(true),
        PolygonShape::new(40.0, 6),
    )?;
    add_named(
        canvas,
        panel,
        "divider",
        Attrs::at(20.0, 150.0).style(Style::new().stroke(BLACK).line_width(3.0)),
        LineShape::new(280.0, 0.0),
    )?;
    add_named(
        canvas,
        panel,
        "arrow",
        Attrs::at(140.0, 40.0).style(Style::new().fill(ORANGE)),
        PathShape::default()
            .move_to(0.0, 20.0)
            .line_to(24.0, 20.0)
            .line_to(24.0, 8.0)
            .line_to(44.0, 30.0)
            .line_to(24.0, 52.0)
            .line_to(24.0, 40.0)
            .line_to(0.0, 40.0)
            .close(),
    )?;
    add_named(
        canvas,
        panel,
        "caption",
        Attrs::at(160.0, 190.0).style(
            Style::new()
                .fill(BLACK)
                .font(Font::new("Sans", 18.0).bold())
                .text_align(TextAlign::Center),
        ),
        TextShape::new("Click or drag a shape").with_max_width(280.0),
    )?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut canvas = Canvas::new(&config).context("Failed to create canvas")?;
    build_demo_scene(&mut canvas)?;
    canvas.render()?;
    log::info!(
        "Rendered demo scene at {}x{} (pixel ratio {})",
        canvas.width(),
        canvas.height(),
        canvas.pixel_ratio()
    );

    if let Some((x, y)) = cli.click {
        let clicked: Rc<RefCell<Option<String>>> = Rc::default();
        let sink = clicked.clone();
        let root = canvas.root();
        canvas.on(
            root,
            CLICK,
            listener(move |canvas: &mut Canvas, event: &ShapeEvent| {
                let name = canvas
                    .data::<&'static str>(event.target)
                    .copied()
                    .unwrap_or("unnamed");
                *sink.borrow_mut() = Some(name.to_string());
                Ok(())
            }),
        )?;

        canvas.handle_pointer(PointerInput::down(MouseButton::Left, x, y))?;
        canvas.handle_pointer(PointerInput::up(MouseButton::Left, x, y))?;

        match clicked.borrow().as_deref() {
            Some(name) => println!("clicked: {name}"),
            None => println!("clicked: nothing"),
        }
    }

    if let Some(path) = &cli.output {
        canvas
            .write_png(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("wrote {}", path.display());
    }

    if let Some(path) = &cli.hit_output {
        canvas
            .write_hit_png(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("wrote {}", path.display());
    }

    if cli.output.is_none() && cli.hit_output.is_none() && cli.click.is_none() {
        println!("shapecanvas: retained-mode scene graph demo");
        println!();
        println!("Usage:");
        println!("  shapecanvas --output scene.png       Render the demo scene");
        println!("  shapecanvas --hit-output hit.png     Dump the identification surface");
        println!("  shapecanvas --click 120,120          Click a point and name the shape hit");
        println!("  shapecanvas --help                   Show help");
    }

    Ok(())
}
