use shapecanvas::canvas::Canvas;
use shapecanvas::config::Config;
use shapecanvas::draw::{BLUE, GREEN, RED, Style};
use shapecanvas::input::shape_event::{CLICK, DRAG, DRAG_END, DRAG_START, DROP};
use shapecanvas::input::{MouseButton, PointerInput, ShapeEvent, listener};
use shapecanvas::scene::{Attrs, ShapeId};
use shapecanvas::shapes::{ArcShape, ImageShape, PathShape, PolygonShape, RectShape, TextShape};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

fn canvas() -> Canvas {
    Canvas::with_seed(&Config::default(), 2024).unwrap()
}

fn filled(x: f64, y: f64) -> Attrs {
    Attrs::at(x, y).style(Style::new().fill(RED))
}

fn log_events(canvas: &mut Canvas, id: ShapeId, label: &'static str, types: &[&str], log: &Log) {
    for event_type in types {
        let log = log.clone();
        canvas
            .on(
                id,
                *event_type,
                listener(move |_: &mut Canvas, event: &ShapeEvent| {
                    log.borrow_mut()
                        .push(format!("{label}:{}", event.event_type));
                    Ok(())
                }),
            )
            .unwrap();
    }
}

fn click(canvas: &mut Canvas, x: f64, y: f64) {
    canvas
        .handle_pointer(PointerInput::down(MouseButton::Left, x, y))
        .unwrap();
    canvas
        .handle_pointer(PointerInput::up(MouseButton::Left, x, y))
        .unwrap();
}

#[test]
fn every_primitive_is_hit_at_its_anchor() {
    let mut canvas = canvas();
    let image = cairo::ImageSurface::create(cairo::Format::ARgb32, 16, 16).unwrap();
    let shapes = vec![
        canvas.create(filled(50.0, 50.0), RectShape::new(20.0, 20.0)).unwrap(),
        canvas.create(filled(150.0, 50.0), ArcShape::circle(10.0)).unwrap(),
        canvas.create(filled(250.0, 50.0), PolygonShape::new(12.0, 5)).unwrap(),
        canvas
            .create(
                filled(350.0, 50.0),
                PathShape::default()
                    .move_to(-10.0, -10.0)
                    .line_to(10.0, -10.0)
                    .line_to(10.0, 10.0)
                    .line_to(-10.0, 10.0)
                    .close(),
            )
            .unwrap(),
        canvas
            .create(Attrs::at(450.0, 50.0), ImageShape::natural(image))
            .unwrap(),
    ];
    for &id in &shapes {
        canvas.add(id).unwrap();
    }

    let anchors = [
        (51.0, 51.0),
        (150.0, 50.0),
        (250.0, 50.0),
        (350.0, 50.0),
        (451.0, 51.0),
    ];
    for (&id, (x, y)) in shapes.iter().zip(anchors) {
        assert_eq!(canvas.hit_test(x, y).unwrap(), Some(id));
    }
    assert_eq!(canvas.hit_test(700.0, 500.0).unwrap(), None);
}

#[test]
fn text_is_hit_inside_its_layout_box() {
    let mut canvas = canvas();
    let text = canvas
        .create(
            Attrs::at(100.0, 100.0).style(
                Style::new()
                    .font(shapecanvas::draw::Font::new("Sans", 24.0))
                    .text_baseline(shapecanvas::draw::TextBaseline::Top),
            ),
            TextShape::new("Hello"),
        )
        .unwrap();
    canvas.add(text).unwrap();

    assert_eq!(canvas.hit_test(104.0, 106.0).unwrap(), Some(text));
    assert_eq!(canvas.hit_test(96.0, 96.0).unwrap(), None);
}

#[test]
fn topmost_shape_wins_and_removal_uncovers_the_one_below() {
    let mut canvas = canvas();
    let group = canvas.create_group(Attrs::default()).unwrap();
    canvas.add(group).unwrap();
    let a = canvas.create(filled(0.0, 0.0), RectShape::new(100.0, 100.0)).unwrap();
    let b = canvas
        .create(
            Attrs::at(50.0, 50.0).style(Style::new().fill(BLUE)),
            RectShape::new(100.0, 100.0),
        )
        .unwrap();
    canvas.group_add(group, a).unwrap();
    canvas.group_add(group, b).unwrap();

    assert_eq!(canvas.hit_test(75.0, 75.0).unwrap(), Some(b));
    assert!(canvas.group_remove(group, b).unwrap());
    assert_eq!(canvas.hit_test(75.0, 75.0).unwrap(), Some(a));
}

#[test]
fn re_adding_raises_a_shape_to_the_top() {
    let mut canvas = canvas();
    let a = canvas.create(filled(0.0, 0.0), RectShape::new(100.0, 100.0)).unwrap();
    let b = canvas.create(filled(50.0, 50.0), RectShape::new(100.0, 100.0)).unwrap();
    canvas.add(a).unwrap();
    canvas.add(b).unwrap();
    canvas.add(a).unwrap();

    assert_eq!(canvas.children(canvas.root()), &[b, a]);
    assert_eq!(canvas.hit_test(75.0, 75.0).unwrap(), Some(a));
}

#[test]
fn live_shapes_have_unique_colors() {
    let mut canvas = canvas();
    let mut ids = Vec::new();
    for i in 0..200 {
        let (x, y) = ((i % 20) as f64 * 30.0, (i / 20) as f64 * 30.0);
        let id = canvas
            .create(filled(x, y), RectShape::new(10.0, 10.0))
            .unwrap();
        canvas.add(id).unwrap();
        ids.push(id);
    }
    canvas.render().unwrap();

    let colors: HashSet<_> = ids.iter().map(|&id| canvas.hit_color(id).unwrap()).collect();
    assert_eq!(colors.len(), ids.len());
    for &id in &ids {
        let color = canvas.hit_color(id).unwrap();
        assert_eq!(canvas.hit_canvas().lookup(color), Some(id));
    }
}

#[test]
fn rendering_twice_is_pixel_identical() {
    let mut canvas = canvas();
    let group = canvas
        .create_group(Attrs::at(20.0, 20.0).style(Style::new().stroke(GREEN).line_width(3.0)))
        .unwrap();
    canvas.add(group).unwrap();
    for i in 0..5 {
        let id = canvas
            .create(filled(i as f64 * 40.0, 10.0), ArcShape::circle(15.0))
            .unwrap();
        canvas.group_add(group, id).unwrap();
    }

    canvas.render().unwrap();
    let visible = canvas.pixels().unwrap();
    let identification = canvas.hit_pixels().unwrap();
    canvas.render().unwrap();

    assert_eq!(canvas.pixels().unwrap(), visible);
    assert_eq!(canvas.hit_pixels().unwrap(), identification);
}

#[test]
fn drag_moves_shape_by_pointer_travel() {
    let mut canvas = canvas();
    let rect = canvas
        .create(filled(100.0, 100.0).draggable(true), RectShape::new(80.0, 80.0))
        .unwrap();
    canvas.add(rect).unwrap();
    let log = Log::default();
    log_events(&mut canvas, rect, "rect", &[DRAG_START, DRAG, DRAG_END, DROP, CLICK], &log);

    canvas
        .handle_pointer(PointerInput::down(MouseButton::Left, 120.0, 130.0))
        .unwrap();
    canvas.handle_pointer(PointerInput::moved(135.0, 150.0)).unwrap();
    canvas
        .handle_pointer(PointerInput::up(MouseButton::Left, 135.0, 150.0))
        .unwrap();

    assert_eq!(canvas.attrs(rect).unwrap().position(), (115.0, 120.0));
    assert_eq!(
        *log.borrow(),
        vec!["rect:dragstart", "rect:drag", "rect:dragend", "rect:drop"]
    );
}

#[test]
fn press_and_release_in_place_clicks_once() {
    let mut canvas = canvas();
    let rect = canvas
        .create(filled(0.0, 0.0).draggable(true), RectShape::new(50.0, 50.0))
        .unwrap();
    canvas.add(rect).unwrap();
    let log = Log::default();
    log_events(&mut canvas, rect, "rect", &[DRAG_START, DRAG, DRAG_END, DROP, CLICK], &log);

    click(&mut canvas, 20.0, 20.0);

    assert_eq!(*log.borrow(), vec!["rect:click"]);
}

#[test]
fn click_bubbles_inner_to_outer() {
    let mut canvas = canvas();
    let outer = canvas.create_group(Attrs::default()).unwrap();
    let inner = canvas.create_group(Attrs::default()).unwrap();
    let rect = canvas.create(filled(10.0, 10.0), RectShape::new(40.0, 40.0)).unwrap();
    canvas.add(outer).unwrap();
    canvas.group_add(outer, inner).unwrap();
    canvas.group_add(inner, rect).unwrap();

    let log = Log::default();
    let root = canvas.root();
    log_events(&mut canvas, root, "root", &[CLICK], &log);
    log_events(&mut canvas, outer, "outer", &[CLICK], &log);
    log_events(&mut canvas, inner, "inner", &[CLICK], &log);
    log_events(&mut canvas, rect, "rect", &[CLICK], &log);

    click(&mut canvas, 20.0, 20.0);

    assert_eq!(
        *log.borrow(),
        vec!["rect:click", "inner:click", "outer:click", "root:click"]
    );
}

#[test]
fn removed_shape_no_longer_reaches_ancestors() {
    let mut canvas = canvas();
    let group = canvas.create_group(Attrs::default()).unwrap();
    let rect = canvas.create(filled(0.0, 0.0), RectShape::new(40.0, 40.0)).unwrap();
    canvas.add(group).unwrap();
    canvas.group_add(group, rect).unwrap();

    let log = Log::default();
    log_events(&mut canvas, group, "group", &["custom"], &log);
    log_events(&mut canvas, rect, "rect", &["custom"], &log);

    canvas.group_remove(group, rect).unwrap();
    canvas
        .emit(rect, &ShapeEvent::custom("custom", rect))
        .unwrap();

    assert_eq!(*log.borrow(), vec!["rect:custom"]);
}

#[test]
fn detach_releases_color_and_reattach_assigns_a_fresh_one() {
    let mut canvas = canvas();
    let rect = canvas.create(filled(10.0, 10.0), RectShape::new(30.0, 30.0)).unwrap();
    canvas.add(rect).unwrap();
    canvas.render().unwrap();
    let first = canvas.hit_color(rect).unwrap();

    canvas.remove(rect).unwrap();
    assert_eq!(canvas.hit_color(rect), None);
    assert_eq!(canvas.hit_canvas().lookup(first), None);
    assert_eq!(canvas.hit_test(20.0, 20.0).unwrap(), None);

    canvas.add(rect).unwrap();
    assert_eq!(canvas.hit_test(20.0, 20.0).unwrap(), Some(rect));
    let second = canvas.hit_color(rect).unwrap();
    assert_eq!(canvas.hit_canvas().lookup(second), Some(rect));
}

#[test]
fn style_is_inherited_and_overridden() {
    let mut canvas = canvas();
    let group = canvas
        .create_group(Attrs::default().style(Style::new().fill(RED)))
        .unwrap();
    let plain = canvas.create(Attrs::at(0.0, 0.0), RectShape::new(10.0, 10.0)).unwrap();
    let blue = canvas
        .create(
            Attrs::at(20.0, 0.0).style(Style::new().fill(BLUE)),
            RectShape::new(10.0, 10.0),
        )
        .unwrap();
    canvas.add(group).unwrap();
    canvas.group_add(group, plain).unwrap();
    canvas.group_add(group, blue).unwrap();
    canvas.render().unwrap();

    // Premultiplied ARGB, opaque.
    assert_eq!(canvas.pixel(5, 5).unwrap(), Some(0xffff0000));
    assert_eq!(canvas.pixel(25, 5).unwrap(), Some(0xff0000ff));
}

#[test]
fn background_fills_visible_target_only() {
    let mut config = Config::default();
    config.surface.background = Some(shapecanvas::config::ColorSpec::Name("white".into()));
    let mut canvas = Canvas::with_seed(&config, 5).unwrap();
    canvas.render().unwrap();

    assert_eq!(canvas.pixel(3, 3).unwrap(), Some(0xffffffff));
    assert_eq!(canvas.hit_test(3.0, 3.0).unwrap(), None);
}
