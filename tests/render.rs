use std::rc::Rc;

use shotmark::background::Raster;
use shotmark::draw::{Annotation, FixedAdvanceMetrics};
use shotmark::{Editor, EditorSettings, InputEvent, Tool};

const BLACK: u32 = 0xFF00_0000;

fn png(width: i32, height: i32, gray: f64) -> Vec<u8> {
    let surface = cairo::ImageSurface::create(cairo::Format::Rgb24, width, height).unwrap();
    {
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgb(gray, gray, gray);
        ctx.paint().unwrap();
    }
    let mut png = Vec::new();
    surface.write_to_png(&mut png).unwrap();
    png
}

fn editor_on(background: Vec<u8>, max_width: u32, max_height: u32) -> Editor {
    let settings = EditorSettings {
        max_width,
        max_height,
        ..EditorSettings::default()
    };
    let mut editor = Editor::with_metrics(settings, Rc::new(FixedAdvanceMetrics::default()));
    let raster = Raster::decode_png(&background).unwrap();
    editor.attach_background(Ok(raster)).unwrap();
    editor
}

fn make_editor() -> Editor {
    editor_on(png(200, 100, 0.0), 1600, 1000)
}

fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
    editor.handle_event(InputEvent::PointerDown { x: from.0, y: from.1 });
    editor.handle_event(InputEvent::PointerMove { x: to.0, y: to.1 });
    editor.handle_event(InputEvent::PointerUp { x: to.0, y: to.1 });
}

fn click(editor: &mut Editor, x: f64, y: f64) {
    editor.handle_event(InputEvent::PointerDown { x, y });
    editor.handle_event(InputEvent::PointerUp { x, y });
}

fn add_label(editor: &mut Editor, x: f64, y: f64, text: &str) {
    editor.handle_event(InputEvent::SetTool { tool: Tool::Text });
    click(editor, x, y);
    editor.handle_event(InputEvent::Type {
        text: text.to_string(),
    });
    editor.handle_event(InputEvent::Commit);
}

/// What the host would show: the editor painted onto a display-sized surface.
fn on_screen(editor: &mut Editor) -> Raster {
    let viewport = *editor.viewport().unwrap();
    let surface = cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        viewport.display_width as i32,
        viewport.display_height as i32,
    )
    .unwrap();
    {
        let ctx = cairo::Context::new(&surface).unwrap();
        editor.paint(&ctx).unwrap();
    }
    surface.flush();
    Raster::from_surface(&surface).unwrap()
}

fn exported(editor: &mut Editor) -> Raster {
    Raster::decode_png(&editor.finalize("").unwrap().png).unwrap()
}

fn channels(pixel: u32) -> (u32, u32, u32) {
    ((pixel >> 16) & 0xFF, (pixel >> 8) & 0xFF, pixel & 0xFF)
}

fn is_gray(pixel: u32) -> bool {
    let (r, g, b) = channels(pixel);
    r == g && g == b
}

#[test]
fn export_contains_rectangle_stroke() {
    let mut editor = make_editor();
    editor.handle_event(InputEvent::SetTool { tool: Tool::Rect });
    drag(&mut editor, (20.0, 20.0), (80.0, 60.0));

    let output = exported(&mut editor);

    let (r, g, b) = channels(output.pixel(50, 20).unwrap());
    assert!(r > 200, "red channel {r}");
    assert!(g < 100 && b < 100, "green {g} blue {b}");

    assert_eq!(output.pixel(50, 40), Some(BLACK));
    assert_eq!(output.pixel(150, 80), Some(BLACK));
}

#[test]
fn selection_is_drawn_live_but_not_exported() {
    let mut editor = make_editor();
    editor.handle_event(InputEvent::SetTool { tool: Tool::Rect });
    drag(&mut editor, (20.0, 20.0), (80.0, 60.0));
    editor.handle_event(InputEvent::SetTool { tool: Tool::Select });
    click(&mut editor, 50.0, 40.0);
    assert_eq!(editor.frame().selected(), Some(0));

    let view = on_screen(&mut editor);
    let (r, g, b) = channels(view.pixel(37, 17).unwrap());
    assert!(r > 200 && g > 200 && b > 200, "selection outline missing");

    // Shapes never leak into the background layer
    let background = Raster::from_surface(editor.renderer().unwrap().background()).unwrap();
    assert_eq!(background.pixel(37, 17), Some(BLACK));
    assert_eq!(background.pixel(50, 20), Some(BLACK));

    let output = exported(&mut editor);
    assert_eq!(output.pixel(37, 17), Some(BLACK));
    assert_eq!(editor.frame().selected(), Some(0));
}

#[test]
fn on_screen_view_is_scaled_to_display_size() {
    let mut editor = editor_on(png(400, 200, 0.0), 200, 100);
    editor.handle_event(InputEvent::SetTool { tool: Tool::Rect });
    editor.handle_event(InputEvent::SetStrokeWidth { width: 10 });
    drag(&mut editor, (10.0, 10.0), (40.0, 30.0));

    let view = on_screen(&mut editor);
    assert_eq!((view.width(), view.height()), (200, 100));

    // Native stroke spans y 15..25, shown at half size
    let (r, g, _) = channels(view.pixel(25, 10).unwrap());
    assert!(r > 200 && g < 100);
    assert_eq!(view.pixel(150, 80), Some(BLACK));

    let output = exported(&mut editor);
    assert_eq!((output.width(), output.height()), (400, 200));
    let (r, _, _) = channels(output.pixel(50, 20).unwrap());
    assert!(r > 200);
}

#[test]
fn arrowhead_is_filled() {
    let mut editor = make_editor();
    editor.handle_event(InputEvent::SetTool { tool: Tool::Arrow });
    drag(&mut editor, (20.0, 50.0), (180.0, 50.0));

    let output = exported(&mut editor);

    // Head is 15px long at stroke 3; its half-height is about 4px here,
    // while the shaft only covers y 48.5..51.5
    let (r, g, _) = channels(output.pixel(170, 52).unwrap());
    assert!(r > 200 && g < 100, "head pixel not filled");
    assert_eq!(output.pixel(170, 57), Some(BLACK));
    assert_eq!(output.pixel(150, 53), Some(BLACK));
}

#[test]
fn arrow_selection_is_two_pixels_wider() {
    let mut editor = make_editor();
    editor.handle_event(InputEvent::SetTool { tool: Tool::Arrow });
    editor.handle_event(InputEvent::SetStrokeWidth { width: 9 });
    drag(&mut editor, (20.0, 50.0), (180.0, 50.0));
    editor.handle_event(InputEvent::SetTool { tool: Tool::Select });
    click(&mut editor, 60.0, 50.0);
    assert_eq!(editor.frame().selected(), Some(0));

    let view = on_screen(&mut editor);

    // Decoration is 11px wide (44.5..55.5), the shaft 9px (45.5..54.5)
    let edge = view.pixel(62, 44).unwrap();
    assert!(is_gray(edge), "expected white half-coverage, got {edge:#x}");
    assert!(channels(edge).0 > 64);
    assert_eq!(view.pixel(62, 43), Some(BLACK));

    let output = exported(&mut editor);
    assert_eq!(output.pixel(62, 44), Some(BLACK));
    let (r, _, _) = channels(output.pixel(62, 46).unwrap());
    assert!(r > 200);
}

#[test]
fn text_selection_box_follows_hit_bounds() {
    let mut editor = make_editor();
    add_label(&mut editor, 40.0, 60.0, "Hi");
    editor.handle_event(InputEvent::SetTool { tool: Tool::Select });
    click(&mut editor, 45.0, 55.0);
    assert_eq!(editor.frame().selected(), Some(0));

    let bounds =
        Annotation::text_bounds(40.0, 60.0, "Hi", 16.0, &FixedAdvanceMetrics::default());
    let (left, top) = (bounds.x as u32, bounds.y as u32);
    assert_eq!((left, top), (35, 40));

    let view = on_screen(&mut editor);

    // 1px dashed line on y = 40: 3 on, 2 off, starting at the left edge
    let dash = view.pixel(left + 1, top).unwrap();
    assert!(is_gray(dash) && channels(dash).0 > 64, "dash missing: {dash:#x}");
    assert_eq!(view.pixel(left + 3, top), Some(BLACK));
    assert_eq!(view.pixel(left + 1, top + 2), Some(BLACK));

    let output = exported(&mut editor);
    assert_eq!(output.pixel(left + 1, top), Some(BLACK));
}

#[test]
fn text_has_offset_shadow() {
    let mut editor = editor_on(png(200, 100, 1.0), 1600, 1000);
    editor.handle_event(InputEvent::SetColor {
        color: "#0000ff".to_string(),
    });
    editor.handle_event(InputEvent::SetFontSize { size: 48.0 });
    add_label(&mut editor, 20.0, 80.0, "HH");

    let output = exported(&mut editor);

    // Pure grays can only come from the shadow; blue-dominant pixels are the
    // label itself. The shadow peeks out along the right and bottom edges.
    let mut shadow = (0.0, 0.0, 0u32);
    let mut label = (0.0, 0.0, 0u32);
    for y in 0..output.height() {
        for x in 0..output.width() {
            let pixel = output.pixel(x, y).unwrap();
            let (r, _, b) = channels(pixel);
            let bucket = if is_gray(pixel) && r < 250 {
                &mut shadow
            } else if b > r + 30 {
                &mut label
            } else {
                continue;
            };
            bucket.0 += x as f64;
            bucket.1 += y as f64;
            bucket.2 += 1;
        }
    }

    assert!(shadow.2 > 0, "no shadow pixels");
    assert!(label.2 > 0, "no label pixels");
    let mean = |(sx, sy, n): (f64, f64, u32)| (sx / n as f64, sy / n as f64);
    let (shadow_x, shadow_y) = mean(shadow);
    let (label_x, label_y) = mean(label);
    assert!(shadow_x > label_x, "shadow not offset right");
    assert!(shadow_y > label_y, "shadow not offset down");
}

#[test]
fn undo_and_clear_are_reflected_in_export() {
    let mut editor = make_editor();
    editor.handle_event(InputEvent::SetTool { tool: Tool::Arrow });
    drag(&mut editor, (10.0, 50.0), (190.0, 50.0));
    editor.handle_event(InputEvent::SetTool { tool: Tool::Rect });
    drag(&mut editor, (20.0, 20.0), (80.0, 60.0));
    editor.handle_event(InputEvent::Undo);
    assert_eq!(editor.frame().len(), 1);

    let output = exported(&mut editor);
    let (r, _, _) = channels(output.pixel(100, 50).unwrap());
    assert!(r > 200);
    assert_eq!(output.pixel(50, 20), Some(BLACK));

    editor.handle_event(InputEvent::Clear);
    let output = exported(&mut editor);
    assert_eq!(output.pixel(100, 50), Some(BLACK));
}

#[test]
fn stroke_width_and_color_apply_to_new_shapes_only() {
    let mut editor = make_editor();
    editor.handle_event(InputEvent::SetTool { tool: Tool::Rect });
    drag(&mut editor, (10.0, 10.0), (60.0, 60.0));
    editor.handle_event(InputEvent::SetColor {
        color: "#00ff00".to_string(),
    });
    editor.handle_event(InputEvent::SetStrokeWidth { width: 9 });
    drag(&mut editor, (100.0, 10.0), (180.0, 90.0));

    let output = exported(&mut editor);

    let (r, g, _) = channels(output.pixel(30, 10).unwrap());
    assert!(r > 200 && g < 100);
    assert_eq!(output.pixel(30, 13), Some(BLACK));

    let (r, g, _) = channels(output.pixel(140, 13).unwrap());
    assert!(g > 200 && r < 100);
}
