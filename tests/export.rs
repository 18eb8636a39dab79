use sketchpad::config::SketchConfig;
use sketchpad::export::{Background, Exporter};
use sketchpad::session::DrawingSession;
use egui::Pos2;

fn small_config() -> SketchConfig {
    SketchConfig {
        canvas_width: 32,
        canvas_height: 24,
        export_scale: 3,
        background: [10, 20, 30],
        ..SketchConfig::default()
    }
}

#[test]
fn test_empty_export_is_background_only() {
    let session = DrawingSession::new(&small_config());
    let exported = session.export(false).unwrap();
    assert_eq!((exported.width, exported.height), (96, 72));

    let decoded = image::load_from_memory(&exported.png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (96, 72));
    assert!(decoded.pixels().all(|p| p.0 == [10, 20, 30, 255]));
}

#[test]
fn test_transparent_export_skips_fill() {
    let mut session = DrawingSession::new(&small_config());
    session.pointer_press(Pos2::new(16.0, 12.0));
    session.pointer_move(Pos2::new(20.0, 12.0));
    session.pointer_release(Pos2::new(20.0, 12.0));

    let image = session.exporter()
        .rasterize(session.history().snapshot(), Background::Transparent)
        .unwrap();
    assert_eq!(image.get_pixel(0, 0).0[3], 0);
    assert_eq!(image.get_pixel(54, 36).0, [0, 0, 0, 255]);
}

#[test]
fn test_opaque_corner_matches_background() {
    let mut session = DrawingSession::new(&small_config());
    session.pointer_press(Pos2::new(16.0, 12.0));
    session.pointer_release(Pos2::new(16.0, 12.0));

    let image = session.exporter()
        .rasterize(session.history().snapshot(), Background::Opaque)
        .unwrap();
    assert_eq!(image.get_pixel(0, 0).0, [10, 20, 30, 255]);
    assert_eq!(image.get_pixel(95, 71).0, [10, 20, 30, 255]);
}

#[test]
fn test_export_scales_stroke_width() {
    let config = small_config();
    let exporter = Exporter::new(&config);
    let mut session = DrawingSession::new(&config);
    session.select_stroke_width(4).unwrap();
    session.pointer_press(Pos2::new(4.0, 12.0));
    session.pointer_move(Pos2::new(28.0, 12.0));
    session.pointer_release(Pos2::new(28.0, 12.0));

    let image = exporter
        .rasterize(session.history().snapshot(), Background::Transparent)
        .unwrap();
    // 4 units wide at 3x is 12 px, centred on y = 36
    let inked = (0..image.height())
        .filter(|y| image.get_pixel(48, *y).0[3] == 255)
        .count();
    assert_eq!(inked, 12);
}

#[test]
fn test_stamp_is_rasterized() {
    let mut session = DrawingSession::new(&small_config());
    session.register_custom_glyph("W").unwrap();
    session.pointer_press(Pos2::new(16.0, 12.0));
    session.pointer_release(Pos2::new(16.0, 12.0));

    let image = session.exporter()
        .rasterize(session.history().snapshot(), Background::Transparent)
        .unwrap();
    assert!(image.pixels().any(|p| p.0[3] > 128));
}

#[test]
fn test_export_leaves_session_untouched() {
    let mut session = DrawingSession::new(&small_config());
    session.pointer_press(Pos2::new(1.0, 1.0));
    session.pointer_move(Pos2::new(2.0, 2.0));

    session.export(true).unwrap();

    assert!(session.is_drawing());
    assert_eq!(session.history().active_len(), 1);
    session.pointer_move(Pos2::new(3.0, 3.0));
    assert_eq!(
        session.history().snapshot().next().unwrap().as_stroke().unwrap().points().len(),
        3
    );
}
