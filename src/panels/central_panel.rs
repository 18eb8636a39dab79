use crate::SketchApp;
use crate::render::PainterSurface;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let size = app.session().canvas_size();
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        app.handle_input(ctx, &response, canvas_rect);

        let mut surface = PainterSurface::new(&painter, canvas_rect);
        app.renderer().render(&mut surface, app.session());

        if app.session().cursor_preview().is_some() {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }
    });
}
