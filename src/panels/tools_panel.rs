use crate::SketchApp;

/// Font size of the stamp palette entries
const PALETTE_GLYPH_SIZE: f32 = 22.0;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            // Stroke widths
            let presets = app.config().stroke_width_presets.clone();
            let current_width = app.session().tools().stroke_width();
            let stroke_mode = !app.session().tools().is_stamp();
            ui.horizontal_wrapped(|ui| {
                for width in presets {
                    let selected = stroke_mode && current_width == width;
                    if ui.selectable_label(selected, format!("Line {}px", width)).clicked() {
                        app.select_stroke_width(width);
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.label("Color:");
                if ui.color_edit_button_srgb(app.color_mut()).changed() {
                    app.apply_color();
                }
            });

            ui.separator();
            ui.label("Stamps");

            let glyphs = app.session().tools().glyphs().to_vec();
            let selected_glyph = app.session().tools().selected_glyph().map(str::to_owned);
            ui.horizontal_wrapped(|ui| {
                for glyph in &glyphs {
                    let selected = selected_glyph.as_deref() == Some(glyph.as_str());
                    let label = egui::RichText::new(glyph.as_str()).size(PALETTE_GLYPH_SIZE);
                    if ui.selectable_label(selected, label).on_hover_text(glyph.as_str()).clicked() {
                        app.select_glyph(glyph);
                    }
                }
            });

            ui.horizontal(|ui| {
                let edit = ui.add(
                    egui::TextEdit::singleline(app.custom_glyph_mut())
                        .desired_width(60.0)
                        .hint_text("glyph"),
                );
                let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add stamp").clicked() || submitted {
                    app.register_custom_glyph();
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.session().history().can_undo();
                let can_redo = app.session().history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.session_mut().undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.session_mut().redo();
                }
                if ui.button("Clear").clicked() {
                    app.session_mut().clear();
                }
            });

            let history = app.session().history();
            ui.label(format!(
                "Marks: {}  Redo: {}",
                history.active_len(),
                history.redo_len()
            ));

            ui.separator();

            ui.checkbox(app.transparent_export_mut(), "Transparent background");
            let scale = app.session().exporter().scale();
            if ui.button(format!("Export PNG ({}x)", scale)).clicked() {
                app.export();
            }

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}
