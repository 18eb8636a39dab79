#![warn(clippy::all, rust_2018_idioms)]

use clap::Parser;

use sketchpad::SketchApp;
use sketchpad::cli::Args;
use sketchpad::config::SketchConfig;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = SketchConfig::load_or_default(&args.config_path());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.canvas_width as f32 + 260.0, config.canvas_height as f32 + 80.0])
            .with_min_inner_size([300.0, 220.0])
            .with_title("Sketchpad"),
        ..Default::default()
    };

    eframe::run_native(
        "Sketchpad",
        native_options,
        Box::new(|cc| Ok(Box::new(SketchApp::new(cc, config)))),
    )
}
