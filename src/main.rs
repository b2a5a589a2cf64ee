#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use clap::Parser;

use eframe_image_editor::EditorApp;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let args = cli::CliArgs::parse();
    let config = args.load_config();
    let image_path = args.image;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true)
            .with_title("Image Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Image Editor",
        options,
        Box::new(move |cc| Ok(Box::new(EditorApp::new(cc, config, image_path)))),
    )
}
