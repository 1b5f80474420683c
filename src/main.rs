use std::path::PathBuf;

use eframe::egui;
use sejong::gui::SejongApp;

fn main() -> eframe::Result {
    let dataset_path = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Sejong"),
        ..Default::default()
    };

    eframe::run_native(
        "Sejong",
        options,
        Box::new(move |cc| Ok(Box::new(SejongApp::new(cc, dataset_path)))),
    )
}
