use tracing::{Level, info};

mod app;
mod config;
mod history;
mod link;
mod psu;
mod sampler;
mod ui;

use crate::app::App;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();
    info!("starting power supply controller");

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Power Supply Controller",
        native_options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
    .expect("failed to run eframe");
}
