pub mod panels;

use eframe::egui;

use crate::app::App;

/// Renders all the egui panels for one frame.
pub fn render(ctx: &egui::Context, app: &mut App) {
    // Top panel - connection controls
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        panels::render_connection_panel(ui, app);
    });

    // Central panel - controls, status, logs, charts
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                render_main_sections(ui, app);
                panels::render_measurement_plots(ui, app);
            });
    });
}

/// Renders the three main sections (controls, status, logs) side by side.
fn render_main_sections(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_top(|ui| {
        let available_width = ui.available_width();
        let section_width = available_width / 3.0;

        ui.group(|ui| {
            panels::render_control_section(ui, app, section_width - 20.0);
        });

        ui.group(|ui| {
            panels::render_status_section(ui, app, section_width - 20.0);
        });

        ui.group(|ui| {
            panels::render_logs_section(ui, app, section_width - 20.0);
        });
    });
}
