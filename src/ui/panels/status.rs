use eframe::egui;

use crate::app::App;

/// Renders the latest measured values.
pub fn render_status_section(ui: &mut egui::Ui, app: &App, width: f32) {
    ui.vertical(|ui| {
        ui.set_width(width);
        ui.heading("Status");
        ui.add_space(5.0);

        if let Some(latest) = app.history.latest() {
            ui.label(format!("Measured Voltage: {:.3} V", latest.voltage));
            ui.label(format!("Measured Current: {:.3} A", latest.current));
            ui.label(format!("Measured Power: {:.3} W", latest.power));
            ui.add_space(3.0);
            ui.label(format!(
                "Last update: {}",
                latest.clock_time.format("%H:%M:%S%.3f")
            ));
        } else {
            ui.label("No readings yet");
        }

        if app.connected() && !app.sampling() {
            ui.add_space(3.0);
            ui.colored_label(
                egui::Color32::from_rgb(255, 100, 100),
                "Polling stopped - reconnect to resume",
            );
        }
    });
}
