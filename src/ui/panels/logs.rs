use eframe::egui;

use crate::app::App;

/// Renders the event log section.
pub fn render_logs_section(ui: &mut egui::Ui, app: &mut App, width: f32) {
    ui.vertical(|ui| {
        ui.set_width(width);
        ui.label(format!("Event Log ({} messages)", app.history.logs.len()));

        egui::ScrollArea::vertical()
            .max_height(200.0)
            .id_salt("event_log")
            .auto_shrink([false; 2])
            .stick_to_bottom(app.auto_scroll_logs)
            .show(ui, |ui| {
                if ui.button("clear logs").clicked() {
                    app.history.clear_logs();
                }

                for log in app.history.logs.iter() {
                    ui.horizontal(|ui| {
                        ui.label(format!("[{}]", log.clock_time.format("%H:%M:%S%.3f")));
                        ui.label(&log.message);
                    });
                }
            });
    });
}
