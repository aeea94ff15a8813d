use eframe::egui;

use crate::app::App;

/// Renders the top connection panel with port selection and connect controls.
pub fn render_connection_panel(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.heading("Power Supply Controller");
        ui.separator();

        ui.label("Serial Port:");
        egui::ComboBox::from_id_salt("serial_port_select")
            .selected_text(&app.port_path)
            .show_ui(ui, |ui| {
                let available = app.available_ports.clone();
                for port in &available {
                    ui.selectable_value(&mut app.port_path, port.clone(), port);
                }
                // Allow manual entry if not in list
                ui.separator();
                ui.label("Or enter manually:");
                ui.text_edit_singleline(&mut app.port_path);
            });

        if app.connected() {
            if ui.button("Disconnect").clicked() {
                app.disconnect();
            }
        } else if ui.button("Connect").clicked() {
            app.connect();
        }

        ui.separator();
        ui.checkbox(&mut app.auto_scroll_logs, "Auto-scroll logs");

        ui.separator();
        if ui.button("Clear Charts").clicked() {
            app.history.clear_samples();
        }
    });
}
