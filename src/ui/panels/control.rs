use eframe::egui;

use crate::app::App;

/// Renders the instrument control section: voltage/current setpoints and
/// the output toggle.
pub fn render_control_section(ui: &mut egui::Ui, app: &mut App, width: f32) {
    ui.vertical(|ui| {
        ui.set_width(width);
        ui.heading("Control Panel");
        ui.add_space(5.0);

        if !app.connected() {
            ui.label("Connect to a serial port to enable controls");
            return;
        }

        ui.horizontal(|ui| {
            ui.label("Voltage (V):");
            ui.add(egui::TextEdit::singleline(&mut app.voltage_entry).desired_width(60.0));
            if ui.button("Set Voltage").clicked() {
                app.set_voltage();
            }
        });
        ui.add_space(3.0);

        ui.horizontal(|ui| {
            ui.label("Current (A):");
            ui.add(egui::TextEdit::singleline(&mut app.current_entry).desired_width(60.0));
            if ui.button("Set Current").clicked() {
                app.set_current();
            }
        });
        ui.add_space(3.0);

        if ui.button("Toggle Output").clicked() {
            app.toggle_output();
        }
    });
}
