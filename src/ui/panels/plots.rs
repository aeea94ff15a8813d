use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, Line, Plot};

use crate::app::App;

/// Renders the three stacked time-series charts, redrawn in full from the
/// current history each frame.
pub fn render_measurement_plots(ui: &mut egui::Ui, app: &App) {
    let history = &app.history;
    let available_width = ui.available_width();

    ui.group(|ui| {
        ui.label("Voltage (V)");
        Plot::new("voltage_plot")
            .legend(Legend::default())
            .height(160.0)
            .width(available_width - 20.0)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new("Voltage", history.voltage_points())
                        .color(Color32::from_rgb(255, 100, 100)),
                );
            });
    });

    ui.group(|ui| {
        ui.label("Current (A)");
        Plot::new("current_plot")
            .legend(Legend::default())
            .height(160.0)
            .width(available_width - 20.0)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new("Current", history.current_points())
                        .color(Color32::from_rgb(100, 255, 100)),
                );
            });
    });

    ui.group(|ui| {
        ui.label("Power (W)");
        Plot::new("power_plot")
            .legend(Legend::default())
            .height(160.0)
            .width(available_width - 20.0)
            .x_axis_label("Time (s)")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new("Power", history.power_points())
                        .color(Color32::from_rgb(100, 100, 255)),
                );
            });
    });
}
