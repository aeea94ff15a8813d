pub mod connection;
pub mod control;
pub mod logs;
pub mod plots;
pub mod status;

pub use connection::render_connection_panel;
pub use control::render_control_section;
pub use logs::render_logs_section;
pub use plots::render_measurement_plots;
pub use status::render_status_section;
