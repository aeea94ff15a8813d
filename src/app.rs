use eframe::egui;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use tracing::{error, info};

use crate::config::POLL_INTERVAL_MS;
use crate::history::History;
use crate::link::{LinkError, SerialLink};
use crate::psu;
use crate::sampler::{self, SamplerEvent};
use crate::ui;

pub struct App {
    pub history: History,
    pub link: Option<Arc<Mutex<SerialLink>>>,
    pub running: Arc<AtomicBool>,
    pub sampler_rx: Option<mpsc::Receiver<SamplerEvent>>,
    pub port_path: String,
    pub available_ports: Vec<String>,
    pub voltage_entry: String,
    pub current_entry: String,
    pub auto_scroll_logs: bool,
}

impl Default for App {
    fn default() -> Self {
        let available_ports: Vec<String> = serialport::available_ports()
            .map(|ports| ports.iter().map(|p| p.port_name.clone()).collect())
            .unwrap_or_else(|_| vec![]);

        let default_port = available_ports.first().cloned().unwrap_or_else(|| {
            if cfg!(windows) {
                "COM3".to_string()
            } else {
                "/dev/ttyUSB0".to_string()
            }
        });

        Self {
            history: History::new(),
            link: None,
            running: Arc::new(AtomicBool::new(false)),
            sampler_rx: None,
            port_path: default_port,
            available_ports,
            voltage_entry: String::new(),
            current_entry: String::new(),
            auto_scroll_logs: true,
        }
    }
}

impl App {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    pub fn connected(&self) -> bool {
        self.link.is_some()
    }

    pub fn sampling(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn connect(&mut self) {
        if self.link.is_some() {
            return;
        }

        info!("attempting to connect to {}", self.port_path);
        match SerialLink::open(&self.port_path) {
            Ok(link) => {
                let link = Arc::new(Mutex::new(link));
                // Fresh flag per session, so a stale sampler thread from a
                // previous connection can never be revived by reconnecting.
                self.running = Arc::new(AtomicBool::new(true));
                self.sampler_rx = Some(sampler::start_sampler(
                    Arc::clone(&link),
                    Arc::clone(&self.running),
                    Duration::from_millis(POLL_INTERVAL_MS),
                ));
                self.link = Some(link);
                self.history
                    .push_log(format!("Connected to {}", self.port_path));
            }
            Err(e) => {
                error!("connection failed: {e}");
                self.history.push_log(format!("Connection error: {e}"));
            }
        }
    }

    pub fn disconnect(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.sampler_rx = None;
        // The port itself closes once the sampler thread drops its handle.
        if self.link.take().is_some() {
            self.history
                .push_log(format!("Disconnected from {}", self.port_path));
        }
    }

    pub fn set_voltage(&mut self) {
        let value = self.voltage_entry.clone();
        self.command(move |link| {
            psu::set_voltage(link, &value)?;
            Ok(format!("Voltage set to {value}"))
        });
    }

    pub fn set_current(&mut self) {
        let value = self.current_entry.clone();
        self.command(move |link| {
            psu::set_current(link, &value)?;
            Ok(format!("Current set to {value}"))
        });
    }

    pub fn toggle_output(&mut self) {
        self.command(|link| {
            let sent = psu::toggle_output(link)?;
            Ok(format!("Output toggled, sent {sent}"))
        });
    }

    /// Runs a user-triggered instrument command under the link mutex, so it
    /// serializes against the sampler's poll cycles, and reports the outcome
    /// in the event log.
    fn command<F>(&mut self, f: F)
    where
        F: FnOnce(&mut SerialLink) -> Result<String, LinkError>,
    {
        let result = match &self.link {
            Some(link) => {
                let mut guard = link.lock().unwrap();
                f(&mut guard)
            }
            None => {
                self.history.push_log("Not connected".to_string());
                return;
            }
        };

        match result {
            Ok(message) => self.history.push_log(message),
            Err(e) => {
                error!("command failed: {e}");
                self.history.push_log(format!("Command error: {e}"));
            }
        }
    }

    fn drain_sampler_events(&mut self) {
        let mut events = Vec::new();
        if let Some(rx) = &self.sampler_rx {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }

        for event in events {
            match event {
                SamplerEvent::Sample(sample) => self.history.push(sample),
                SamplerEvent::Fault(message) => {
                    // Polling is over, but the connection stays up so the
                    // user can still send commands or disconnect.
                    self.history.push_log(format!("Update error: {message}"));
                    self.sampler_rx = None;
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_sampler_events();
        ctx.request_repaint_after(Duration::from_millis(250));
        ui::render(ctx, self);
    }
}
