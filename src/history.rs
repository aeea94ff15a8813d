use chrono::{DateTime, Local};
use egui_plot::PlotPoints;
use std::collections::VecDeque;
use std::time::Instant;

use crate::config::{MAX_LOG_MESSAGES, MAX_POINTS};

#[derive(Clone, Debug)]
pub struct Sample {
    /// Seconds since the buffer was created, stamped on insertion.
    pub elapsed: f64,
    pub clock_time: DateTime<Local>,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
}

#[derive(Clone, Debug)]
pub struct LogMessage {
    pub clock_time: DateTime<Local>,
    pub message: String,
}

/// Rolling buffer of the most recent measurements, plus the user-visible
/// event log. Oldest entries are evicted first once a bound is reached.
pub struct History {
    pub samples: VecDeque<Sample>,
    pub logs: VecDeque<LogMessage>,
    start_time: Instant,
}

impl History {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(MAX_POINTS),
            logs: VecDeque::with_capacity(MAX_LOG_MESSAGES),
            start_time: Instant::now(),
        }
    }

    pub fn push(&mut self, mut sample: Sample) {
        sample.elapsed = self.start_time.elapsed().as_secs_f64();

        if self.samples.len() >= MAX_POINTS {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn push_log(&mut self, message: String) {
        let log_msg = LogMessage {
            clock_time: Local::now(),
            message,
        };

        if self.logs.len() >= MAX_LOG_MESSAGES {
            self.logs.pop_front();
        }
        self.logs.push_back(log_msg);
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn clear_samples(&mut self) {
        self.samples.clear();
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    pub fn voltage_points<'a>(&'a self) -> PlotPoints<'a> {
        self.samples
            .iter()
            .map(|s| [s.elapsed, s.voltage])
            .collect()
    }

    pub fn current_points<'a>(&'a self) -> PlotPoints<'a> {
        self.samples
            .iter()
            .map(|s| [s.elapsed, s.current])
            .collect()
    }

    pub fn power_points<'a>(&'a self) -> PlotPoints<'a> {
        self.samples.iter().map(|s| [s.elapsed, s.power]).collect()
    }
}
