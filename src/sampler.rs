use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use chrono::Local;
use tracing::{error, info};

use crate::history::Sample;
use crate::link::Transport;
use crate::psu;

pub enum SamplerEvent {
    Sample(Sample),
    /// Polling stopped because a cycle failed.
    Fault(String),
}

/// Spawns the polling thread. Samples and faults arrive on the returned
/// channel; the UI thread applies them on its own schedule.
pub fn start_sampler<T: Transport + 'static>(
    link: Arc<Mutex<T>>,
    running: Arc<AtomicBool>,
    interval: Duration,
) -> mpsc::Receiver<SamplerEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        sampler_loop(link, running, interval, tx);
        info!("sampler thread exited");
    });
    rx
}

fn sampler_loop<T: Transport>(
    link: Arc<Mutex<T>>,
    running: Arc<AtomicBool>,
    interval: Duration,
    tx: mpsc::Sender<SamplerEvent>,
) {
    // The flag is only checked between cycles; in-flight I/O is left to
    // finish on its own.
    while running.load(Ordering::SeqCst) {
        match poll_cycle(&link) {
            Ok(sample) => {
                if tx.send(SamplerEvent::Sample(sample)).is_err() {
                    // Receiver side went away, nothing left to feed.
                    break;
                }
            }
            Err(e) => {
                error!("polling stopped: {e}");
                running.store(false, Ordering::SeqCst);
                let _ = tx.send(SamplerEvent::Fault(e.to_string()));
                break;
            }
        }
        thread::sleep(interval);
    }
}

/// One polling cycle: the three measurement queries, issued under a single
/// lock acquisition so user commands cannot interleave mid-cycle.
fn poll_cycle<T: Transport>(link: &Mutex<T>) -> Result<Sample, psu::MeasureError> {
    let mut link = link.lock().unwrap();
    let (voltage, current, power) = psu::read_measurements(&mut *link)?;
    Ok(Sample {
        elapsed: 0.0,
        clock_time: Local::now(),
        voltage,
        current,
        power,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::LinkError;
    use std::collections::VecDeque;

    struct ScriptedLink {
        responses: VecDeque<&'static str>,
    }

    impl ScriptedLink {
        fn with_responses(responses: &[&'static str]) -> Self {
            Self {
                responses: responses.iter().copied().collect(),
            }
        }
    }

    impl Transport for ScriptedLink {
        fn exchange(&mut self, _command: &str) -> Result<String, LinkError> {
            Ok(self.responses.pop_front().unwrap_or_default().to_string())
        }
    }

    #[test]
    fn poll_cycle_produces_one_sample() {
        let link = Mutex::new(ScriptedLink::with_responses(&["5.001", "0.502", "2.511"]));
        let sample = poll_cycle(&link).unwrap();
        assert_eq!(sample.voltage, 5.001);
        assert_eq!(sample.current, 0.502);
        assert_eq!(sample.power, 2.511);
    }

    #[test]
    fn poll_cycle_fails_on_garbage() {
        let link = Mutex::new(ScriptedLink::with_responses(&["5.001", "garbage", "2.511"]));
        assert!(poll_cycle(&link).is_err());
    }

    #[test]
    fn sampler_stops_after_a_parse_failure() {
        // One good cycle, then the instrument stops answering.
        let link = Arc::new(Mutex::new(ScriptedLink::with_responses(&[
            "5.001", "0.502", "2.511",
        ])));
        let running = Arc::new(AtomicBool::new(true));
        let rx = start_sampler(link, Arc::clone(&running), Duration::ZERO);

        let first = rx.recv().unwrap();
        match first {
            SamplerEvent::Sample(sample) => {
                assert_eq!((sample.voltage, sample.current, sample.power), (5.001, 0.502, 2.511));
            }
            SamplerEvent::Fault(message) => panic!("unexpected fault: {message}"),
        }

        match rx.recv().unwrap() {
            SamplerEvent::Fault(message) => assert!(message.contains("voltage")),
            SamplerEvent::Sample(_) => panic!("expected the sampler to stop"),
        }

        // The thread exits and drops its sender; no further samples arrive.
        assert!(rx.recv().is_err());
        assert!(!running.load(Ordering::SeqCst));
    }

    #[test]
    fn cleared_flag_stops_the_loop_before_any_cycle() {
        let link = Arc::new(Mutex::new(ScriptedLink::with_responses(&["5.001"])));
        let running = Arc::new(AtomicBool::new(false));
        let rx = start_sampler(link, running, Duration::ZERO);
        assert!(rx.recv().is_err());
    }
}
