use thiserror::Error;
use tracing::info;

use crate::link::{LinkError, Transport};

// Instrument command strings. Queries end in '?', set commands carry the
// value verbatim.
pub const QUERY_OUTPUT: &str = "OUTP?";
pub const OUTPUT_ON: &str = "OUTP ON";
pub const OUTPUT_OFF: &str = "OUTP OFF";
pub const QUERY_VOLTAGE: &str = "MEAS:VOLT?";
pub const QUERY_CURRENT: &str = "MEAS:CURR?";
pub const QUERY_POWER: &str = "MEAS:POW?";

#[derive(Debug, Error)]
#[error("cannot parse {quantity} response '{raw}'")]
pub struct MeasureError {
    pub quantity: &'static str,
    pub raw: String,
}

/// Sets the output voltage. The value comes straight from the UI text field
/// and is forwarded verbatim; malformed values are left for the instrument
/// to reject.
pub fn set_voltage<T: Transport + ?Sized>(link: &mut T, value: &str) -> Result<(), LinkError> {
    info!("setting voltage to {value}");
    link.exchange(&format!("VOLT {value}")).map(|_| ())
}

/// Sets the current limit. Same verbatim forwarding as [`set_voltage`].
pub fn set_current<T: Transport + ?Sized>(link: &mut T, value: &str) -> Result<(), LinkError> {
    info!("setting current to {value}");
    link.exchange(&format!("CURR {value}")).map(|_| ())
}

/// Queries the output state and sends the opposite one. The instrument
/// reports "1" for an enabled output; any other response is treated as off.
/// Returns the command that was sent.
pub fn toggle_output<T: Transport + ?Sized>(link: &mut T) -> Result<&'static str, LinkError> {
    let state = link.exchange(QUERY_OUTPUT)?;
    let command = if state == "1" { OUTPUT_OFF } else { OUTPUT_ON };
    info!("output state '{state}', sending {command}");
    link.exchange(command)?;
    Ok(command)
}

/// One full measurement round: voltage, current, power, in that order.
///
/// A failed exchange shows up here as an unparseable empty response, so a
/// dead link and instrument garbage stop the caller the same way.
pub fn read_measurements<T: Transport + ?Sized>(
    link: &mut T,
) -> Result<(f64, f64, f64), MeasureError> {
    let voltage = read_measurement(link, QUERY_VOLTAGE, "voltage")?;
    let current = read_measurement(link, QUERY_CURRENT, "current")?;
    let power = read_measurement(link, QUERY_POWER, "power")?;
    Ok((voltage, current, power))
}

fn read_measurement<T: Transport + ?Sized>(
    link: &mut T,
    query: &str,
    quantity: &'static str,
) -> Result<f64, MeasureError> {
    let raw = link.send(query);
    raw.parse::<f64>().map_err(|_| MeasureError {
        quantity,
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;

    #[derive(Default)]
    struct ScriptedLink {
        responses: VecDeque<&'static str>,
        sent: Vec<String>,
        broken: bool,
    }

    impl ScriptedLink {
        fn with_responses(responses: &[&'static str]) -> Self {
            Self {
                responses: responses.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl Transport for ScriptedLink {
        fn exchange(&mut self, command: &str) -> Result<String, LinkError> {
            if self.broken {
                return Err(LinkError::Write(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "port gone",
                )));
            }
            self.sent.push(command.to_string());
            Ok(self.responses.pop_front().unwrap_or_default().to_string())
        }
    }

    #[test]
    fn toggle_turns_output_off_when_state_is_1() {
        let mut link = ScriptedLink::with_responses(&["1", ""]);
        assert_eq!(toggle_output(&mut link).unwrap(), OUTPUT_OFF);
        assert_eq!(link.sent, vec!["OUTP?", "OUTP OFF"]);
    }

    #[test]
    fn toggle_turns_output_on_for_any_other_state() {
        for state in ["0", "ON", "1 ", ""] {
            let mut link = ScriptedLink::with_responses(&[state, ""]);
            assert_eq!(toggle_output(&mut link).unwrap(), OUTPUT_ON);
            assert_eq!(link.sent, vec!["OUTP?", "OUTP ON"]);
        }
    }

    #[test]
    fn toggle_is_abandoned_when_the_query_fails() {
        let mut link = ScriptedLink {
            broken: true,
            ..ScriptedLink::default()
        };
        assert!(toggle_output(&mut link).is_err());
        assert!(link.sent.is_empty());
    }

    #[test]
    fn set_commands_forward_the_value_verbatim() {
        let mut link = ScriptedLink::with_responses(&["", ""]);
        set_voltage(&mut link, "5.0").unwrap();
        set_current(&mut link, "not a number").unwrap();
        assert_eq!(link.sent, vec!["VOLT 5.0", "CURR not a number"]);
    }

    #[test]
    fn one_measurement_round_reads_all_three_quantities() {
        let mut link = ScriptedLink::with_responses(&["5.001", "0.502", "2.511"]);
        let (v, i, p) = read_measurements(&mut link).unwrap();
        assert_eq!((v, i, p), (5.001, 0.502, 2.511));
        assert_eq!(link.sent, vec!["MEAS:VOLT?", "MEAS:CURR?", "MEAS:POW?"]);
    }

    #[test]
    fn non_numeric_response_is_a_measurement_error() {
        let mut link = ScriptedLink::with_responses(&["5.001", "ERR -113", "2.511"]);
        let err = read_measurements(&mut link).unwrap_err();
        assert_eq!(err.quantity, "current");
        assert_eq!(err.raw, "ERR -113");
    }

    #[test]
    fn dead_link_fails_the_measurement_round() {
        let mut link = ScriptedLink {
            broken: true,
            ..ScriptedLink::default()
        };
        let err = read_measurements(&mut link).unwrap_err();
        assert_eq!(err.quantity, "voltage");
        assert_eq!(err.raw, "");
    }
}
