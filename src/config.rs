// Serial port configuration
pub const BAUD_RATE: u32 = 115_200;
pub const SERIAL_TIMEOUT_MS: u64 = 1_000;

// Polling
pub const POLL_INTERVAL_MS: u64 = 1_000;

// Data buffer limits
pub const MAX_POINTS: usize = 100;
pub const MAX_LOG_MESSAGES: usize = 100;
