use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Countdown value a session starts from, and returns to on every mutation.
    pub session_timeout_secs: u32,
    pub tick_period: Duration,
    /// Simulated processing time before an approved loan lands.
    pub loan_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_timeout_secs: 10,
            tick_period: Duration::from_secs(1),
            loan_delay: Duration::from_millis(2500),
        }
    }
}
