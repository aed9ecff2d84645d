//! Per-call deadlines.

use std::time::Duration;

/// Upper bound on how long one call may suspend its caller.
///
/// Every gateway operation takes a `Deadline`. `Configured` defers to the
/// bound configured on the handle; `After` overrides it for that call only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deadline {
    #[default]
    Configured,
    After(Duration),
}

impl Deadline {
    /// Deadline of `secs` seconds.
    pub fn secs(secs: u64) -> Self {
        Deadline::After(Duration::from_secs(secs))
    }

    /// Deadline of `millis` milliseconds.
    pub fn millis(millis: u64) -> Self {
        Deadline::After(Duration::from_millis(millis))
    }

    /// Resolve against the handle's configured bound.
    pub fn resolve(self, configured: Duration) -> Duration {
        match self {
            Deadline::Configured => configured,
            Deadline::After(duration) => duration,
        }
    }
}

impl From<Duration> for Deadline {
    fn from(duration: Duration) -> Self {
        Deadline::After(duration)
    }
}

impl From<Option<Duration>> for Deadline {
    fn from(duration: Option<Duration>) -> Self {
        duration.map_or(Deadline::Configured, Deadline::After)
    }
}
