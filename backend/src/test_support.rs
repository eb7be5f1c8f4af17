//! Test utilities for the backend crate.
//!
//! Only compiled for unit tests; integration tests drive the public API.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::Sleeper;

/// Sleeper that records requested durations and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    durations: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    /// Durations requested so far, in call order.
    pub fn recorded(&self) -> Vec<Duration> {
        self.durations
            .lock()
            .expect("recording sleeper mutex")
            .clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.durations
            .lock()
            .expect("recording sleeper mutex")
            .push(duration);
    }
}
