use std::time::Duration;

/// Fixed artificial delay applied before an operation resolves or rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulatedLatency {
    delay: Duration,
}

impl SimulatedLatency {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub const fn none() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits out the delay, then hands back `outcome` unchanged.
    pub async fn settle<T, E>(&self, outcome: Result<T, E>) -> Result<T, E> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn settle_waits_for_the_configured_delay() {
        let latency = SimulatedLatency::new(Duration::from_millis(500));
        let started = tokio::time::Instant::now();
        let value: Result<u8, ()> = latency.settle(Ok(7)).await;
        assert_eq!(value, Ok(7));
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn errors_are_delayed_too() {
        let latency = SimulatedLatency::new(Duration::from_millis(250));
        let started = tokio::time::Instant::now();
        let value: Result<(), &str> = latency.settle(Err("missing")).await;
        assert_eq!(value, Err("missing"));
        assert!(started.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test]
    async fn none_resolves_immediately() {
        let value: Result<&str, ()> = SimulatedLatency::none().settle(Ok("ready")).await;
        assert_eq!(value, Ok("ready"));
    }
}
