use std::time::Duration;

// Provider rate-limit windows are typically hourly.
const RATE_LIMIT_WAIT: Duration = Duration::from_secs(60 * 60);
const TRANSIENT_WAIT: Duration = Duration::from_secs(1);
const MAX_TRANSIENT_RETRIES: u32 = 3;

/// Wait-then-retry policy shared by every page walk. The sleeper is
/// injectable so tests can observe waits without blocking.
pub struct BackoffPolicy {
    rate_limit_wait: Duration,
    transient_wait: Duration,
    max_transient_retries: u32,
    sleep: Box<dyn Fn(Duration)>,
}

impl BackoffPolicy {
    pub fn new() -> Self {
        Self {
            rate_limit_wait: RATE_LIMIT_WAIT,
            transient_wait: TRANSIENT_WAIT,
            max_transient_retries: MAX_TRANSIENT_RETRIES,
            sleep: Box::new(std::thread::sleep),
        }
    }

    pub fn with_sleeper(sleep: Box<dyn Fn(Duration)>) -> Self {
        Self {
            sleep,
            ..Self::new()
        }
    }

    pub fn wait_rate_limited(&self) {
        (self.sleep)(self.rate_limit_wait);
    }

    pub fn wait_transient(&self) {
        (self.sleep)(self.transient_wait);
    }

    pub fn max_transient_retries(&self) -> u32 {
        self.max_transient_retries
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn rate_limit_wait_is_one_hour() {
        let waits = Rc::new(RefCell::new(Vec::new()));
        let recorded = waits.clone();
        let policy = BackoffPolicy::with_sleeper(Box::new(move |wait| {
            recorded.borrow_mut().push(wait);
        }));
        policy.wait_rate_limited();
        assert_eq!(*waits.borrow(), vec![Duration::from_secs(3600)]);
    }
}
