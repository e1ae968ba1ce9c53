//! The warn event emitted before each retry wait.

#![cfg(feature = "tracing")]

use std::fmt;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;
use vellum_core::retry::{BackoffStrategy, FailureClass, RetryPolicy, StatusHint};

#[derive(Debug)]
struct Upstream(u16);

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upstream answered {}", self.0)
    }
}

impl std::error::Error for Upstream {}

impl StatusHint for Upstream {
    fn status_hint(&self) -> Option<u16> {
        Some(self.0)
    }
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_retries_log_status_wait_and_budget() {
    let captured = Captured::default();
    let writer = captured.clone();
    let _guard = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(LevelFilter::WARN)
        .finish()
        .set_default();

    let policy = RetryPolicy::default();
    let attempts = Arc::new(Mutex::new(Vec::new()));

    let result = policy
        .execute(|| {
            let attempts = Arc::clone(&attempts);
            async move {
                let mut times = attempts.lock().unwrap();
                times.push(Instant::now());
                if times.len() < 3 {
                    Err(Upstream(429))
                } else {
                    Ok("done")
                }
            }
        })
        .await;
    assert_eq!(result.unwrap(), "done");

    let lines = captured.lines();
    assert_eq!(lines.len(), 2, "{:#?}", lines);
    for (line, retries_left) in lines.iter().zip([3, 2]) {
        assert!(line.contains("WARN"), "{}", line);
        assert!(
            line.contains(&format!(
                "Operation failed, retrying in 60000ms ({} retries left)",
                retries_left
            )),
            "{}",
            line
        );
        assert!(line.contains("status=429"), "{}", line);
        assert!(line.contains("wait_ms=60000"), "{}", line);
        assert!(line.contains(&format!("retries_left={}", retries_left)), "{}", line);
    }

    // Waits match the schedule computed without any subscriber attached
    let times = attempts.lock().unwrap();
    let waits: Vec<Duration> = times.windows(2).map(|w| w[1] - w[0]).collect();
    let expected = &policy.schedule(FailureClass::RateLimited)[..2];
    for (wait, expected) in waits.iter().zip(expected) {
        assert!(
            *wait >= *expected && *wait < *expected + Duration::from_millis(10),
            "expected ~{:?}, got {:?}",
            expected,
            wait
        );
    }
    assert_eq!(waits.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_terminal_failure_logs_nothing() {
    let captured = Captured::default();
    let writer = captured.clone();
    let _guard = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(LevelFilter::WARN)
        .finish()
        .set_default();

    let result = RetryPolicy::default()
        .execute(|| async { Err::<(), _>(Upstream(400)) })
        .await;

    assert_eq!(result.unwrap_err().0, 400);
    assert!(captured.lines().is_empty());
}
