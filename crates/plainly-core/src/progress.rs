//! Rotating "still working" messages shown while a request is pending
//!
//! The ticker is purely cosmetic. It never touches the request or its
//! outcome, and once [`ProgressTicker::stop`] returns no further message is
//! delivered.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Messages cycled through while waiting on the service
pub const PROGRESS_MESSAGES: [&str; 5] = [
    "Reading your document...",
    "Identifying complex jargon...",
    "Rewriting in plain English...",
    "Extracting key points...",
    "Finalizing summary...",
];

/// Receives progress messages
pub trait ProgressListener: Send + Sync {
    fn on_progress(&self, message: &str);
}

impl<F> ProgressListener for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_progress(&self, message: &str) {
        self(message)
    }
}

/// Listener that drops every message
pub struct SilentProgress;

impl ProgressListener for SilentProgress {
    fn on_progress(&self, _message: &str) {}
}

/// Configuration for the progress ticker
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    pub interval: Duration,
    pub messages: Vec<String>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1200),
            messages: PROGRESS_MESSAGES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// A running ticker; one per pending request
pub struct ProgressTicker {
    generation: Arc<AtomicU64>,
    mine: u64,
    handle: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    /// Start emitting messages every `config.interval`, first one after one interval.
    ///
    /// `generation` is shared by every ticker of one runner: starting a ticker
    /// claims a new generation, and a ticker only emits while its generation
    /// is still current.
    pub fn start(
        config: &ProgressConfig,
        listener: Arc<dyn ProgressListener>,
        generation: Arc<AtomicU64>,
    ) -> Self {
        let mine = generation.fetch_add(1, Ordering::SeqCst) + 1;

        if config.messages.is_empty() {
            return Self {
                generation,
                mine,
                handle: None,
            };
        }

        let period = config.interval.max(Duration::from_millis(1));
        let messages = config.messages.clone();
        let current = generation.clone();

        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            for message in messages.iter().cycle() {
                ticks.tick().await;
                if current.load(Ordering::SeqCst) != mine {
                    break;
                }
                listener.on_progress(message);
            }
        });

        Self {
            generation,
            mine,
            handle: Some(handle),
        }
    }

    /// Retire this ticker's generation unless a newer ticker already claimed one
    fn retire(&self) {
        let _ = self.generation.compare_exchange(
            self.mine,
            self.mine + 1,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    /// Stop the ticker and wait until its task has finished
    pub async fn stop(mut self) {
        self.retire();
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.retire();
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, Arc<dyn ProgressListener>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let listener: Arc<dyn ProgressListener> =
            Arc::new(move |message: &str| sink.lock().unwrap().push(message.to_string()));
        (seen, listener)
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_on_interval() {
        let (seen, listener) = recorder();
        let ticker = ProgressTicker::start(
            &ProgressConfig::default(),
            listener,
            Arc::new(AtomicU64::new(0)),
        );

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2600)).await;
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "Reading your document...".to_string(),
                "Identifying complex jargon...".to_string(),
                "Rewriting in plain English...".to_string(),
            ]
        );

        ticker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_rotate() {
        let (seen, listener) = recorder();
        let ticker = ProgressTicker::start(
            &ProgressConfig::default(),
            listener,
            Arc::new(AtomicU64::new(0)),
        );

        tokio::time::sleep(Duration::from_millis(1200 * 6 + 100)).await;
        ticker.stop().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[5], PROGRESS_MESSAGES[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_message_after_stop() {
        let (seen, listener) = recorder();
        let ticker = ProgressTicker::start(
            &ProgressConfig::default(),
            listener,
            Arc::new(AtomicU64::new(0)),
        );

        tokio::time::sleep(Duration::from_millis(2500)).await;
        ticker.stop().await;
        let count = seen.lock().unwrap().len();
        assert_eq!(count, 2);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(seen.lock().unwrap().len(), count);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_ticker_silences_older() {
        let (old_seen, old_listener) = recorder();
        let (new_seen, new_listener) = recorder();
        let generation = Arc::new(AtomicU64::new(0));
        let config = ProgressConfig::default();

        let old = ProgressTicker::start(&config, old_listener, generation.clone());
        let new = ProgressTicker::start(&config, new_listener, generation.clone());

        tokio::time::sleep(Duration::from_millis(1300)).await;
        assert!(old_seen.lock().unwrap().is_empty());
        assert_eq!(new_seen.lock().unwrap().len(), 1);

        // stopping the stale ticker must not silence the current one
        old.stop().await;
        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(new_seen.lock().unwrap().len(), 2);

        new.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_ticker_goes_quiet() {
        let (seen, listener) = recorder();
        let ticker = ProgressTicker::start(
            &ProgressConfig::default(),
            listener,
            Arc::new(AtomicU64::new(0)),
        );
        drop(ticker);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(seen.lock().unwrap().is_empty());
    }
}
