//! Offline stand-in for the simplification service

use async_trait::async_trait;
use std::time::Duration;

use crate::Result;
use crate::simplifier::Simplifier;
use crate::types::{ComplexityLevel, SimplificationResult};

/// Returns canned rewrites picked by level after a fixed delay
#[derive(Debug, Clone)]
pub struct StubSimplifier {
    delay: Duration,
}

impl StubSimplifier {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    pub fn new() -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn canned(level: ComplexityLevel) -> SimplificationResult {
        match level {
            ComplexityLevel::Child => SimplificationResult {
                simplified: concat!(
                    "<p class=\"level-badge\">Explained for a 10-year-old:</p>",
                    "<p>Think of a piggy bank just for doctor visits. You pay for your own bumps and scrapes ",
                    "until you have spent a set amount of money. That amount is called a ",
                    "<span class=\"highlight-important\" title=\"Money you pay first\">deductible</span>.</p>",
                    "<p>After that, we pay for the rest! Just remember to hand in your homework (the paperwork) on time.</p>",
                )
                .to_string(),
                key_points: vec![
                    "You pay from your piggy bank first.".to_string(),
                    "Hand in your homework on time.".to_string(),
                    "We pay once you reach your limit.".to_string(),
                ],
            },
            ComplexityLevel::Standard => SimplificationResult {
                simplified: concat!(
                    "<p>You only pay your own medical costs up to your ",
                    "<span class=\"highlight-important\" title=\"The most you pay before insurance helps\">yearly deductible</span>.</p>",
                    "<p>This holds as long as you send us the ",
                    "<span class=\"highlight-important\" title=\"Forms such as receipts and claims\">required paperwork</span> before the deadline.</p>",
                    "<p>Once you have paid that amount, we cover the rest.</p>",
                )
                .to_string(),
                key_points: vec![
                    "You pay costs until you reach your deductible.".to_string(),
                    "Paperwork must be sent in on time.".to_string(),
                    "Insurance pays once the limit is reached.".to_string(),
                ],
            },
        }
    }
}

impl Default for StubSimplifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Simplifier for StubSimplifier {
    async fn simplify(&self, _text: &str, level: ComplexityLevel) -> Result<SimplificationResult> {
        tracing::debug!(%level, delay_ms = self.delay.as_millis() as u64, "stub simplify");
        tokio::time::sleep(self.delay).await;
        Ok(Self::canned(level))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_response_depends_on_level_only() {
        let stub = StubSimplifier::new();
        let a = stub.simplify("some long text here", ComplexityLevel::Child).await.unwrap();
        let b = stub.simplify("different long text", ComplexityLevel::Child).await.unwrap();
        let c = stub.simplify("some long text here", ComplexityLevel::Standard).await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.key_points.len(), 3);
        assert!(a.simplified.contains("10-year-old"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_configured_delay() {
        let stub = StubSimplifier::new().with_delay(Duration::from_secs(5));
        let start = tokio::time::Instant::now();
        stub.simplify("some long text here", ComplexityLevel::Standard)
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
