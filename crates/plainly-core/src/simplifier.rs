//! Simplifier trait

use async_trait::async_trait;

use crate::Result;
use crate::types::{ComplexityLevel, SimplificationResult};

/// Trait for text simplification backends (local stub, HTTP service, ...)
///
/// Implementations are stateless request/response calls: the same instance
/// may be invoked any number of times, and no session is carried between
/// calls. Latency is expected to be on the order of seconds.
#[async_trait]
pub trait Simplifier: Send + Sync {
    /// Rewrite `text` for the given reading level
    async fn simplify(&self, text: &str, level: ComplexityLevel) -> Result<SimplificationResult>;

    /// Short name used in logs and the banner
    fn name(&self) -> &str;
}
