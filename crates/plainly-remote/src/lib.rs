//! HTTP simplification backend for Plainly
//!
//! This crate provides the networked implementation of the Simplifier trait.

mod client;
mod config;


pub use client::RemoteSimplifier;
pub use config::RemoteConfig;

// Re-export core types for convenience
pub use plainly_core::{
    CollaboratorError, ComplexityLevel, Error, Result, SimplificationResult, Simplifier,
};
