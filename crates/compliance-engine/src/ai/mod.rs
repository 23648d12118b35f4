//! AI-assisted analyzer
//!
//! Builds a regulation-scoped prompt, sends it to a [`TextGenerator`] and
//! normalizes the reply. Every failure degrades to the baseline analyzer.

pub mod analyzer;
pub mod client;
pub mod prompt;

pub use analyzer::AiAnalyzer;
pub use client::{parse_envelope, GeminiClient, Generation, TextGenerator};
pub use prompt::{build_prompt, guidance_for, AnalysisRequest, MAX_VIOLATIONS};
