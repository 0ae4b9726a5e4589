//! # deckproof core
//!
//! Domain types, traits, and error definitions for the deckproof review
//! pipeline. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The review session is a single mutable [`AgentState`] driven by a bounded
//! tool-calling loop. Everything that crosses a crate boundary — extracted
//! slide content, proposed corrections, the model transcript — is a plain
//! value type defined here, so the document and provider backends stay
//! swappable and testable.

pub mod content;
pub mod correction;
pub mod error;
pub mod message;
pub mod provider;
pub mod state;

// Re-export key types at crate root for ergonomics
pub use content::{ParagraphInfo, RunInfo, ShapeInfo, SlideContent};
pub use correction::{Correction, CorrectionCategory};
pub use error::{DocumentError, Error, ProviderError, Result, ToolError};
pub use message::{Message, MessageToolCall, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
pub use state::{AgentState, RunSummary};
