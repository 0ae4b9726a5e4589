//! The closed tool set the review loop exposes to the model.
//!
//! Tools are a tagged enum, not a name→handler map: [`kind::ToolKind`]
//! enumerates exactly the six operations a review run supports, each with
//! its own strongly-typed argument struct, and [`exec::ToolExecutor`]
//! dispatches with compile-time exhaustiveness. Raw model output is treated
//! as untrusted input — arguments are validated by typed deserialization
//! before any handler touches the session state.

pub mod alignment;
pub mod analyze;
pub mod exec;
pub mod kind;

pub use alignment::{AlignmentReport, TitlePosition};
pub use analyze::{AnalysisEntry, AnalysisVerdict};
pub use exec::{ToolExecutor, ToolOutput};
pub use kind::ToolKind;
