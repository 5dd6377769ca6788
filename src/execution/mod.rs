//! # Execution Core
//!
//! Bounded dispatch of analysis round-trips and completion tracking.

pub mod completion;
pub mod dispatcher;
pub mod task;

pub use completion::CompletionHandle;
pub use dispatcher::{Dispatcher, DispatcherUsage};
pub use task::{AnalysisTask, ResponseOutcome};
