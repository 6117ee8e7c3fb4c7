//! Visit workflow subsystem.
//!
//! A visit moves through clinic pipeline states; every observed transition is
//! handed to [`TriggerDispatcher::run_visit_triggers`], which resolves the
//! trigger list for the clinic's workflow template and executes each trigger
//! behind a log-and-continue boundary. Dispatch is request scoped and
//! fire-and-forget: nothing is queued, retried or rolled back, and a trigger
//! failure is invisible to the caller.

pub mod context;
pub mod dispatch;
pub mod spec;
pub mod template;
pub mod transition;
pub mod trigger;

pub use context::TriggerContext;
pub use dispatch::TriggerDispatcher;
pub use spec::{legacy_triggers, preset_triggers};
pub use template::WorkflowTemplate;
pub use transition::TransitionKey;
pub use trigger::Trigger;
