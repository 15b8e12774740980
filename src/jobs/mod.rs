//! Asynchronous job orchestration core: record lifecycle, thread-safe
//! store, bounded worker dispatcher, and the orchestration routine.

pub mod model;
pub mod orchestrator;
pub mod runner;
pub mod store;

pub use model::{Job, JobInput, JobStatus};
pub use orchestrator::JobOrchestrator;
pub use runner::{JobRunner, Task};
pub use store::JobStore;
