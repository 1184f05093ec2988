//! Background worker for deferred sorting.
//!
//! Sorting runs on a Zellij worker thread so key handling and rendering stay
//! responsive while a large list is reordered. The plugin marks itself as
//! "sorting" until the matching response arrives.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::CovidashWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
