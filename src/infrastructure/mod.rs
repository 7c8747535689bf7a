// Infrastructure module - backoff scheduling, task ownership, side channels
pub mod backoff;
pub mod beacon;
pub mod task_registry;

pub use backoff::{Backoff, compute_delay};
pub use beacon::{AbortBeacon, thread_id_from_url};
pub use task_registry::TaskRegistry;
