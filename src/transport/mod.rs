mod factory;

pub use factory::{BoxedEventStream, EventStreamTransport, HttpEventStreamFactory};
