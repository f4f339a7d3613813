//! Message dispatch: the tagged request type and the router that maps each
//! kind onto one terminal operation.

mod message;
mod router;

pub use message::OutputRequest;
pub use router::Dispatcher;
