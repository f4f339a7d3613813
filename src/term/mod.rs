//! Line-buffering pseudo-terminal core: per-stream buffering state machine,
//! render sink contract, and the named-instance registry.

mod buffer;
mod registry;
mod sink;

pub use buffer::Terminal;
pub use registry::{SinkFactory, TerminalOptions, TerminalRegistry};
pub use sink::{RecordingSink, RenderSink, SinkRecord};
