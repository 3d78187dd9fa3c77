//! Output sinks: terminal console, HTML mirror file, and a capturing sink
//! for tests

pub mod console;
pub mod html;
pub mod memory;

pub use console::{ConsoleSink, TermSink};
pub use html::HtmlSink;
pub use memory::{CapturedOutput, Chunk, MemorySink};
