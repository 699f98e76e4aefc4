pub use alignment::{AlignmentResult, Outcome, TraceStats};

pub mod alignment;
pub mod nw;
pub mod scoring;
pub mod sw;

mod deadline;
mod table;
mod traceback;
