pub use alignment::AlignmentResult;
pub use outcome::{Outcome, TraceStats};

pub mod alignment;
mod outcome;
