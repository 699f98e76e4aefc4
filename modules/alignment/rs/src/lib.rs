pub use phrasal_core_rs::phrase::{Sequence, Token};

pub mod pairwise;

/// Alignment scores are float-valued; higher is better.
pub trait Score: phrasal_core_rs::num::Float {}

impl<T: phrasal_core_rs::num::Float> Score for T {}
