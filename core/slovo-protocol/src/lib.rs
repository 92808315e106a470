pub mod error;
pub mod labels;
pub mod lexicon;
pub mod morphology;
pub mod tree;

// Re-export core types for convenience
pub use error::LexiconError;
pub use lexicon::{Lexicon, LexiconEntry};
pub use morphology::*;
pub use tree::*;
