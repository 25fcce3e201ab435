// Toxicity scoring — trait-based abstraction over the remote classifier.
//
// The ToxicityScorer trait defines the interface; BertScorer implements
// it against the batch BERT HTTP service. Swapping in a different
// classifier means a new impl, nothing else moves.

pub mod bert;
pub mod traits;

pub use bert::BertScorer;
pub use traits::{ScoreResult, ToxicityScorer};
