// src/extractors/mod.rs
pub mod normalize;
pub mod section;
pub mod summary;

// Re-export key extraction types for convenience
pub use normalize::{RecordNormalizer, TransactionRecord};
pub use section::{SectionHeader, SectionSplitter};
pub use summary::SummaryRowParser;
