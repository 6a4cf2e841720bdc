pub mod admittance;
pub mod identifiers;

pub use admittance::{AdmittanceInstructions, AdmittanceSummary, TopicMetadata};
pub use identifiers::{ContentHash, ContentHashError, CONTENT_HASH_LEN};
