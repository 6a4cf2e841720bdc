pub mod envelope;

pub use envelope::{EnvelopeError, Transaction, TransactionOutput};
