use crate::script::pushdrop::{PushDropToken, TokenDecodeError};
use crate::transaction::{EnvelopeError, Transaction};

/// Decodes the binary transaction envelope handed across the topic boundary.
///
/// A seam rather than a call: hosts embedding a platform SDK substitute
/// their own container format, and tests drive the admission core with
/// synthetic transactions.
pub trait EnvelopeDecoder {
    fn decode_transaction(&self, envelope: &[u8]) -> Result<Transaction, EnvelopeError>;
}

/// Reference decoder for the plain wire envelope.
#[derive(Debug, Default, Clone, Copy)]
pub struct WireEnvelopeDecoder;

impl EnvelopeDecoder for WireEnvelopeDecoder {
    fn decode_transaction(&self, envelope: &[u8]) -> Result<Transaction, EnvelopeError> {
        Transaction::from_wire(envelope)
    }
}

/// Extracts the ordered field list from one output's locking script.
pub trait TokenDecoder {
    fn decode_token(&self, locking_script: &[u8]) -> Result<PushDropToken, TokenDecodeError>;
}

/// Reference decoder for pushdrop-style commitment scripts.
#[derive(Debug, Default, Clone, Copy)]
pub struct PushDropTokenDecoder;

impl TokenDecoder for PushDropTokenDecoder {
    fn decode_token(&self, locking_script: &[u8]) -> Result<PushDropToken, TokenDecodeError> {
        PushDropToken::decode(locking_script)
    }
}
