pub mod decode;

use thiserror::Error;
use tracing::{debug, warn};

use crate::advertisement::{UhrpAdvertisement, ValidationError};
use crate::script::pushdrop::TokenDecodeError;
use crate::transaction::Transaction;
use crate::types::admittance::{AdmittanceInstructions, AdmittanceSummary, TopicMetadata};
pub use decode::{EnvelopeDecoder, PushDropTokenDecoder, TokenDecoder, WireEnvelopeDecoder};

/// Why a single output was not admitted. Recovered at the per-output
/// boundary, surfaced through [`OutputEvaluation`] and the log, never
/// propagated across the topic boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Locking script is not a token commitment: {0}")]
    Decode(#[from] TokenDecodeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Verdict for one output of an evaluated transaction.
#[derive(Debug, Clone)]
pub struct OutputEvaluation {
    pub vout: u32,
    pub verdict: Result<UhrpAdvertisement, AdmissionError>,
}

/// Counters for one admission pass.
pub fn summarize(evaluations: &[OutputEvaluation]) -> AdmittanceSummary {
    let outputs_admitted = evaluations.iter().filter(|e| e.verdict.is_ok()).count();
    AdmittanceSummary {
        outputs_considered: evaluations.len(),
        outputs_admitted,
        outputs_rejected: evaluations.len() - outputs_admitted,
    }
}

const DOCUMENTATION: &str = "\
# UHRP Topic Manager

Admits transaction outputs that carry valid UHRP storage-commitment
advertisement tokens.

An output is admitted when its locking script decodes as a commitment token
and the token's fields satisfy all of:

- at least 5 fields;
- field 1 is a 32-byte SHA-256 content hash;
- field 2 is an absolute URL served over `https`;
- fields 3 and 4 are compact-size varints (expiry time and file size), each
  at least 1.

Outputs that fail any check are skipped; a transaction with no admissible
outputs contributes nothing to the topic.";

/// Stateless admission filter for the UHRP topic.
///
/// Generic over its two external collaborators (the envelope decoder and
/// the commitment-script decoder) so the validation core can be exercised
/// without a platform SDK. [`Default`] wires in the reference decoders.
pub struct UhrpTopicManager<E, D> {
    envelope_decoder: E,
    token_decoder: D,
}

impl Default for UhrpTopicManager<WireEnvelopeDecoder, PushDropTokenDecoder> {
    fn default() -> Self {
        Self {
            envelope_decoder: WireEnvelopeDecoder,
            token_decoder: PushDropTokenDecoder,
        }
    }
}

impl<E, D> UhrpTopicManager<E, D>
where
    E: EnvelopeDecoder,
    D: TokenDecoder,
{
    pub fn new(envelope_decoder: E, token_decoder: D) -> Self {
        Self {
            envelope_decoder,
            token_decoder,
        }
    }

    /// Decide which outputs of the enveloped transaction enter the topic.
    ///
    /// Total for any byte input. Decode and validation failures are logged
    /// and converted into non-admission; they never cross the topic
    /// boundary. When nothing is admissible the result is empty on both
    /// sides: the transaction contributes nothing and no previous coins
    /// are retained. When at least one output admits, `previous_coins` is
    /// passed through unchanged; pruning is the overlay engine's policy.
    pub fn identify_admissible_outputs(
        &self,
        envelope: &[u8],
        previous_coins: Vec<u32>,
    ) -> AdmittanceInstructions {
        let transaction = match self.envelope_decoder.decode_transaction(envelope) {
            Ok(transaction) => transaction,
            Err(error) => {
                warn!(%error, "transaction envelope failed to decode");
                return AdmittanceInstructions::none();
            }
        };

        let evaluations = self.evaluate_outputs(&transaction);

        let mut outputs_to_admit = Vec::new();
        for evaluation in &evaluations {
            match &evaluation.verdict {
                Ok(advertisement) => {
                    debug!(
                        vout = evaluation.vout,
                        content_hash = %advertisement.content_hash,
                        "output admitted"
                    );
                    outputs_to_admit.push(evaluation.vout);
                }
                Err(reason) => {
                    debug!(vout = evaluation.vout, %reason, "output rejected");
                }
            }
        }
        debug_assert!(outputs_to_admit.windows(2).all(|w| w[0] < w[1]));

        let summary = summarize(&evaluations);
        debug!(
            considered = summary.outputs_considered,
            admitted = summary.outputs_admitted,
            rejected = summary.outputs_rejected,
            "admission pass complete"
        );

        if outputs_to_admit.is_empty() {
            return AdmittanceInstructions::none();
        }
        AdmittanceInstructions {
            outputs_to_admit,
            coins_to_retain: previous_coins,
        }
    }

    /// Run decode + validation over every output, in index order.
    ///
    /// Each output is independent; one malformed output never aborts the
    /// rest. Exposed so hosts and tests can inspect rejection reasons
    /// without parsing logs.
    pub fn evaluate_outputs(&self, transaction: &Transaction) -> Vec<OutputEvaluation> {
        transaction
            .outputs
            .iter()
            .enumerate()
            .map(|(vout, output)| {
                let verdict = self
                    .token_decoder
                    .decode_token(&output.locking_script)
                    .map_err(AdmissionError::from)
                    .and_then(|token| {
                        UhrpAdvertisement::from_fields(&token.fields)
                            .map_err(AdmissionError::from)
                    });
                OutputEvaluation {
                    vout: vout as u32,
                    verdict,
                }
            })
            .collect()
    }

    /// Human-readable description of the admission rules, for the overlay
    /// network's registry.
    pub fn documentation(&self) -> &'static str {
        DOCUMENTATION
    }

    /// Structured metadata identifying this topic manager.
    pub fn metadata(&self) -> TopicMetadata {
        TopicMetadata {
            name: "UHRP".to_string(),
            short_description: "Tracks UHRP file-hosting commitment advertisements.".to_string(),
            icon_url: None,
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            information_url: None,
        }
    }
}
