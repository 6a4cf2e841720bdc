use serde::{Deserialize, Serialize};

/// Instructions handed back to the overlay engine after evaluating one
/// transaction against the topic.
///
/// Serialized field names follow the overlay engine's JSON contract
/// (`outputsToAdmit`, `coinsToRetain`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmittanceInstructions {
    /// Indices of the evaluated transaction's outputs to admit, ascending.
    pub outputs_to_admit: Vec<u32>,
    /// Previously admitted coins to keep tracking, unchanged from the
    /// caller's input whenever anything was admitted.
    pub coins_to_retain: Vec<u32>,
}

impl AdmittanceInstructions {
    /// The "this transaction contributes nothing to the topic" result.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Registry metadata identifying a topic manager to the overlay network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMetadata {
    pub name: String,
    pub short_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_url: Option<String>,
}

/// Counters describing one admission pass, mirrored into the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmittanceSummary {
    pub outputs_considered: usize,
    pub outputs_admitted: usize,
    pub outputs_rejected: usize,
}
