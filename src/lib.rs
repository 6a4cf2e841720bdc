//! Deterministic admission engine for UHRP overlay topics.
//!
//! `uhrp-core` decides which outputs of a transaction carry valid Universal
//! Hash Resolution Protocol storage-commitment advertisements and should be
//! admitted into a topic's tracked state. Evaluation is deterministic and
//! total over untrusted input: identical envelopes always produce identical
//! instructions, and no malformed output can fail an admission pass.
//!
//! The entry point is [`admission::UhrpTopicManager`].

pub mod admission;
pub mod advertisement;
pub mod script;
pub mod transaction;
pub mod types;
