//! Extraction, decoding, validation and retry of model answers.

pub mod decoder;
pub mod escalation;
pub mod extractor;
pub mod orchestrator;
pub mod validator;
