//! Transient data models for upload URL issuance.
//!
//! Nothing here is persisted; each value lives for a single request.

pub mod upload;
