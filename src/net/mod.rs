//! Networking modules for the SoftLink REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls, `error` classifies failures, and `types`
//! defines the wire schema plus the validated profile built from it.

pub mod api;
pub mod error;
pub mod types;
