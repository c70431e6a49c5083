//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep routing rules, role mapping and token decoding out of
//! page code so they can be tested without a browser.

pub mod auth;
pub mod role_view;
pub mod token;
