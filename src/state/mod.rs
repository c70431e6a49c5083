//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` is the dumb persistence layer, `auth` the service and the reactive
//! context on top of it, `registration` the sign-up form checks.

pub mod auth;
pub mod registration;
pub mod session;
