//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and talks to the auth context;
//! protected pages wrap their content in `ProtectedRoute`.

pub mod dashboard;
pub mod login;
pub mod profile;
pub mod register;
