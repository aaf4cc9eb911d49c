//! Login credential handling.
//!
//! # Responsibility
//! - Validate user-supplied credentials before any network activity.
//! - Substitute credentials into the connection target template.
//!
//! # Invariants
//! - Passwords never appear in `Debug` output or log lines.

pub mod credentials;
