//! Authorization decisions and authorization code issuance.
//!
//! ## Workflows
//! - Authorize: extract the bearer credential, classify it, look it up and
//!   build a decision scoped to the requested resource
//! - Issue authorization code: validate the request, then run the provider's
//!   two-phase ticket/issue exchange

pub mod credential;
pub mod models;
pub mod policy;
pub mod service;
pub mod validation;
