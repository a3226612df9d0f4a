//! Authorization extractors.
//!
//! - [`auth::authorize`] -- the per-request gate: bearer header → verifier →
//!   scope check.
//! - [`rbac::Authorized`] -- extractor that runs the gate for a scope fixed
//!   at the type level (e.g. `Authorized<GetTalents>`).

pub mod auth;
pub mod rbac;
