//! Domain logic shared by the storage and HTTP layers.
//!
//! Nothing in this crate performs I/O. Storage lives in `castlist-db`, the
//! HTTP surface in `castlist-api`.

pub mod auth;
pub mod error;
pub mod naming;
pub mod pagination;
pub mod scopes;
pub mod types;
pub mod validation;
