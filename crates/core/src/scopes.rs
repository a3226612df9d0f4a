//! Well-known permission scope names.
//!
//! These must match the permissions configured on the identity provider's API.

pub const GET_TALENTS: &str = "get:actors";
pub const POST_TALENTS: &str = "post:actors";
pub const PATCH_TALENTS: &str = "patch:actors";
pub const DELETE_TALENTS: &str = "delete:actors";

pub const GET_WORKS: &str = "get:movies";
pub const POST_WORKS: &str = "post:movies";
pub const PATCH_WORKS: &str = "patch:movies";
pub const DELETE_WORKS: &str = "delete:movies";
