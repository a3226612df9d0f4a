//! Repository layer.
//!
//! Entity repositories are zero-sized structs providing async methods that
//! accept `&SqlitePool` as the first argument. Every mutation runs in its own
//! transaction, committed on success and rolled back when dropped on any
//! error path.

pub mod casting_repo;
pub mod talent_repo;
pub mod token_store;
pub mod work_repo;

pub use casting_repo::CastingRepo;
pub use talent_repo::TalentRepo;
pub use token_store::TokenStore;
pub use work_repo::WorkRepo;
