//! Repository layer for data access operations.
//!
//! Query functions take an explicit `&mut AsyncPgConnection`, so the same
//! call works on a plain pooled connection or inside an open transaction.

mod user_repo;

pub use user_repo::UserRepository;
