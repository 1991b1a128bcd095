//! Core traits for chain entities
//!
//! These traits define the interface that the five tiers implement so the
//! traversal, ledger and purchase code can stay generic over them.

mod tier;

pub use tier::Tier;
