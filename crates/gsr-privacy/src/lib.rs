//! # gsr-privacy
//!
//! The two boundary collaborators that touch raw user input: reporter
//! identity hashing and phone number normalization. Raw identities never
//! leave this crate; only keyed hashes do.

pub mod hasher;
pub mod normalizer;

pub use hasher::{global_hasher, init_global_hasher, Blake3IdentityHasher};
pub use normalizer::PhoneNumberNormalizer;
