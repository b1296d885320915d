//! Foundation types for Bakery.
//!
//! A [`Cake`] (content address key) identifies a payload by the BLAKE3 hash of
//! its bytes plus a [`CakeKind`] tag telling whether the payload is a plain
//! blob or the canonical form of a folder (a rack of other cakes).
//!
//! # Key Types
//!
//! - [`Cake`] -- Immutable content identifier (digest + kind)
//! - [`CakeKind`] -- `Blob` or `Folder`
//! - [`CakeHasher`] -- Incremental hasher producing cakes
//! - [`ParseError`] -- Malformed cake encodings

pub mod cake;
pub mod error;
pub mod hasher;

pub use cake::{Cake, CakeKind, DIGEST_SIZE};
pub use error::ParseError;
pub use hasher::CakeHasher;
