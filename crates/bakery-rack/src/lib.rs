//! Name-keyed racks of cakes.
//!
//! A [`CakeRack`] maps names to optional [`Cake`]s. A `None` value is an
//! unresolved placeholder. The rack has a canonical serialization that does
//! not depend on insertion order, and its own identity is the folder cake of
//! that serialization.
//!
//! # Canonical Encoding
//!
//! Compact JSON holding two parallel arrays: the sorted names and, for each
//! name, the canonical cake string or `null`:
//!
//! ```text
//! [["a.txt","docs"],["blob:9f86d0...","folder:e3b0c4..."]]
//! ```
//!
//! # Design Rules
//!
//! 1. Names are unique and always iterated in lexicographic order.
//! 2. Two racks are equal iff their canonical bytes are equal.
//! 3. Derived values (bytes, size, cake, inverse map) are cached and dropped
//!    on every mutation; a stale value is never returned.
//! 4. Mutation needs `&mut self`. Share a rack across threads by reference
//!    only while nobody mutates it, or hand new versions over by value.

pub mod canonical;
pub mod error;
pub mod rack;

pub use canonical::{empty_rack_cake, EMPTY_RACK_BYTES};
pub use error::{RackError, RackResult};
pub use rack::CakeRack;

pub use bakery_types::{Cake, CakeKind};
