//! Diff and merge engine for Bakery.
//!
//! Compares a current [`CakeRack`](bakery_rack::CakeRack) against a previous
//! one and lazily yields the [`PatchOp`]s that turn the previous rack into the
//! current one, walking names in sorted order.
//!
//! Entries that are unresolved or hold a folder cake are *neurons*. A change
//! between two neuron values is not reported at this level; a change between
//! a neuron and a leaf is reported as a delete followed by an update.
//!
//! # Key Types
//!
//! - [`Merge`] -- Lazy iterator of patch operations
//! - [`PatchOp`] -- `Update` or `Delete` of a single name
//! - [`MergeConfig`] -- Knobs for the merge walk
//! - [`apply`] -- Replay patch operations onto a rack

pub mod config;
pub mod error;
pub mod merge;
pub mod patch;

pub use config::MergeConfig;
pub use error::{MergeError, MergeResult};
pub use merge::{apply, is_neuron, merge, merge_with, Merge};
pub use patch::PatchOp;
