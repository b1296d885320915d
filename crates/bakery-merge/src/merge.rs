//! Rack-level merge: walk the sorted union of names and emit patch operations.

use std::cmp::Ordering;
use std::collections::btree_map::Keys;
use std::iter::Peekable;

use bakery_rack::CakeRack;
use bakery_types::Cake;
use tracing::{debug, trace};

use crate::config::MergeConfig;
use crate::error::MergeResult;
use crate::patch::PatchOp;

type Names<'a> = Keys<'a, String, Option<Cake>>;

/// Returns `true` if the entry for `name` is unresolved or holds a folder.
///
/// Absent names count as unresolved.
pub fn is_neuron(rack: &CakeRack, name: &str) -> bool {
    rack.get(name).map_or(true, |cake| cake.is_folder())
}

/// Patch operations turning `previous` into `current`, with the default
/// [`MergeConfig`].
pub fn merge<'a>(current: &'a CakeRack, previous: &'a CakeRack) -> Merge<'a> {
    merge_with(current, previous, MergeConfig::default())
}

/// Patch operations turning `previous` into `current`.
///
/// The returned iterator is lazy and borrows both racks. To start over, call
/// this function again.
pub fn merge_with<'a>(
    current: &'a CakeRack,
    previous: &'a CakeRack,
    config: MergeConfig,
) -> Merge<'a> {
    Merge {
        current,
        previous,
        names: SortedUnion::new(current.keys(), previous.keys()),
        pending: None,
        config,
    }
}

/// Replay patch operations onto `rack`.
///
/// `Update` sets the entry, `Delete` removes it. Deleting an absent name
/// fails and leaves the operations after it unapplied.
pub fn apply<I>(rack: &mut CakeRack, ops: I) -> MergeResult<()>
where
    I: IntoIterator<Item = PatchOp>,
{
    let mut applied = 0usize;
    for op in ops {
        match op {
            PatchOp::Update { name, cake } => rack.set(name, cake),
            PatchOp::Delete { name } => {
                rack.remove(&name)?;
            }
        }
        applied += 1;
    }
    debug!(applied, entries = rack.len(), "applied patch operations");
    Ok(())
}

/// Lazy iterator over the patch operations between two racks.
///
/// Operations come out in ascending name order. For a name whose neuron-ness
/// changed, the `Delete` is followed directly by the `Update`.
pub struct Merge<'a> {
    current: &'a CakeRack,
    previous: &'a CakeRack,
    names: SortedUnion<Names<'a>>,
    pending: Option<PatchOp>,
    config: MergeConfig,
}

impl<'a> Merge<'a> {
    fn step(&mut self, name: &'a str) -> Option<PatchOp> {
        if !self.current.contains(name) {
            return Some(PatchOp::delete(name));
        }
        let value = self.current.get(name).copied();
        if !self.previous.contains(name) {
            return Some(PatchOp::update(name, value));
        }
        if value == self.previous.get(name).copied() {
            return None;
        }

        let now = is_neuron(self.current, name);
        let before = is_neuron(self.previous, name);
        if now && before {
            if self.config.skip_neuron_changes {
                trace!(name, "skipping change between neurons");
                return None;
            }
            return Some(PatchOp::update(name, value));
        }
        if now == before {
            return Some(PatchOp::update(name, value));
        }

        trace!(name, now, before, "neuron-ness changed");
        self.pending = Some(PatchOp::update(name, value));
        Some(PatchOp::delete(name))
    }
}

impl Iterator for Merge<'_> {
    type Item = PatchOp;

    fn next(&mut self) -> Option<PatchOp> {
        if let Some(op) = self.pending.take() {
            return Some(op);
        }
        while let Some(name) = self.names.next() {
            if let Some(op) = self.step(name.as_str()) {
                return Some(op);
            }
        }
        None
    }
}

/// Merges two ascending streams, yielding each distinct item once.
struct SortedUnion<I: Iterator> {
    left: Peekable<I>,
    right: Peekable<I>,
}

impl<I: Iterator> SortedUnion<I> {
    fn new(left: I, right: I) -> Self {
        Self {
            left: left.peekable(),
            right: right.peekable(),
        }
    }
}

impl<I> Iterator for SortedUnion<I>
where
    I: Iterator,
    I::Item: Ord + Copy,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        match (self.left.peek().copied(), self.right.peek().copied()) {
            (Some(l), Some(r)) => match l.cmp(&r) {
                Ordering::Less => self.left.next(),
                Ordering::Greater => self.right.next(),
                Ordering::Equal => {
                    self.right.next();
                    self.left.next()
                }
            },
            (Some(_), None) => self.left.next(),
            (None, Some(_)) => self.right.next(),
            (None, None) => None,
        }
    }
}
