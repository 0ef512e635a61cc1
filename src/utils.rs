//! Positional sequence helpers shared by every container node.
//!
//! Both helpers take the sequence by value and hand back a new one, so a
//! caller that still needs the old content must clone it first. Items are
//! addressed either by position or by the [`Handle`] issued when they were
//! inserted.

/// Opaque identity of an item inside one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    pub fn new(raw: u64) -> Self {
        Handle(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Where an insertion or removal applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum At {
    /// A position. For insertions a negative index means "first" and a
    /// non-negative one means "right after the item at this index".
    Index(isize),
    /// The item registered under this handle.
    Handle(Handle),
}

pub trait Identified {
    fn handle(&self) -> Handle;
}

#[must_use]
pub fn position_of<T: Identified>(seq: &[T], handle: Handle) -> Option<usize> {
    seq.iter().position(|item| item.handle() == handle)
}

/// Inserts `item` into `seq`.
///
/// Without `at` the item is appended. An index past the end, or a handle
/// that is not present, also appends.
#[must_use]
pub fn insert_at<T: Identified>(mut seq: Vec<T>, item: T, at: Option<At>) -> Vec<T> {
    let position = match at {
        None => seq.len(),
        Some(At::Index(index)) if index < 0 => 0,
        Some(At::Index(index)) => (index.unsigned_abs() + 1).min(seq.len()),
        Some(At::Handle(handle)) => position_of(&seq, handle).map_or(seq.len(), |i| i + 1),
    };
    seq.insert(position, item);
    seq
}

/// Removes the single item addressed by `at`.
///
/// Returns the remaining sequence and the removed item. Nothing is removed
/// when the index is out of range or the handle is not present.
#[must_use]
pub fn remove_at<T: Identified>(mut seq: Vec<T>, at: At) -> (Vec<T>, Option<T>) {
    let position = match at {
        At::Index(index) => usize::try_from(index).ok().filter(|i| *i < seq.len()),
        At::Handle(handle) => position_of(&seq, handle),
    };
    let removed = position.map(|i| seq.remove(i));
    (seq, removed)
}
