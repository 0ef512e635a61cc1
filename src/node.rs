//! The output-tree node model.
//!
//! Every dialect expresses its nodes as a closed enum and implements the
//! capability traits below per variant. Containers store their children in an
//! [`ArrayNode`], which issues a [`Handle`] for every child it accepts.
//!
//! Nodes own their children exclusively, so `Clone` is a deep copy and a
//! clone can be mutated without touching its source.

use crate::error::FormatError;
use crate::utils::{self, At, Handle, Identified};
use std::fmt;
use std::sync::Arc;

/// Separator placed between array items unless another one is configured.
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Descriptive metadata attached to a node, mainly to flag nodes the
/// pipeline synthesized instead of translating them from the AST.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotations {
    pub description: Option<String>,
}

impl Annotations {
    pub fn described(description: impl Into<String>) -> Self {
        Annotations {
            description: Some(description.into()),
        }
    }
}

pub trait Render {
    /// Produces the final markup for this node and everything below it.
    ///
    /// # Errors
    /// Returns `FormatError::NotStringifiable` when an array holds an item
    /// with no textual form.
    fn render(&self) -> Result<String, FormatError>;
}

pub trait OutputNode: Render + Clone + fmt::Debug {
    fn annotations(&self) -> Option<&Annotations> {
        None
    }
}

pub trait NodesContainer<N> {
    fn child_nodes(&self) -> Vec<&N>;

    fn child_count(&self) -> usize {
        self.child_nodes().len()
    }
}

pub trait ModifiableNodesContainer<N>: NodesContainer<N> {
    /// Adds `node` at `at` (appends when `None`) and returns the new child count.
    ///
    /// # Errors
    /// `IndexOutOfRange` for a non-negative index past the last child,
    /// `UnknownHandle` for a handle this container never issued.
    fn add_child_node(&mut self, node: N, at: Option<At>) -> Result<usize, FormatError>;

    /// Removes the child addressed by `at`.
    ///
    /// Returns `None` when `at` is a handle that is no longer present.
    ///
    /// # Errors
    /// `IndexOutOfRange` for an index that does not address a child.
    fn remove_child_node(&mut self, at: At) -> Result<Option<N>, FormatError>;

    /// The handle of the child currently at `index`.
    fn child_handle(&self, index: usize) -> Option<Handle>;
}

/// Anything an [`ArrayNode`] can hold.
///
/// Output nodes return their own rendering; other item types rely on the
/// array's stringifier.
pub trait ArrayItem: Clone + fmt::Debug {
    fn render_item(&self) -> Option<Result<String, FormatError>> {
        None
    }
}

pub type Stringifier<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: Handle,
    item: T,
}

impl<T> Identified for Entry<T> {
    fn handle(&self) -> Handle {
        self.handle
    }
}

/// Ordered, positionally addressable collection of items of one type.
#[derive(Clone)]
pub struct ArrayNode<T> {
    entries: Vec<Entry<T>>,
    next_handle: u64,
    stringifier: Option<Stringifier<T>>,
    separator: String,
}

impl<T: ArrayItem> ArrayNode<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut array = ArrayNode {
            entries: Vec::with_capacity(items.len()),
            next_handle: 0,
            stringifier: None,
            separator: DEFAULT_SEPARATOR.to_string(),
        };
        for item in items {
            let handle = array.issue_handle();
            array.entries.push(Entry { handle, item });
        }
        array
    }

    pub fn with_stringifier(
        items: Vec<T>,
        stringifier: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        let mut array = ArrayNode::new(items);
        array.stringifier = Some(Arc::new(stringifier));
        array
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|e| &e.item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.item)
    }

    pub fn items(&self) -> Vec<&T> {
        self.iter().collect()
    }

    pub fn into_items(self) -> Vec<T> {
        self.entries.into_iter().map(|e| e.item).collect()
    }

    pub fn handle_at(&self, index: usize) -> Option<Handle> {
        self.entries.get(index).map(|e| e.handle)
    }

    /// Adds an item and returns the new length.
    ///
    /// # Errors
    /// See [`ModifiableNodesContainer::add_child_node`].
    pub fn add(&mut self, item: T, at: Option<At>) -> Result<usize, FormatError> {
        match at {
            Some(At::Index(index)) if index >= 0 && index.unsigned_abs() >= self.len() => {
                return Err(FormatError::IndexOutOfRange {
                    index,
                    len: self.len(),
                });
            }
            Some(At::Handle(handle)) if utils::position_of(&self.entries, handle).is_none() => {
                return Err(FormatError::UnknownHandle {
                    handle: handle.raw(),
                });
            }
            _ => {}
        }
        let entry = Entry {
            handle: self.issue_handle(),
            item,
        };
        let entries = std::mem::take(&mut self.entries);
        self.entries = utils::insert_at(entries, entry, at);
        Ok(self.len())
    }

    /// Removes an item.
    ///
    /// # Errors
    /// See [`ModifiableNodesContainer::remove_child_node`].
    pub fn remove(&mut self, at: At) -> Result<Option<T>, FormatError> {
        if let At::Index(index) = at {
            if index < 0 || index.unsigned_abs() >= self.len() {
                return Err(FormatError::IndexOutOfRange {
                    index,
                    len: self.len(),
                });
            }
        }
        let entries = std::mem::take(&mut self.entries);
        let (entries, removed) = utils::remove_at(entries, at);
        self.entries = entries;
        Ok(removed.map(|e| e.item))
    }

    fn issue_handle(&mut self) -> Handle {
        let handle = Handle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn item_to_string(&self, item: &T) -> Result<String, FormatError> {
        if let Some(rendered) = item.render_item() {
            return rendered;
        }
        match &self.stringifier {
            Some(stringify) => Ok(stringify(item)),
            None => Err(FormatError::NotStringifiable {
                item: format!("{item:?}"),
            }),
        }
    }
}

impl<T: ArrayItem> Default for ArrayNode<T> {
    fn default() -> Self {
        ArrayNode::new(Vec::new())
    }
}

impl<T: ArrayItem> Render for ArrayNode<T> {
    fn render(&self) -> Result<String, FormatError> {
        let parts = self
            .iter()
            .map(|item| self.item_to_string(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(&self.separator))
    }
}

impl<T: ArrayItem> OutputNode for ArrayNode<T> {}

impl<T: ArrayItem> NodesContainer<T> for ArrayNode<T> {
    fn child_nodes(&self) -> Vec<&T> {
        self.items()
    }

    fn child_count(&self) -> usize {
        self.len()
    }
}

impl<T: ArrayItem> ModifiableNodesContainer<T> for ArrayNode<T> {
    fn add_child_node(&mut self, node: T, at: Option<At>) -> Result<usize, FormatError> {
        self.add(node, at)
    }

    fn remove_child_node(&mut self, at: At) -> Result<Option<T>, FormatError> {
        self.remove(at)
    }

    fn child_handle(&self, index: usize) -> Option<Handle> {
        self.handle_at(index)
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayNode")
            .field(
                "items",
                &self.entries.iter().map(|e| &e.item).collect::<Vec<_>>(),
            )
            .field("separator", &self.separator)
            .field("stringifier", &self.stringifier.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Word(&'static str);

    impl ArrayItem for Word {}

    #[derive(Debug, Clone)]
    struct Shout(&'static str);

    impl ArrayItem for Shout {
        fn render_item(&self) -> Option<Result<String, FormatError>> {
            Some(Ok(self.0.to_uppercase()))
        }
    }

    #[test]
    fn test_empty_array_renders_empty() {
        assert_eq!(ArrayNode::<Shout>::new(vec![]).render().unwrap(), "");
    }

    #[test]
    fn test_single_item_has_no_separator() {
        assert_eq!(ArrayNode::new(vec![Shout("hi")]).render().unwrap(), "HI");
    }

    #[test]
    fn test_items_joined_with_default_separator() {
        let array = ArrayNode::new(vec![Shout("a"), Shout("b"), Shout("c")]);
        assert_eq!(array.render().unwrap(), "A\nB\nC");
    }

    #[test]
    fn test_custom_separator() {
        let array = ArrayNode::new(vec![Shout("a"), Shout("b")]).with_separator(", ");
        assert_eq!(array.render().unwrap(), "A, B");
    }

    #[test]
    fn test_stringifier_renders_plain_items() {
        let array = ArrayNode::with_stringifier(vec![Word("Hello"), Word("World")], |w| {
            format!("v:{}", w.0)
        });
        assert_eq!(array.render().unwrap(), "v:Hello\nv:World");
    }

    #[test]
    fn test_missing_stringifier_fails() {
        let array = ArrayNode::new(vec![Word("Hello")]);
        assert!(matches!(
            array.render(),
            Err(FormatError::NotStringifiable { .. })
        ));
    }

    #[test]
    fn test_add_and_remove_by_handle() {
        let mut array = ArrayNode::new(vec![Word("a"), Word("c")]);
        let first = array.handle_at(0).unwrap();
        assert_eq!(array.add(Word("b"), Some(At::Handle(first))).unwrap(), 3);
        assert_eq!(array.items(), vec![&Word("a"), &Word("b"), &Word("c")]);

        let b = array.handle_at(1).unwrap();
        assert_eq!(array.remove(At::Handle(b)).unwrap(), Some(Word("b")));
        assert_eq!(array.remove(At::Handle(b)).unwrap(), None);
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn test_handles_survive_reordering() {
        let mut array = ArrayNode::new(vec![Word("a"), Word("b")]);
        let b = array.handle_at(1).unwrap();
        array.add(Word("z"), Some(At::Index(-1))).unwrap();
        assert_eq!(array.handle_at(2), Some(b));
    }

    #[test]
    fn test_out_of_range_index_fails() {
        let mut array = ArrayNode::new(vec![Word("a")]);
        assert_eq!(
            array.add(Word("b"), Some(At::Index(1))),
            Err(FormatError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            array.remove(At::Index(3)),
            Err(FormatError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn test_unknown_handle_on_insert_fails() {
        let mut array = ArrayNode::new(vec![Word("a")]);
        assert!(matches!(
            array.add(Word("b"), Some(At::Handle(Handle::new(99)))),
            Err(FormatError::UnknownHandle { handle: 99 })
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = ArrayNode::new(vec![Shout("a")]);
        let mut copy = original.clone();
        copy.add(Shout("b"), None).unwrap();
        assert_eq!(original.render().unwrap(), "A");
        assert_eq!(copy.render().unwrap(), "A\nB");
    }
}
