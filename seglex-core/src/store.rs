//! Annotation store contract and an in-memory implementation
//!
//! The segmentation stages only talk to an [`AnnotationStore`]: they create
//! spans of one configured type, index them, iterate them in index order and
//! remove the ones they supersede. [`Document`] is the store used by the
//! engine and the CLI.

use crate::span::TextSpan;
use std::sync::Arc;

/// Identifier of an annotation type inside a [`TypeSystem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(u32);

/// Handle to an annotation created in a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpanHandle(usize);

/// An indexed annotation as returned by ordered iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Handle for later removal
    pub handle: SpanHandle,
    /// Annotation type
    pub type_id: TypeId,
    /// Character range
    pub span: TextSpan,
    /// Text covered by the span
    pub covered_text: String,
}

/// Store of typed spans over one document's text
pub trait AnnotationStore {
    /// Resolve a type name against the store's type system
    fn resolve_type(&self, name: &str) -> Option<TypeId>;

    /// The document text as characters
    fn chars(&self) -> &[char];

    /// Document length in characters
    fn char_len(&self) -> usize {
        self.chars().len()
    }

    /// Create an annotation; it is not visible until indexed
    fn create_span(&mut self, type_id: TypeId, begin: usize, end: usize) -> SpanHandle;

    /// Make an annotation visible to ordered iteration
    fn add_to_index(&mut self, handle: SpanHandle);

    /// Hide an annotation from ordered iteration
    fn remove_from_index(&mut self, handle: SpanHandle);

    /// Indexed annotations of a type, by begin ascending then end descending
    fn iter_ordered(&self, type_id: TypeId) -> Vec<Annotation>;

    /// Text between two character offsets
    fn covered_text(&self, begin: usize, end: usize) -> String {
        self.chars()[begin..end].iter().collect()
    }
}

/// Registry of annotation type names
#[derive(Debug, Clone, Default)]
pub struct TypeSystem {
    names: Vec<String>,
}

impl TypeSystem {
    /// Empty type system
    pub fn new() -> Self {
        Self::default()
    }

    /// Type system holding the given names
    pub fn with_types<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut types = Self::new();
        for name in names {
            types.register(name);
        }
        types
    }

    /// Register a type name, returning the existing id if already known
    pub fn register(&mut self, name: impl Into<String>) -> TypeId {
        let name = name.into();
        if let Some(id) = self.resolve(&name) {
            return id;
        }
        self.names.push(name);
        TypeId((self.names.len() - 1) as u32)
    }

    /// Look a type name up
    pub fn resolve(&self, name: &str) -> Option<TypeId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|index| TypeId(index as u32))
    }

    /// Name of a registered type
    pub fn name(&self, id: TypeId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no type is registered
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Slot {
    type_id: TypeId,
    span: TextSpan,
    indexed: bool,
}

/// In-memory annotated document
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    chars: Vec<char>,
    types: Arc<TypeSystem>,
    slots: Vec<Slot>,
}

impl Document {
    /// New document without annotations
    pub fn new(text: impl Into<String>, types: Arc<TypeSystem>) -> Self {
        let text = text.into();
        let chars = text.chars().collect();
        Self {
            text,
            chars,
            types,
            slots: Vec::new(),
        }
    }

    /// The original text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The type system this document resolves names against
    pub fn type_system(&self) -> &TypeSystem {
        &self.types
    }

    /// Indexed spans of a type, in index order
    pub fn spans(&self, type_id: TypeId) -> Vec<TextSpan> {
        self.iter_ordered(type_id)
            .into_iter()
            .map(|a| a.span)
            .collect()
    }

    /// Indexed annotations of a type looked up by name
    pub fn annotations_named(&self, name: &str) -> Vec<Annotation> {
        self.resolve_type(name)
            .map(|id| self.iter_ordered(id))
            .unwrap_or_default()
    }

    /// Number of indexed annotations across all types
    pub fn indexed_len(&self) -> usize {
        self.slots.iter().filter(|s| s.indexed).count()
    }

    /// Drop every annotation, keeping the text
    pub fn clear_annotations(&mut self) {
        self.slots.clear();
    }
}

impl AnnotationStore for Document {
    fn resolve_type(&self, name: &str) -> Option<TypeId> {
        self.types.resolve(name)
    }

    fn chars(&self) -> &[char] {
        &self.chars
    }

    fn create_span(&mut self, type_id: TypeId, begin: usize, end: usize) -> SpanHandle {
        debug_assert!(begin <= end && end <= self.chars.len());
        self.slots.push(Slot {
            type_id,
            span: TextSpan::new(begin, end),
            indexed: false,
        });
        SpanHandle(self.slots.len() - 1)
    }

    fn add_to_index(&mut self, handle: SpanHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            slot.indexed = true;
        }
    }

    fn remove_from_index(&mut self, handle: SpanHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            slot.indexed = false;
        }
    }

    fn iter_ordered(&self, type_id: TypeId) -> Vec<Annotation> {
        let mut handles: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.indexed && slot.type_id == type_id)
            .map(|(index, _)| index)
            .collect();
        // Stable on creation order for identical spans
        handles.sort_by_key(|&index| self.slots[index].span);

        handles
            .into_iter()
            .map(|index| {
                let span = self.slots[index].span;
                Annotation {
                    handle: SpanHandle(index),
                    type_id,
                    span,
                    covered_text: span.text(&self.chars),
                }
            })
            .collect()
    }
}
