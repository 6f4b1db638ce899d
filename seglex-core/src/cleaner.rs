//! Removal of spans contained in other spans

use crate::span::TextSpan;
use crate::store::{AnnotationStore, TypeId};

/// Positions of spans contained in an earlier span of the same list.
///
/// `spans` must be in index order (begin ascending, end descending). A
/// buffer of candidate containers is kept until a span starts past the
/// furthest end seen so far; spans marked for removal stay in the buffer
/// because they can still contain later, more nested spans.
pub fn contained_indices(spans: &[TextSpan]) -> Vec<usize> {
    let mut removed = Vec::new();
    let mut buffer: Vec<TextSpan> = Vec::new();
    let mut last_end: Option<usize> = None;

    for (index, span) in spans.iter().enumerate() {
        match last_end {
            Some(end) if span.begin <= end => {
                if buffer.iter().any(|container| container.contains(span)) {
                    removed.push(index);
                }
            }
            // No earlier span can reach this one
            _ => buffer.clear(),
        }
        last_end = Some(last_end.map_or(span.end, |end| end.max(span.end)));
        buffer.push(*span);
    }

    removed
}

/// Sort spans into index order and drop every contained span
pub fn remove_contained(mut spans: Vec<TextSpan>) -> Vec<TextSpan> {
    spans.sort();
    let removed = contained_indices(&spans);

    let mut removed = removed.into_iter().peekable();
    spans
        .into_iter()
        .enumerate()
        .filter(|(index, _)| {
            if removed.peek() == Some(index) {
                removed.next();
                false
            } else {
                true
            }
        })
        .map(|(_, span)| span)
        .collect()
}

/// Applies containment cleanup to an annotation store
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapCleaner;

impl OverlapCleaner {
    /// Remove from the index every annotation of `type_id` contained in
    /// another one. Returns the number of annotations removed.
    pub fn clean<S: AnnotationStore + ?Sized>(&self, store: &mut S, type_id: TypeId) -> usize {
        let annotations = store.iter_ordered(type_id);
        let spans: Vec<TextSpan> = annotations.iter().map(|a| a.span).collect();
        let removed = contained_indices(&spans);

        for &index in &removed {
            store.remove_from_index(annotations[index].handle);
        }

        tracing::trace!(
            scanned = annotations.len(),
            removed = removed.len(),
            "contained spans removed"
        );
        removed.len()
    }
}
