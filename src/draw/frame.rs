//! Frame container for the ordered annotation list and its selection.

use super::shape::Annotation;

/// Container for all annotations in the current editing session.
///
/// Insertion order is z-order (first = bottom layer, last = top layer). The
/// selection is either `None` or a valid index into the list; every structural
/// removal resets it.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    shapes: Vec<Annotation>,
    selected: Option<usize>,
}

impl Frame {
    /// Creates a new empty frame with no annotations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an annotation on top of existing ones. Selection is untouched.
    pub fn append(&mut self, shape: Annotation) {
        self.shapes.push(shape);
    }

    /// Removes and returns the annotation at `index`, resetting selection.
    pub fn remove_at(&mut self, index: usize) -> Option<Annotation> {
        if index >= self.shapes.len() {
            return None;
        }
        self.selected = None;
        Some(self.shapes.remove(index))
    }

    /// Removes and returns the most recently added annotation, if any.
    pub fn remove_last(&mut self) -> Option<Annotation> {
        let removed = self.shapes.pop();
        if removed.is_some() {
            self.selected = None;
        }
        removed
    }

    /// Removes every annotation and clears selection.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.selected = None;
    }

    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.shapes.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Annotation> {
        self.shapes.get_mut(index)
    }

    /// Sets the selection. Out-of-range indices clear it and return `false`.
    pub fn set_selected(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i < self.shapes.len() => {
                self.selected = Some(i);
                true
            }
            Some(_) => {
                self.selected = None;
                false
            }
            None => {
                self.selected = None;
                true
            }
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Annotations in draw order (front-to-back means bottom first).
    pub fn shapes(&self) -> &[Annotation] {
        &self.shapes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
