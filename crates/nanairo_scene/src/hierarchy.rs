//! Object tree derived from group levels
//!
//! Objects are stored flat. The parent of an object is the closest preceding
//! object whose `GroupLevel` is one less; a shallower object in between
//! closes the deeper groups before it.

use crate::document::{SceneObject, Transformation};

/// Parent/child links over a flat object list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectTree {
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
}

impl ObjectTree {
    /// Derive the tree from the order and group levels of `objects`.
    ///
    /// An object whose level jumps by more than one has no parent; the
    /// validation pass reports such documents.
    pub fn build(objects: &[SceneObject]) -> Self {
        let mut parents = Vec::with_capacity(objects.len());
        let mut children = vec![Vec::new(); objects.len()];
        // Last open object at each level
        let mut open: Vec<usize> = Vec::new();

        for (index, object) in objects.iter().enumerate() {
            let level = object.group_level as usize;
            let parent = match level {
                0 => None,
                _ => open.get(level - 1).copied(),
            };

            if let Some(parent) = parent {
                children[parent].push(index);
            }
            parents.push(parent);

            // A jumped-to level is never opened, so `open` grows by at most one
            if level <= open.len() {
                open.truncate(level);
                open.push(index);
            }
        }

        Self { parents, children }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.parents.get(index).copied().flatten()
    }

    pub fn children(&self, index: usize) -> &[usize] {
        self.children.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Objects without a parent
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, parent)| parent.is_none())
            .map(|(index, _)| index)
    }

    /// Ancestors of `index`, nearest first
    pub fn ancestors(&self, index: usize) -> Vec<usize> {
        let mut result = Vec::new();
        let mut current = self.parent(index);
        while let Some(parent) = current {
            result.push(parent);
            current = self.parent(parent);
        }
        result
    }

    /// An object is rendered only if it and all of its ancestors are enabled
    pub fn is_effectively_enabled(&self, objects: &[SceneObject], index: usize) -> bool {
        objects.get(index).map_or(false, |o| o.enabled)
            && self
                .ancestors(index)
                .into_iter()
                .all(|ancestor| objects.get(ancestor).map_or(false, |o| o.enabled))
    }

    /// Enabled transformations applying to `index`, outermost group first
    pub fn effective_transformations<'a>(
        &self,
        objects: &'a [SceneObject],
        index: usize,
    ) -> Vec<&'a Transformation> {
        let mut chain = self.ancestors(index);
        chain.reverse();
        chain.push(index);

        chain
            .into_iter()
            .filter_map(|i| objects.get(i))
            .flat_map(|object| object.transformation.iter())
            .filter(|t| t.is_enabled())
            .collect()
    }
}
