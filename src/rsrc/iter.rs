//! Iteration over the resources of a container.

use std::iter::FusedIterator;
use std::slice;

use super::reader::ResourceContainer;
use super::types::models::{ResourceEntry, ResourceRef, ResourceType};

/// Iterator over the resources of a [`ResourceContainer`].
///
/// Entries are produced lazily by slicing the buffered container. The
/// container is immutable, so calling [`ResourceContainer::iter`] again
/// restarts from the first resource and yields the same sequence.
#[derive(Debug, Clone)]
pub struct ResourceIter<'a> {
    container: &'a ResourceContainer,
    refs: slice::Iter<'a, ResourceRef>,
    only: Option<ResourceType>,
    remaining: usize,
}

impl<'a> ResourceIter<'a> {
    pub(super) fn new(container: &'a ResourceContainer, only: Option<ResourceType>) -> Self {
        let refs = container.refs();
        let remaining = match only {
            Some(t) => refs.iter().filter(|r| r.resource_type == t).count(),
            None => refs.len(),
        };
        Self {
            container,
            refs: refs.iter(),
            only,
            remaining,
        }
    }
}

impl<'a> Iterator for ResourceIter<'a> {
    type Item = ResourceEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let only = self.only;
        let reference = self
            .refs
            .by_ref()
            .find(|r| only.is_none_or(|t| r.resource_type == t))?;
        self.remaining -= 1;
        Some(self.container.entry(reference))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ResourceIter<'_> {}

impl FusedIterator for ResourceIter<'_> {}
