// MHEG - mheg-runtime
// Module: Content loading
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Content loader collaborator.
//!
//! The engine never blocks on content. [`ContentLoader::try_load`] either
//! hands the bytes over at once or answers [`ContentStatus::Pending`]; in
//! the latter case the embedder later calls
//! [`Engine::content_available`](crate::Engine::content_available).

use std::collections::{HashMap, HashSet};

use mheg_foundation::{ContentReference, GroupId, OctetString};

use crate::descriptor::GroupDescriptor;

/// Outcome of a content request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentStatus {
    /// Content is resident
    Ready(OctetString),
    /// Content will arrive through the content-available callback
    Pending,
}

/// Source of content and group descriptors
pub trait ContentLoader {
    /// Request the content behind `reference`
    fn try_load(&mut self, reference: &ContentReference) -> ContentStatus;

    /// Fetch and decode the application or scene `group`
    fn fetch_group(&mut self, group: &GroupId) -> Option<GroupDescriptor>;

    /// True if `reference` names content that exists
    fn check_content(&self, reference: &ContentReference) -> bool;
}

/// In-memory content loader
#[derive(Debug, Default)]
pub struct MemoryContentLoader {
    files:    HashMap<ContentReference, OctetString>,
    deferred: HashSet<ContentReference>,
    groups:   HashMap<GroupId, GroupDescriptor>,
    requests: Vec<ContentReference>,
}

impl MemoryContentLoader {
    /// Empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add resident content
    pub fn with_content(mut self, reference: impl Into<OctetString>, bytes: impl Into<OctetString>) -> Self {
        self.files.insert(ContentReference::new(reference), bytes.into());
        self
    }

    /// Add content that is known but answers `Pending`
    pub fn with_deferred(mut self, reference: impl Into<OctetString>) -> Self {
        self.deferred.insert(ContentReference::new(reference));
        self
    }

    /// Add a group descriptor
    pub fn with_group(mut self, descriptor: GroupDescriptor) -> Self {
        self.groups.insert(descriptor.group_identifier.clone(), descriptor);
        self
    }

    /// Every reference requested so far
    pub fn requests(&self) -> &[ContentReference] {
        &self.requests
    }
}

impl ContentLoader for MemoryContentLoader {
    fn try_load(&mut self, reference: &ContentReference) -> ContentStatus {
        self.requests.push(reference.clone());
        match self.files.get(reference) {
            Some(bytes) if !self.deferred.contains(reference) => ContentStatus::Ready(bytes.clone()),
            _ => ContentStatus::Pending,
        }
    }

    fn fetch_group(&mut self, group: &GroupId) -> Option<GroupDescriptor> {
        self.groups.get(group).cloned()
    }

    fn check_content(&self, reference: &ContentReference) -> bool {
        self.files.contains_key(reference) || self.deferred.contains(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_and_deferred() {
        let mut loader = MemoryContentLoader::new().with_content("a.png", "png").with_deferred("b.png");
        assert_eq!(loader.try_load(&ContentReference::new("a.png")), ContentStatus::Ready(OctetString::from("png")));
        assert_eq!(loader.try_load(&ContentReference::new("b.png")), ContentStatus::Pending);
        assert_eq!(loader.try_load(&ContentReference::new("c.png")), ContentStatus::Pending);
        assert!(loader.check_content(&ContentReference::new("b.png")));
        assert!(!loader.check_content(&ContentReference::new("c.png")));
        assert_eq!(loader.requests().len(), 3);
    }
}
