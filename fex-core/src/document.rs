//! The script document: an ordered collection of sections

use fex_config::CapacityConfig;
use tracing::debug;

use crate::arena::{self, OrderedArena};
use crate::error::{AllocTarget, ScriptError, ScriptResult};
use crate::name::Name;
use crate::section::{Section, SectionId};
use crate::targets;

/// A whole configuration script.
///
/// Owns its sections, which own their entries. Dropping (or
/// [`destroy`](Self::destroy)ing) a script tears the tree down bottom-up:
/// each section's entries go first, then the section, most recent section
/// first, then the document itself.
///
/// # Example
/// ```
/// use fex_core::{EntryKind, Script};
///
/// let mut script = Script::new();
/// let section = script.new_section("target").unwrap();
/// section.new_single_word("boot_clock", 24_000_000).unwrap();
///
/// let section = script.section_by_name("target").unwrap();
/// let entry = section.entries().next().unwrap();
/// assert_eq!(entry.kind(), EntryKind::SingleWord);
/// assert_eq!(entry.as_word(), Some(24_000_000));
/// ```
#[derive(Debug)]
pub struct Script {
    sections: OrderedArena<Section>,
    entry_capacity: usize,
}

impl Script {
    /// Create an empty script. Allocates nothing until the first section.
    pub fn new() -> Self {
        Self {
            sections: OrderedArena::new(),
            entry_capacity: 0,
        }
    }

    /// Create an empty script with storage reserved up front.
    ///
    /// Sections created in this script reserve `capacity.entries` entry slots.
    pub fn with_capacity(capacity: &CapacityConfig) -> ScriptResult<Self> {
        let sections = OrderedArena::try_with_capacity(capacity.sections)
            .map_err(ScriptError::alloc(AllocTarget::Document))?;
        debug!(
            target: targets::DOCUMENT,
            sections = capacity.sections,
            entries = capacity.entries,
            "create document"
        );
        Ok(Self {
            sections,
            entry_capacity: capacity.entries,
        })
    }

    /// Append a new, empty section at the tail.
    ///
    /// Only the first [`NAME_MAX`](crate::NAME_MAX) bytes of `name` are kept.
    /// On error the script is unchanged.
    pub fn new_section(&mut self, name: impl AsRef<[u8]>) -> ScriptResult<&mut Section> {
        let name = Name::new(name);
        debug_assert!(!name.is_empty(), "section name must not be empty");

        let entries = OrderedArena::try_with_capacity(self.entry_capacity)
            .map_err(ScriptError::alloc(AllocTarget::Section))?;
        let key = self
            .sections
            .try_push_back_with(|key| Section::new(SectionId(key), name, entries))
            .map_err(ScriptError::alloc(AllocTarget::Section))?;

        debug!(
            target: targets::DOCUMENT,
            section = %name,
            count = self.sections.len(),
            "append section"
        );
        match self.sections.get_mut(key) {
            Some(section) => Ok(section),
            None => unreachable!("section was just appended"),
        }
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.0)
    }

    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.get_mut(id.0)
    }

    /// First section with the given name, in insertion order.
    pub fn section_by_name(&self, name: impl AsRef<[u8]>) -> Option<&Section> {
        let name = Name::new(name);
        self.sections().find(|section| *section.name() == name)
    }

    /// Mutable access to the first section with the given name.
    pub fn section_by_name_mut(&mut self, name: impl AsRef<[u8]>) -> Option<&mut Section> {
        let id = self.section_by_name(name)?.id();
        self.section_mut(id)
    }

    /// Sections in insertion order
    pub fn sections(&self) -> Sections<'_> {
        Sections {
            inner: self.sections.iter(),
        }
    }

    /// Section handles in insertion order
    pub fn section_ids(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.sections().map(Section::id)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total entries across all sections
    pub fn entry_count(&self) -> usize {
        self.sections().map(Section::entry_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Destroy a section and all of its entries.
    ///
    /// Returns `false` if the handle was already destroyed.
    pub fn destroy_section(&mut self, id: SectionId) -> bool {
        match self.sections.remove(id.0) {
            Some(section) => {
                drop(section);
                true
            }
            None => false,
        }
    }

    /// Destroy every section, most recent first.
    pub fn clear(&mut self) {
        while let Some(section) = self.sections.pop_back() {
            drop(section);
        }
    }

    /// Destroy the whole tree. Equivalent to dropping the script.
    pub fn destroy(self) {
        drop(self);
    }
}

impl Clone for Script {
    /// Deep copy of the whole tree. Handles from this script resolve in the copy.
    fn clone(&self) -> Self {
        Self {
            sections: self.sections.clone_with(Section::duplicate),
            entry_capacity: self.entry_capacity,
        }
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Script {
    fn drop(&mut self) {
        let count = self.sections.len();
        self.clear();
        debug!(target: targets::DOCUMENT, sections = count, "destroy document");
    }
}

/// Insertion-order iterator over a script's sections
pub struct Sections<'a> {
    inner: arena::Iter<'a, Section>,
}

impl<'a> Iterator for Sections<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, section)| section)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Sections<'_> {}
