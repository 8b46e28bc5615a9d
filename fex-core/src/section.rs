//! Sections: named, ordered collections of entries

use tracing::debug;

use crate::arena::{self, Key, OrderedArena};
use crate::entry::{ByteString, Entry, EntryId, Gpio, Value};
use crate::error::{AllocTarget, ScriptError, ScriptResult};
use crate::name::Name;
use crate::targets;

/// Handle to a section, valid for the document that issued it until the
/// section is destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SectionId(pub(crate) Key);

/// A named, ordered collection of entries.
///
/// Sections are only created through [`Script::new_section`](crate::Script::new_section)
/// and own their entries exclusively. Dropping a section destroys its
/// entries first, most recent first.
///
/// A section cannot be copied out of its document; clone the whole
/// [`Script`](crate::Script) instead.
///
/// ```compile_fail
/// fn assert_clone<T: Clone>() {}
/// assert_clone::<fex_core::Section>();
/// ```
#[derive(Debug)]
pub struct Section {
    id: SectionId,
    name: Name,
    entries: OrderedArena<Entry>,
}

impl Section {
    pub(crate) fn new(id: SectionId, name: Name, entries: OrderedArena<Entry>) -> Self {
        Self { id, name, entries }
    }

    /// Deep copy for cloning the owning script. Id and entry handles carry over.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            id: self.id,
            name: self.name,
            entries: self.entries.clone(),
        }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a marker entry with no payload.
    pub fn new_null(&mut self, name: impl AsRef<[u8]>) -> ScriptResult<EntryId> {
        let name = Name::new(name);
        debug_assert!(!name.is_empty(), "null entry name must not be empty");
        self.append(name, Value::Null)
    }

    /// Append a 32-bit word entry.
    pub fn new_single_word(&mut self, name: impl AsRef<[u8]>, value: u32) -> ScriptResult<EntryId> {
        let name = Name::new(name);
        debug_assert!(!name.is_empty(), "single word entry name must not be empty");
        self.append(name, Value::SingleWord(value))
    }

    /// Append a byte string entry.
    ///
    /// The slice length is the payload length; every byte is copied verbatim,
    /// embedded NULs included. The name may be empty.
    pub fn new_string(&mut self, name: impl AsRef<[u8]>, bytes: &[u8]) -> ScriptResult<EntryId> {
        let payload = ByteString::try_from_bytes(bytes)?;
        self.append(Name::new(name), Value::String(payload))
    }

    /// Append a GPIO descriptor entry. Nothing about the pin is validated.
    pub fn new_gpio(
        &mut self,
        name: impl AsRef<[u8]>,
        port: u32,
        port_num: u32,
        data: [i32; 4],
    ) -> ScriptResult<EntryId> {
        let name = Name::new(name);
        debug_assert!(!name.is_empty(), "gpio entry name must not be empty");
        self.append(name, Value::Gpio(Gpio::new(port, port_num, data)))
    }

    fn append(&mut self, name: Name, value: Value) -> ScriptResult<EntryId> {
        let kind = value.kind();
        let key = self
            .entries
            .try_push_back_with(|key| Entry::new(EntryId(key), name, value))
            .map_err(ScriptError::alloc(AllocTarget::Entry))?;

        debug!(
            target: targets::SECTION,
            section = %self.name,
            entry = %name,
            %kind,
            count = self.entries.len(),
            "append entry"
        );
        Ok(EntryId(key))
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.0)
    }

    /// First entry with the given name, in insertion order.
    pub fn entry_by_name(&self, name: impl AsRef<[u8]>) -> Option<&Entry> {
        let name = Name::new(name);
        self.entries().find(|entry| *entry.name() == name)
    }

    /// Entries in insertion order
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            inner: self.entries.iter(),
        }
    }

    /// Destroy one entry. Returns `false` if the handle was already destroyed.
    pub fn destroy_entry(&mut self, id: EntryId) -> bool {
        match self.entries.remove(id.0) {
            Some(entry) => {
                entry.release();
                true
            }
            None => false,
        }
    }

    /// Destroy every entry, most recent first.
    pub fn clear(&mut self) {
        while let Some(entry) = self.entries.pop_back() {
            entry.release();
        }
    }
}

impl Drop for Section {
    fn drop(&mut self) {
        let count = self.entries.len();
        self.clear();
        debug!(target: targets::SECTION, section = %self.name, entries = count, "destroy section");
    }
}

/// Insertion-order iterator over a section's entries
pub struct Entries<'a> {
    inner: arena::Iter<'a, Entry>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, entry)| entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;
    use crate::reserve;
    use crate::Script;

    fn names(section: &Section) -> Vec<String> {
        section.entries().map(|e| e.name().to_string()).collect()
    }

    #[test]
    fn test_entries_in_creation_order() {
        let mut script = Script::new();
        let section = script.new_section("misc").unwrap();
        section.new_null("a").unwrap();
        section.new_single_word("b", 1).unwrap();
        section.new_string("c", b"x").unwrap();
        section.new_gpio("d", 0, 0, [0; 4]).unwrap();

        let kinds: Vec<EntryKind> = section.entries().map(Entry::kind).collect();
        assert_eq!(
            kinds,
            vec![EntryKind::Null, EntryKind::SingleWord, EntryKind::String, EntryKind::Gpio]
        );
        let names: Vec<String> = section.entries().map(|e| e.name().to_string()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_destroy_entry_detaches_once() {
        let mut script = Script::new();
        let section = script.new_section("misc").unwrap();
        let a = section.new_single_word("a", 1).unwrap();
        let b = section.new_single_word("b", 2).unwrap();

        assert!(section.destroy_entry(a));
        assert!(!section.destroy_entry(a));
        assert!(section.entry(a).is_none());
        assert_eq!(section.entry(b).and_then(Entry::as_word), Some(2));
        assert_eq!(section.entry_count(), 1);
    }

    #[test]
    fn test_entry_id_matches_lookup() {
        let mut script = Script::new();
        let section = script.new_section("misc").unwrap();
        let id = section.new_null("flag").unwrap();
        assert_eq!(section.entry(id).map(Entry::id), Some(id));
    }

    #[test]
    fn test_entry_by_name_returns_first_duplicate() {
        let mut script = Script::new();
        let section = script.new_section("dup").unwrap();
        section.new_single_word("x", 1).unwrap();
        section.new_single_word("x", 2).unwrap();
        assert_eq!(section.entry_by_name("x").and_then(Entry::as_word), Some(1));
        assert!(section.entry_by_name("y").is_none());
    }

    #[test]
    fn test_entry_by_name_uses_truncated_name() {
        let mut script = Script::new();
        let section = script.new_section("long").unwrap();
        let long = "n".repeat(40);
        section.new_null(&long).unwrap();
        assert!(section.entry_by_name(&long).is_some());
        assert!(section.entry_by_name("n".repeat(31)).is_some());
    }

    #[test]
    fn test_string_entry_may_have_empty_name() {
        let mut script = Script::new();
        let section = script.new_section("s").unwrap();
        let id = section.new_string("", b"payload").unwrap();
        let entry = section.entry(id).unwrap();
        assert!(entry.name().is_empty());
        assert_eq!(entry.as_bytes(), Some(&b"payload"[..]));
    }

    #[test]
    fn test_entry_ids_not_shared_between_sections() {
        let mut script = Script::new();
        let first = script.new_section("one").unwrap();
        let id = first.new_null("a").unwrap();
        let second = script.new_section("two").unwrap();
        second.new_null("a").unwrap();
        assert!(second.entry(id).is_none());
        assert!(!second.destroy_entry(id));
        assert_eq!(second.entry_count(), 1);
    }

    #[test]
    fn test_clear_empties_section() {
        let mut script = Script::new();
        let section = script.new_section("s").unwrap();
        for i in 0..4 {
            section.new_single_word(format!("w{i}"), i).unwrap();
        }
        section.clear();
        assert!(section.is_empty());
        assert_eq!(section.entries().count(), 0);
    }

    #[test]
    fn test_entry_slot_failure_leaves_section_unchanged() {
        let mut script = Script::new();
        let section = script.new_section("dram").unwrap();
        section.new_single_word("clk", 480).unwrap();
        section.new_null("zq").unwrap();

        reserve::fail::after(0);
        let err = section.new_single_word("odt", 1).unwrap_err();
        assert_eq!(err.target(), AllocTarget::Entry);
        assert_eq!(section.entry_count(), 2);
        assert_eq!(names(section), vec!["clk", "zq"]);

        section.new_gpio("pwr", 1, 2, [0; 4]).unwrap();
        assert_eq!(names(section), vec!["clk", "zq", "pwr"]);
    }

    #[test]
    fn test_string_entry_slot_failure_drops_payload() {
        let mut script = Script::new();
        let section = script.new_section("s").unwrap();
        section.new_null("a").unwrap();

        // payload reservation succeeds, slot reservation fails
        reserve::fail::after(1);
        let err = section.new_string("b", b"payload").unwrap_err();
        assert_eq!(err.target(), AllocTarget::Entry);
        assert_eq!(names(section), vec!["a"]);
    }

    #[test]
    fn test_string_payload_failure_leaves_section_unchanged() {
        let mut script = Script::new();
        let section = script.new_section("s").unwrap();
        let first = section.new_string("a", b"x").unwrap();

        reserve::fail::after(0);
        let err = section.new_string("b", b"yz").unwrap_err();
        assert_eq!(err.target(), AllocTarget::StringPayload { len: 2 });
        assert_eq!(section.entry_count(), 1);
        assert_eq!(section.entries().last().map(Entry::id), Some(first));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "null entry name must not be empty")]
    fn test_leading_nul_name_rejected() {
        let mut script = Script::new();
        let section = script.new_section("s").unwrap();
        let _ = section.new_null(b"\0abc");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "gpio entry name must not be empty")]
    fn test_leading_nul_gpio_name_rejected() {
        let mut script = Script::new();
        let section = script.new_section("s").unwrap();
        let _ = section.new_gpio(b"\0led", 0, 0, [0; 4]);
    }
}
