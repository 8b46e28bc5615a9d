//! Fixed-capacity names for sections and entries

use std::fmt;

/// Maximum number of meaningful bytes in a name.
pub const NAME_MAX: usize = 31;

/// A section or entry name.
///
/// Stored inline in a `NAME_MAX + 1` byte buffer that always keeps a trailing
/// NUL, so the raw bytes can be handed to C-style consumers as they are.
/// Input longer than [`NAME_MAX`] bytes is silently truncated; input
/// containing a NUL byte ends at that byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name {
    buf: [u8; NAME_MAX + 1],
    len: u8,
}

impl Name {
    /// Build a name from raw bytes, truncating as described above.
    pub fn new(name: impl AsRef<[u8]>) -> Self {
        let name = name.as_ref();
        let end = name.iter().position(|&b| b == 0).unwrap_or(name.len());
        let len = end.min(NAME_MAX);

        let mut buf = [0u8; NAME_MAX + 1];
        buf[..len].copy_from_slice(&name[..len]);
        Self {
            buf,
            len: len as u8,
        }
    }

    /// Meaningful bytes, without the terminator
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Meaningful bytes followed by the NUL terminator
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len as usize]
    }

    /// The name as UTF-8, if it is valid UTF-8.
    ///
    /// Truncation works on bytes and may split a multi-byte character.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<[u8]> for Name {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_kept() {
        let name = Name::new("target");
        assert_eq!(name, "target");
        assert_eq!(name.len(), 6);
        assert_eq!(name.as_bytes_with_nul(), b"target\0");
    }

    #[test]
    fn test_long_name_truncated() {
        let input = "abcdefghijklmnopqrstuvwxyz0123456789ABCD";
        assert_eq!(input.len(), 40);
        let name = Name::new(input);
        assert_eq!(name.len(), NAME_MAX);
        assert_eq!(name.as_bytes(), &input.as_bytes()[..31]);
        assert_eq!(name.as_bytes_with_nul().last(), Some(&0));
    }

    #[test]
    fn test_exactly_max_not_truncated() {
        let input = "x".repeat(NAME_MAX);
        let name = Name::new(&input);
        assert_eq!(name.as_str(), Some(input.as_str()));
    }

    #[test]
    fn test_embedded_nul_ends_name() {
        let name = Name::new(b"led\0tail");
        assert_eq!(name, "led");
    }

    #[test]
    fn test_empty_name() {
        let name = Name::new("");
        assert!(name.is_empty());
        assert_eq!(name.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn test_split_utf8_is_lossy_not_panicking() {
        // 30 ASCII bytes followed by a 3-byte character: truncation splits it
        let input = format!("{}€", "a".repeat(30));
        let name = Name::new(&input);
        assert_eq!(name.len(), NAME_MAX);
        assert!(name.as_str().is_none());
        assert!(name.to_string().starts_with(&"a".repeat(30)));
    }
}
