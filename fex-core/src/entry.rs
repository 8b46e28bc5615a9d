//! Entries: named leaf values of a section
//!
//! An entry is one of four kinds. The kind is carried by the [`Value`]
//! variant itself, so dispatch is an exhaustive `match` and no entry can hold
//! an unknown kind.

use std::fmt;

use tracing::trace;

use crate::arena::Key;
use crate::error::{AllocTarget, ScriptError, ScriptResult};
use crate::name::Name;
use crate::reserve;
use crate::targets;

/// Handle to an entry, valid for the section that issued it until the entry
/// is destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) Key);

/// Entry kind tag.
///
/// Discriminants are the type codes of the packed board-script format, so
/// encoders can write `kind as u8` and decoders can use [`EntryKind::from_u8`].
/// Code 3 (multi-word) is reserved by the format and has no entry kind here.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    SingleWord = 1,
    String = 2,
    Gpio = 4,
    Null = 5,
}

impl EntryKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(EntryKind::SingleWord),
            2 => Some(EntryKind::String),
            4 => Some(EntryKind::Gpio),
            5 => Some(EntryKind::Null),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::SingleWord => "single_word",
            EntryKind::String => "string",
            EntryKind::Gpio => "gpio",
            EntryKind::Null => "null",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GPIO pin descriptor.
///
/// The four data slots are position-significant and stored verbatim; their
/// meaning belongs to the target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gpio {
    /// Bank / group index
    pub port: u32,
    /// Pin index within the bank
    pub port_num: u32,
    pub data: [i32; 4],
}

impl Gpio {
    pub const PULL: usize = 0;
    pub const DRIVE: usize = 1;
    pub const FUNCTION: usize = 2;
    pub const DATA: usize = 3;

    pub fn new(port: u32, port_num: u32, data: [i32; 4]) -> Self {
        Self {
            port,
            port_num,
            data,
        }
    }

    pub fn pull(&self) -> i32 {
        self.data[Self::PULL]
    }

    pub fn drive(&self) -> i32 {
        self.data[Self::DRIVE]
    }

    pub fn function(&self) -> i32 {
        self.data[Self::FUNCTION]
    }

    pub fn value(&self) -> i32 {
        self.data[Self::DATA]
    }
}

/// Byte string payload.
///
/// Holds exactly the bytes it was built from plus one trailing NUL, so
/// [`as_bytes_with_nul`](Self::as_bytes_with_nul) is always safe to display.
/// Embedded NULs are kept; the length is authoritative.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ByteString {
    buf: Vec<u8>,
}

impl ByteString {
    pub(crate) fn try_from_bytes(bytes: &[u8]) -> ScriptResult<Self> {
        let mut buf = Vec::new();
        reserve::reserve_exact(&mut buf, bytes.len() + 1)
            .map_err(ScriptError::alloc(AllocTarget::StringPayload { len: bytes.len() }))?;
        buf.extend_from_slice(bytes);
        buf.push(0);
        Ok(Self { buf })
    }

    /// Payload length, excluding the terminator
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len()]
    }

    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

/// Entry payload, one variant per entry kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Marker entry with no payload
    Null,
    SingleWord(u32),
    String(ByteString),
    Gpio(Gpio),
}

impl Value {
    pub fn kind(&self) -> EntryKind {
        match self {
            Value::Null => EntryKind::Null,
            Value::SingleWord(_) => EntryKind::SingleWord,
            Value::String(_) => EntryKind::String,
            Value::Gpio(_) => EntryKind::Gpio,
        }
    }

    /// Heap bytes owned by the payload
    fn payload_bytes(&self) -> usize {
        match self {
            Value::Null | Value::SingleWord(_) | Value::Gpio(_) => 0,
            Value::String(s) => s.as_bytes_with_nul().len(),
        }
    }
}

/// A named leaf value.
#[derive(Debug, Clone)]
pub struct Entry {
    id: EntryId,
    name: Name,
    value: Value,
}

impl Entry {
    pub(crate) fn new(id: EntryId, name: Name, value: Value) -> Self {
        Self { id, name, value }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.value.kind()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }

    pub fn as_word(&self) -> Option<u32> {
        match self.value {
            Value::SingleWord(word) => Some(word),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&ByteString> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.as_string().map(ByteString::as_bytes)
    }

    pub fn as_gpio(&self) -> Option<&Gpio> {
        match &self.value {
            Value::Gpio(gpio) => Some(gpio),
            _ => None,
        }
    }

    /// Consume a detached entry, releasing its payload.
    pub(crate) fn release(self) {
        trace!(
            target: targets::ENTRY,
            name = %self.name,
            kind = %self.kind(),
            payload_bytes = self.value.payload_bytes(),
            "destroy entry"
        );
        drop(self);
    }
}
