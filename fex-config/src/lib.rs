//! Fex Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all fex crates.

/// Initial capacity hints for the document model.
///
/// A value of `0` means "allocate lazily on first append".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityConfig {
    /// Section slots reserved when a document is created
    pub sections: usize,
    /// Entry slots reserved when a section is created
    pub entries: usize,
}

/// Layer of the document model, used for per-layer log filtering
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Document,
    Section,
    Entry,
    Arena,
}

impl Layer {
    /// All layers, top-down
    pub const ALL: [Layer; 4] = [Layer::Document, Layer::Section, Layer::Entry, Layer::Arena];

    /// Get the string name of the layer
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Document => "document",
            Layer::Section => "section",
            Layer::Entry => "entry",
            Layer::Arena => "arena",
        }
    }

    /// Get the log target name for this layer
    pub fn target(&self) -> String {
        format!("fex::{}", self.as_str())
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            sections: 0,
            entries: 0,
        }
    }
}
