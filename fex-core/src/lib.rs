//! Fex Core - board configuration script model (pure logic, no IO)
//!
//! A [`Script`] is an ordered collection of named [`Section`]s; a section is
//! an ordered collection of named, typed [`Entry`]s (null marker, 32-bit
//! word, byte string, GPIO descriptor).
//!
//! Parsers and encoders for the textual and packed formats build and walk
//! this tree through the construction and traversal methods here; they are
//! not part of this crate.
//!
//! Configuration is passed explicitly via parameters, not via global state.
//!
//! # Example
//! ```
//! use fex_core::{Script, Value};
//!
//! let mut script = Script::new();
//! let section = script.new_section("target").unwrap();
//! section.new_null("sw").unwrap();
//! section.new_gpio("led", 1, 5, [1, -1, 0, 7]).unwrap();
//!
//! for section in script.sections() {
//!     for entry in section.entries() {
//!         match entry.value() {
//!             Value::Null => println!("{}.{}", section.name(), entry.name()),
//!             Value::Gpio(gpio) => println!("{} = P{}{}", entry.name(), gpio.port, gpio.port_num),
//!             _ => {}
//!         }
//!     }
//! }
//! ```

mod arena;
pub mod document;
pub mod entry;
pub mod error;
pub mod name;
mod reserve;
pub mod section;

// Re-export common types
pub use document::{Script, Sections};
pub use entry::{ByteString, Entry, EntryId, EntryKind, Gpio, Value};
pub use error::{AllocTarget, ScriptError, ScriptResult};
pub use name::{Name, NAME_MAX};
pub use section::{Entries, Section, SectionId};

// Re-export config types from fex-config
pub use fex_config::{CapacityConfig, Layer};

/// Log targets, one per [`Layer`]
pub mod targets {
    pub const DOCUMENT: &str = "fex::document";
    pub const SECTION: &str = "fex::section";
    pub const ENTRY: &str = "fex::entry";
    pub const ARENA: &str = "fex::arena";

    /// Target constant for a layer
    pub fn for_layer(layer: super::Layer) -> &'static str {
        match layer {
            super::Layer::Document => DOCUMENT,
            super::Layer::Section => SECTION,
            super::Layer::Entry => ENTRY,
            super::Layer::Arena => ARENA,
        }
    }

}
