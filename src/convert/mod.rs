//! The camt.053 001.04 → 001.08 remapping engine.
//!
//! A pure, synchronous transformation: one fully-parsed source tree in, one
//! fully-shaped target tree out. The engine holds no state across calls and
//! never returns a partially-converted document.
//!
//! # Example
//!
//! ```no_run
//! use camt_upgrade::{Element, convert};
//!
//! let document: Element = todo!(); // parsed 001.04 tree, e.g. via camt_upgrade::xml::parse
//! let upgraded = convert::upgrade(document).unwrap();
//! assert_eq!(upgraded.attr("xmlns"), Some(convert::ns::CAMT_053_001_08));
//! ```

mod amount;
mod document;
mod entry;
mod ordering;
mod party;
mod remittance;

pub use document::upgrade;

/// camt.053 namespace URIs.
pub mod ns {
    /// Source schema revision.
    pub const CAMT_053_001_04: &str = "urn:iso:std:iso:20022:tech:xsd:camt.053.001.04";
    /// Target schema revision.
    pub const CAMT_053_001_08: &str = "urn:iso:std:iso:20022:tech:xsd:camt.053.001.08";
    /// XML Schema instance namespace.
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
}
