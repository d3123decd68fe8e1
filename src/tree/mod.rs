//! Generic attributed XML tree and the crate-wide error type.
//!
//! The tree is schema-agnostic: the remapping engine imposes camt.053
//! semantics on top of it, and the `xml` boundary maps it from and to text.

mod element;
mod error;

pub use element::Element;
pub use error::ConvertError;
