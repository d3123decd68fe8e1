//! XML boundary: parse camt documents into the generic tree and serialize
//! upgraded trees back to text.
//!
//! The engine requires a fully-materialized tree with random access to
//! sibling and parent relationships, so the boundary always consumes a
//! complete string, never a stream.

mod reader;
mod writer;

pub use reader::parse;
pub use writer::serialize;

use crate::tree::ConvertError;

/// Parse, upgrade, serialize — the whole pipeline over XML text.
pub fn convert_xml(input: &str) -> Result<String, ConvertError> {
    let document = parse(input)?;
    let upgraded = crate::convert::upgrade(document)?;
    serialize(&upgraded)
}
