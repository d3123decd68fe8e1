//! # camt-upgrade
//!
//! Converts ISO 20022 camt.053 bank-to-customer account statements from
//! schema revision 001.04 to 001.08.
//!
//! The two revisions share most of their vocabulary but differ in element
//! ordering, the representation of monetary amounts, the shape of the
//! related-parties block, the defaulting of several required blocks, and the
//! namespace on the document root. The [`convert`] module is the pure
//! remapping engine over the generic [`Element`] tree; the [`xml`] module is
//! the quick-xml boundary that parses input text into that tree and writes
//! the upgraded tree back out.
//!
//! ## Quick Start
//!
//! ```rust
//! let input = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.053.001.04">
//!   <BkToCstmrStmt>
//!     <GrpHdr>
//!       <MsgId>MSG-001</MsgId>
//!       <AddtlInf>SPS/1.7.1/PROD</AddtlInf>
//!     </GrpHdr>
//!     <Stmt>
//!       <Id>STMT-001</Id>
//!       <Ntry>
//!         <Amt>9.00<Ccy>CHF</Ccy></Amt>
//!         <CdtDbtInd>CRDT</CdtDbtInd>
//!       </Ntry>
//!     </Stmt>
//!   </BkToCstmrStmt>
//! </Document>"#;
//!
//! let output = camt_upgrade::convert_xml(input).unwrap();
//! assert!(output.contains("urn:iso:std:iso:20022:tech:xsd:camt.053.001.08"));
//! assert!(output.contains(r#"<Amt Ccy="CHF">9.00</Amt>"#));
//! assert!(output.contains("<AddtlNtryInf>SPS/1.7.1/PROD</AddtlNtryInf>"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Generic tree model and the 001.04 → 001.08 remapping engine |
//! | `xml` (default) | quick-xml reader/writer boundary and the CLI binary |
//!
//! A failed conversion never yields a partial document: a malformed amount or
//! an unreadable party block aborts the whole run with the offending entry's
//! reference attached.

#[cfg(feature = "core")]
pub mod convert;

#[cfg(feature = "core")]
pub mod tree;

#[cfg(feature = "xml")]
pub mod xml;

// Re-export the engine surface at the crate root for convenience
#[cfg(feature = "core")]
pub use crate::convert::{ns, upgrade};
#[cfg(feature = "core")]
pub use crate::tree::{ConvertError, Element};
#[cfg(feature = "xml")]
pub use crate::xml::convert_xml;
