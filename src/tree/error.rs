use thiserror::Error;

/// Errors that can occur while upgrading a camt.053 document.
///
/// Structural absence of optional fields is never an error — defaults or
/// omission apply. Data that is present but semantically unreadable aborts
/// the whole conversion: a document with one wrong amount cannot be asserted
/// correct as a whole.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The document carries no `<Stmt>` statement container.
    #[error("document contains no <Stmt> statement block")]
    MissingStatement,

    /// The document carries no `<GrpHdr>` group header.
    ///
    /// A header without `<AddtlInf>` is fine (the fallback narrative then
    /// defaults to empty); a missing header element is not, since the target
    /// schema requires it.
    #[error("document contains no <GrpHdr> group header")]
    MissingGroupHeader,

    /// An amount node carries neither a readable value nor a currency code.
    #[error("malformed amount in {entry_ref}: {reason}")]
    MalformedAmount {
        /// The offending entry's `NtryRef`, or its position when unreadable.
        entry_ref: String,
        /// What exactly could not be read.
        reason: String,
    },

    /// A related-parties block with no usable party name and no account.
    #[error("related parties in {entry_ref} carry no usable name or account")]
    MalformedPartyBlock {
        /// The offending entry's `NtryRef`, or its position when unreadable.
        entry_ref: String,
    },

    /// XML read or write failure at the I/O boundary.
    #[error("XML error: {0}")]
    Xml(String),
}
