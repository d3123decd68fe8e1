//! Static field-order tables for the four containers the target schema
//! fixes, plus the reorder pass that applies them.
//!
//! The tables are the single source of truth for target shape — nothing else
//! in the engine encodes element order.

use crate::tree::Element;

/// `Stmt` — singular fields, in target order.
pub(crate) const STMT_ORDER: &[&str] =
    &["Id", "ElctrncSeqNb", "CreDtTm", "FrToDt", "CpyDplctInd", "Acct"];

/// `Stmt` — repeatable tail.
pub(crate) const STMT_REPEATABLE: &[&str] = &["Bal", "Ntry"];

/// `Ntry` — target order.
pub(crate) const NTRY_ORDER: &[&str] = &[
    "NtryRef",
    "Amt",
    "CdtDbtInd",
    "RvslInd",
    "Sts",
    "BookgDt",
    "ValDt",
    "AcctSvcrRef",
    "BkTxCd",
    "NtryDtls",
    "AddtlNtryInf",
];

/// `TxDtls` — target order.
pub(crate) const TX_DTLS_ORDER: &[&str] = &[
    "Refs", "Amt", "CdtDbtInd", "AmtDtls", "BkTxCd", "RltdPties", "RltdAgts", "RmtInf",
];

/// `RltdPties` — target order.
pub(crate) const RLTD_PTIES_ORDER: &[&str] = &["Cdtr", "CdtrAcct"];

/// Reassemble a container in target order.
///
/// Declared singular fields come first (absence is not an error), then the
/// repeatable slots in their declared sequence, then every remaining slot in
/// the order it appeared in the source. Unanticipated fields are passed
/// through, never dropped.
pub(crate) fn reorder(mut src: Element, ordered: &[&str], repeatable: &[&str]) -> Element {
    let mut out = src.shallow_clone();
    for &tag in ordered.iter().chain(repeatable.iter()) {
        for child in src.take_children(tag) {
            out.push_child(child);
        }
    }
    for (_, slot) in src.drain_children() {
        for child in slot {
            out.push_child(child);
        }
    }
    out
}
