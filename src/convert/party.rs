//! Related-parties restructuring.
//!
//! In this statement profile the account owner's side is always reported as
//! creditor, so any debtor-shaped source data is relabeled into the creditor
//! shape. Every output value traces to a source value or is absent — no
//! placeholder names or IBANs are ever invented.

use super::ordering;
use crate::tree::{ConvertError, Element};

/// Map a 001.04 related-parties block onto the 001.08 creditor shape.
///
/// Returns `Ok(None)` when the source has no block. A block that is present
/// but carries neither a usable party name nor an account identification is
/// a hard error — fabricating identifying data would be worse than failing.
pub(crate) fn restructure(
    block: Option<Element>,
    entry_ref: &str,
) -> Result<Option<Element>, ConvertError> {
    let Some(mut src) = block else {
        return Ok(None);
    };

    // Debtor account becomes the creditor account, values untouched. An
    // explicit creditor account wins; the debtor shape never survives.
    let debtor_accounts = src.take_children("DbtrAcct");
    if !src.has_child("CdtrAcct") {
        if let Some(mut account) = debtor_accounts.into_iter().next() {
            account.set_tag("CdtrAcct");
            src.push_child(account);
        }
    }

    // Same rule for the party itself: explicit creditor data always wins
    // over a relabeled debtor.
    let debtors = src.take_children("Dbtr");
    if !src.has_child("Cdtr") {
        if let Some(mut party) = debtors.into_iter().next() {
            party.set_tag("Cdtr");
            src.push_child(party);
        }
    }

    if let Some(creditor) = src.first_child_mut("Cdtr") {
        wrap_in_pty(creditor);
        if let Some(address) = creditor
            .first_child_mut("Pty")
            .and_then(|pty| pty.first_child_mut("PstlAdr"))
        {
            normalize_postal_address(address);
        }
    }

    if !has_usable_content(&src) {
        return Err(ConvertError::MalformedPartyBlock {
            entry_ref: entry_ref.to_string(),
        });
    }

    Ok(Some(ordering::reorder(
        src,
        ordering::RLTD_PTIES_ORDER,
        &[],
    )))
}

/// 001.08 wraps the creditor party in a `Pty` container; 001.04 carried
/// `Nm`/`PstlAdr` directly on `Cdtr`.
fn wrap_in_pty(creditor: &mut Element) {
    if creditor.has_child("Pty") {
        return;
    }
    let mut pty = Element::new("Pty");
    for name in creditor.take_children("Nm") {
        pty.push_child(name);
    }
    for address in creditor.take_children("PstlAdr") {
        pty.push_child(address);
    }
    if !pty.is_empty() {
        creditor.push_child(pty);
    }
}

/// Promote the first address line to `StrtNm` when no street name exists.
///
/// Address lines beyond the first are dropped — a one-way step, lossy by
/// documented limitation.
fn normalize_postal_address(address: &mut Element) {
    if address.has_child("StrtNm") || !address.has_child("AdrLine") {
        return;
    }
    let mut lines = address.take_children("AdrLine");
    let mut street = lines.remove(0);
    street.set_tag("StrtNm");
    address.push_child(street);
}

fn has_usable_content(block: &Element) -> bool {
    let name = block
        .descendant(&["Cdtr", "Pty", "Nm"])
        .and_then(Element::text)
        .is_some_and(|t| !t.trim().is_empty());
    let account = block
        .first_child("CdtrAcct")
        .is_some_and(|acct| !acct.is_empty());
    name || account
}
