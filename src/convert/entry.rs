//! Per-entry orchestration: amounts, parties, remittance, defaults, order.
//!
//! Entries are rebuilt in source order — only the order *within* an entry's
//! fields changes. Any unreadable amount aborts the whole conversion with
//! the offending entry's reference attached.

use super::{amount, ordering, party, remittance};
use crate::tree::{ConvertError, Element};

/// Rebuild one statement entry into target shape.
pub(crate) fn rebuild(
    mut entry: Element,
    index: usize,
    fallback: &str,
) -> Result<Element, ConvertError> {
    let entry_ref = entry_reference(&entry, index);

    // Booked amount on the entry itself.
    if let Some(amt) = entry.first_child_mut("Amt") {
        amount::canonicalize(amt).map_err(|e| malformed_amount(&entry_ref, e))?;
    }

    // Some 001.04 producers hang the related-parties block off the entry
    // instead of the transaction detail. Detach it here; a transaction
    // without its own block adopts it below.
    let entry_parties = entry.take_children("RltdPties").into_iter().next();
    let mut entry_parties_used = false;

    let mut details_list = entry.take_children("NtryDtls");
    for details in &mut details_list {
        for tx in details.take_children("TxDtls") {
            let rebuilt = rebuild_transaction(
                tx,
                entry_parties.as_ref(),
                &mut entry_parties_used,
                &entry_ref,
                fallback,
            )?;
            details.push_child(rebuilt);
        }
    }
    for details in details_list {
        entry.push_child(details);
    }

    // An entry-level block no transaction adopted stays as pass-through.
    if let Some(parties) = entry_parties {
        if !entry_parties_used {
            entry.push_child(parties);
        }
    }

    // The entry narrative is never left empty.
    let has_narrative = entry
        .first_child("AddtlNtryInf")
        .and_then(Element::text)
        .is_some_and(|t| !t.trim().is_empty());
    if !has_narrative {
        entry.take_children("AddtlNtryInf");
        entry.push_child(Element::with_text("AddtlNtryInf", fallback));
    }

    Ok(ordering::reorder(entry, ordering::NTRY_ORDER, &[]))
}

fn rebuild_transaction(
    mut tx: Element,
    entry_parties: Option<&Element>,
    entry_parties_used: &mut bool,
    entry_ref: &str,
    fallback: &str,
) -> Result<Element, ConvertError> {
    // Booked amount, kept for the breakdown synthesis below.
    let mut booked = None;
    if let Some(amt) = tx.first_child_mut("Amt") {
        booked = Some(amount::canonicalize(amt).map_err(|e| malformed_amount(entry_ref, e))?);
    }

    // The instructed-amount breakdown is required whenever an amount is
    // present; an existing one may still carry legacy amount shapes.
    if let Some(details) = tx.first_child_mut("AmtDtls") {
        amount::canonicalize_tree(details).map_err(|e| malformed_amount(entry_ref, e))?;
    } else if let Some(booked) = &booked {
        tx.push_child(amount::instructed_amount_details(booked));
    }

    // The transaction's own related-parties block wins over the entry's.
    let parties_source = match tx.take_children("RltdPties").into_iter().next() {
        Some(own) => Some(own),
        None => entry_parties.map(|block| {
            *entry_parties_used = true;
            block.clone()
        }),
    };
    if let Some(parties) = party::restructure(parties_source, entry_ref)? {
        tx.push_child(parties);
    }

    // The target requires the element to exist even when empty. Existing
    // agent data passes through untouched.
    if !tx.has_child("RltdAgts") {
        tx.push_child(Element::new("RltdAgts"));
    }

    let merged = remittance::merge(tx.first_child("RmtInf"), fallback);
    tx.take_children("RmtInf");
    tx.push_child(remittance::to_element(&merged));

    Ok(ordering::reorder(tx, ordering::TX_DTLS_ORDER, &[]))
}

/// Human-readable handle for error messages: the entry's `NtryRef`, or its
/// 1-based position when the reference is missing or blank.
fn entry_reference(entry: &Element, index: usize) -> String {
    match entry.first_child("NtryRef").and_then(Element::text) {
        Some(r) if !r.trim().is_empty() => format!("entry '{}'", r.trim()),
        _ => format!("entry #{}", index + 1),
    }
}

fn malformed_amount(entry_ref: &str, err: amount::AmountError) -> ConvertError {
    ConvertError::MalformedAmount {
        entry_ref: entry_ref.to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_amount(value: &str, currency: &str) -> Element {
        let mut amt = Element::with_text("Amt", value);
        amt.push_child(Element::with_text("Ccy", currency));
        amt
    }

    fn entry_with_tx(tx: Element) -> Element {
        let mut details = Element::new("NtryDtls");
        details.push_child(tx);
        let mut entry = Element::new("Ntry");
        entry.push_child(Element::with_text("NtryRef", "R-1"));
        entry.push_child(legacy_amount("9.00", "CHF"));
        entry.push_child(details);
        entry
    }

    #[test]
    fn breakdown_is_synthesized_from_the_booked_amount() {
        let mut tx = Element::new("TxDtls");
        tx.push_child(legacy_amount("9.00", "CHF"));

        let out = rebuild(entry_with_tx(tx), 0, "").unwrap();
        let instd = out
            .descendant(&["NtryDtls", "TxDtls", "AmtDtls", "InstdAmt"])
            .unwrap();
        assert_eq!(instd.attr("Ccy"), Some("CHF"));
        assert_eq!(instd.text(), Some("9.00"));
    }

    #[test]
    fn existing_breakdown_is_kept_not_replaced() {
        let mut instd = Element::with_text("InstdAmt", "10.00");
        instd.set_attr("Ccy", "EUR");
        let mut breakdown = Element::new("AmtDtls");
        breakdown.push_child(instd);
        let mut tx = Element::new("TxDtls");
        tx.push_child(legacy_amount("9.00", "CHF"));
        tx.push_child(breakdown);

        let out = rebuild(entry_with_tx(tx), 0, "").unwrap();
        let instd = out
            .descendant(&["NtryDtls", "TxDtls", "AmtDtls", "InstdAmt"])
            .unwrap();
        assert_eq!(instd.attr("Ccy"), Some("EUR"));
        assert_eq!(instd.text(), Some("10.00"));
    }

    #[test]
    fn transaction_without_amount_gets_no_breakdown() {
        let out = rebuild(entry_with_tx(Element::new("TxDtls")), 0, "").unwrap();
        let tx = out.descendant(&["NtryDtls", "TxDtls"]).unwrap();
        assert!(!tx.has_child("AmtDtls"));
    }

    #[test]
    fn related_agents_is_synthesized_empty() {
        let out = rebuild(entry_with_tx(Element::new("TxDtls")), 0, "").unwrap();
        let agents = out.descendant(&["NtryDtls", "TxDtls", "RltdAgts"]).unwrap();
        assert!(agents.is_empty());
    }

    #[test]
    fn existing_related_agents_content_passes_through() {
        let mut agents = Element::new("RltdAgts");
        let mut agent = Element::new("DbtrAgt");
        agent.push_child(Element::with_text("BICFI", "POFICHBEXXX"));
        agents.push_child(agent);
        let mut tx = Element::new("TxDtls");
        tx.push_child(agents);

        let out = rebuild(entry_with_tx(tx), 0, "").unwrap();
        assert_eq!(
            out.descendant(&["NtryDtls", "TxDtls", "RltdAgts", "DbtrAgt", "BICFI"])
                .and_then(Element::text),
            Some("POFICHBEXXX")
        );
    }

    #[test]
    fn entry_level_parties_are_adopted_by_the_transaction() {
        let mut dbtr = Element::new("Dbtr");
        dbtr.push_child(Element::with_text("Nm", "ACME"));
        let mut parties = Element::new("RltdPties");
        parties.push_child(dbtr);

        let mut entry = entry_with_tx(Element::new("TxDtls"));
        entry.push_child(parties);

        let out = rebuild(entry, 0, "").unwrap();
        assert!(!out.has_child("RltdPties"));
        assert_eq!(
            out.descendant(&["NtryDtls", "TxDtls", "RltdPties", "Cdtr", "Pty", "Nm"])
                .and_then(Element::text),
            Some("ACME")
        );
    }

    #[test]
    fn transaction_level_parties_win_over_entry_level() {
        let mut entry_dbtr = Element::new("Dbtr");
        entry_dbtr.push_child(Element::with_text("Nm", "ENTRY LEVEL"));
        let mut entry_parties = Element::new("RltdPties");
        entry_parties.push_child(entry_dbtr);

        let mut tx_dbtr = Element::new("Dbtr");
        tx_dbtr.push_child(Element::with_text("Nm", "TX LEVEL"));
        let mut tx_parties = Element::new("RltdPties");
        tx_parties.push_child(tx_dbtr);
        let mut tx = Element::new("TxDtls");
        tx.push_child(tx_parties);

        let mut entry = entry_with_tx(tx);
        entry.push_child(entry_parties);

        let out = rebuild(entry, 0, "").unwrap();
        assert_eq!(
            out.descendant(&["NtryDtls", "TxDtls", "RltdPties", "Cdtr", "Pty", "Nm"])
                .and_then(Element::text),
            Some("TX LEVEL")
        );
        // the unused entry-level block stays as pass-through
        assert!(out.has_child("RltdPties"));
    }

    #[test]
    fn narrative_falls_back_to_the_document_text() {
        let entry = entry_with_tx(Element::new("TxDtls"));
        let out = rebuild(entry, 0, "SPS/1.7.1/PROD").unwrap();
        assert_eq!(
            out.first_child("AddtlNtryInf").and_then(Element::text),
            Some("SPS/1.7.1/PROD")
        );
    }

    #[test]
    fn existing_narrative_is_kept() {
        let mut entry = entry_with_tx(Element::new("TxDtls"));
        entry.push_child(Element::with_text("AddtlNtryInf", "original text"));
        let out = rebuild(entry, 0, "FALLBACK").unwrap();
        assert_eq!(
            out.first_child("AddtlNtryInf").and_then(Element::text),
            Some("original text")
        );
    }

    #[test]
    fn malformed_amount_names_the_entry_reference() {
        let mut entry = Element::new("Ntry");
        entry.push_child(Element::with_text("NtryRef", "R-7"));
        entry.push_child(Element::with_text("Amt", "9.00")); // no currency anywhere

        let err = rebuild(entry, 3, "").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MalformedAmount { ref entry_ref, .. } if entry_ref == "entry 'R-7'"
        ));
    }

    #[test]
    fn malformed_amount_falls_back_to_the_position() {
        let mut entry = Element::new("Ntry");
        entry.push_child(Element::with_text("Amt", "9.00"));

        let err = rebuild(entry, 3, "").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MalformedAmount { ref entry_ref, .. } if entry_ref == "entry #4"
        ));
    }

    #[test]
    fn entry_fields_come_out_in_target_order() {
        let mut entry = Element::new("Ntry");
        entry.push_child(Element::with_text("Sts", "BOOK"));
        entry.push_child(Element::with_text("CdtDbtInd", "CRDT"));
        entry.push_child(legacy_amount("9.00", "CHF"));
        entry.push_child(Element::with_text("NtryRef", "R-1"));

        let out = rebuild(entry, 0, "X").unwrap();
        let tags: Vec<&str> = out.children().map(Element::tag).collect();
        assert_eq!(
            tags,
            vec!["NtryRef", "Amt", "CdtDbtInd", "Sts", "AddtlNtryInf"]
        );
    }
}
