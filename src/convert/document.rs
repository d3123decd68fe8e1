//! Document assembly: namespace rewrite, group-header pass-through, and the
//! per-statement rebuild loop.

use super::{entry, ns, ordering};
use crate::tree::{ConvertError, Element};

/// Upgrade a parsed camt.053.001.04 document tree to 001.08.
///
/// The group header subtree is copied unmodified; its `AddtlInf` text serves
/// as the fallback narrative wherever an entry or transaction carries none.
/// On any error the whole conversion is aborted — partial documents are
/// never returned.
pub fn upgrade(mut document: Element) -> Result<Element, ConvertError> {
    let bodies = document.take_children("BkToCstmrStmt");
    if bodies.is_empty() {
        return Err(ConvertError::MissingStatement);
    }
    for mut body in bodies {
        if !body.has_child("GrpHdr") {
            return Err(ConvertError::MissingGroupHeader);
        }
        // Advisory narrative; a header without AddtlInf yields an empty one.
        let fallback = body
            .descendant(&["GrpHdr", "AddtlInf"])
            .and_then(Element::text)
            .unwrap_or_default()
            .trim()
            .to_string();

        let statements = body.take_children("Stmt");
        if statements.is_empty() {
            return Err(ConvertError::MissingStatement);
        }
        for statement in statements {
            body.push_child(rebuild_statement(statement, &fallback)?);
        }
        document.push_child(body);
    }

    // Root declarations in fixed order: default namespace, xsi, schema hint.
    document.remove_attr("xmlns");
    document.remove_attr("xmlns:xsi");
    document.remove_attr("xsi:schemaLocation");
    document.set_attr("xmlns", ns::CAMT_053_001_08);
    document.set_attr("xmlns:xsi", ns::XSI);
    document.set_attr(
        "xsi:schemaLocation",
        format!("{} camt.053.001.08.xsd", ns::CAMT_053_001_08),
    );
    Ok(document)
}

/// Balances pass through untransformed; entries are rebuilt in source order.
fn rebuild_statement(mut statement: Element, fallback: &str) -> Result<Element, ConvertError> {
    let entries = statement.take_children("Ntry");
    for (index, ntry) in entries.into_iter().enumerate() {
        statement.push_child(entry::rebuild(ntry, index, fallback)?);
    }
    Ok(ordering::reorder(
        statement,
        ordering::STMT_ORDER,
        ordering::STMT_REPEATABLE,
    ))
}
