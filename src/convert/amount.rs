//! Monetary amount canonicalization.
//!
//! The target schema carries every amount as a decimal text value plus a
//! `Ccy` attribute. 001.04 producers also emit a legacy nested form where a
//! `<Ccy>` child holds the code and the element text holds the figure,
//! sometimes with the code still embedded in the text.
//!
//! A wrong or missing currency is a financial-correctness issue, so an
//! unreadable amount is always surfaced, never defaulted.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::tree::Element;

/// Tags that may carry an amount directly. Containers of the same name that
/// wrap a nested `Amt` are recursed into instead.
const AMOUNT_TAGS: &[&str] = &[
    "Amt",
    "InstdAmt",
    "TxAmt",
    "CntrValAmt",
    "AnncdPstngAmt",
    "PrtryAmt",
];

/// A canonicalized amount: verbatim decimal text plus ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CurrencyAmount {
    pub value: String,
    pub currency: String,
}

/// Why an amount node could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AmountError {
    MissingCurrency,
    MissingValue,
    Unparseable(String),
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::MissingCurrency => write!(f, "no currency code on the amount"),
            AmountError::MissingValue => write!(f, "no amount value"),
            AmountError::Unparseable(v) => write!(f, "amount value '{v}' is not a decimal"),
        }
    }
}

/// Extract the canonical (value, currency) pair from either amount form.
///
/// The source digits are kept verbatim — validation parses them as
/// [`Decimal`], but the output text is never reformatted.
pub(crate) fn normalize(node: &Element) -> Result<CurrencyAmount, AmountError> {
    // Already-canonical form: text content plus Ccy attribute.
    if let Some(currency) = node.attr("Ccy") {
        let value = node
            .text()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AmountError::MissingValue)?;
        check_value(value)?;
        return Ok(CurrencyAmount {
            value: value.to_string(),
            currency: currency.to_string(),
        });
    }

    // Legacy nested form: <Ccy> child, figure in the node's own text.
    let currency = node
        .first_child("Ccy")
        .and_then(Element::text)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(AmountError::MissingCurrency)?
        .to_string();
    let raw = node.text().unwrap_or_default();
    // Some producers leave the currency code embedded in the text.
    let stripped = raw.replace(&currency, " ");
    let value = stripped.trim();
    if value.is_empty() {
        return Err(AmountError::MissingValue);
    }
    check_value(value)?;
    Ok(CurrencyAmount {
        value: value.to_string(),
        currency,
    })
}

fn check_value(value: &str) -> Result<(), AmountError> {
    Decimal::from_str(value)
        .map(|_| ())
        .map_err(|_| AmountError::Unparseable(value.to_string()))
}

/// Normalize an amount node in place.
///
/// An already-canonical node is left untouched; a legacy node is replaced by
/// its canonical rendering. Returns the extracted pair either way.
pub(crate) fn canonicalize(node: &mut Element) -> Result<CurrencyAmount, AmountError> {
    let amount = normalize(node)?;
    if node.attr("Ccy").is_none() {
        let tag = node.tag().to_string();
        *node = canonical_element(&tag, &amount);
    }
    Ok(amount)
}

/// Canonicalize every amount-shaped node in a subtree.
///
/// Used on an existing `AmtDtls` breakdown, whose amount fields may still be
/// in the legacy shape.
pub(crate) fn canonicalize_tree(node: &mut Element) -> Result<(), AmountError> {
    if AMOUNT_TAGS.contains(&node.tag()) && is_amount_shaped(node) {
        canonicalize(node)?;
        return Ok(());
    }
    for child in node.children_mut() {
        canonicalize_tree(child)?;
    }
    Ok(())
}

fn is_amount_shaped(node: &Element) -> bool {
    node.attr("Ccy").is_some()
        || node.has_child("Ccy")
        || (node.text().is_some() && node.children().next().is_none())
}

/// Build a canonical amount element: decimal text plus `Ccy` attribute.
pub(crate) fn canonical_element(tag: &str, amount: &CurrencyAmount) -> Element {
    let mut element = Element::with_text(tag, &amount.value);
    element.set_attr("Ccy", &amount.currency);
    element
}

/// Synthesize the instructed-amount breakdown the target schema requires
/// when the source has none, from the transaction's own booked amount.
pub(crate) fn instructed_amount_details(amount: &CurrencyAmount) -> Element {
    let mut details = Element::new("AmtDtls");
    details.push_child(canonical_element("InstdAmt", amount));
    details
}
