// src/extract/fields.rs
// =============================================================================
// Per-field parsing rules for product fragments.
//
// Each rule is strict: if the text doesn't look the way we expect, we return
// an ExtractError instead of guessing a default. A product is either fully
// populated or not produced at all.
//
// Rules:
// - price:          "$1139.54" -> 1139.54 (one leading currency symbol stripped)
// - num_of_reviews: "12 reviews" -> 12 (first whitespace-delimited token)
// - rating:         number of star markers inside the ratings block
// =============================================================================

use scraper::ElementRef;
use thiserror::Error;

/// Currency symbols we accept in front of a price.
const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// The ratings block never shows more than five stars.
pub const MAX_RATING: u8 = 5;

/// Errors that abort extraction of a product fragment.
///
/// `field` is the Product field name so the message points straight at the
/// column that could not be filled.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractError {
    /// The element (or attribute) holding this field is not in the fragment
    #[error("missing field `{field}`")]
    MissingField { field: &'static str },

    /// The element exists but its text could not be turned into a value
    #[error("cannot parse `{field}` from {raw:?}: {reason}")]
    Format {
        field: &'static str,
        raw: String,
        reason: String,
    },
}

impl ExtractError {
    pub(crate) fn missing(field: &'static str) -> Self {
        ExtractError::MissingField { field }
    }

    fn format(field: &'static str, raw: &str, reason: impl ToString) -> Self {
        ExtractError::Format {
            field,
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

// Parses a price such as "$24.99"
//
// Steps:
// 1. Trim surrounding whitespace
// 2. Strip ONE leading currency symbol (if present)
// 3. Parse the rest as f64
//
// Negative (including "-0"), infinite and NaN values are rejected: a listed
// price is never below zero.
pub fn parse_price(raw: &str) -> Result<f64, ExtractError> {
    let text = raw.trim();
    let number = text
        .strip_prefix(|c: char| CURRENCY_SYMBOLS.contains(&c))
        .unwrap_or(text)
        .trim_start();

    let value: f64 = number
        .parse()
        .map_err(|e| ExtractError::format("price", raw, e))?;

    if !value.is_finite() {
        return Err(ExtractError::format("price", raw, "not a finite number"));
    }
    if value.is_sign_negative() {
        return Err(ExtractError::format("price", raw, "negative price"));
    }

    Ok(value)
}

// Parses the review counter, e.g. "12 reviews" -> 12
//
// Only the first whitespace-delimited token is looked at, so the wording
// after the number ("reviews", "review", a translation...) doesn't matter.
pub fn parse_review_count(raw: &str) -> Result<u32, ExtractError> {
    let token = raw
        .split_whitespace()
        .next()
        .ok_or_else(|| ExtractError::format("num_of_reviews", raw, "empty text"))?;

    token
        .parse()
        .map_err(|e| ExtractError::format("num_of_reviews", raw, e))
}

// Counts the star markers inside a ratings container
//
// Markup on the live site looks like:
//   <div class="ratings">
//     <p class="review-count float-end">12 reviews</p>
//     <p data-rating="3"><span class="ws-icon ws-icon-star"></span>x3</p>
//   </div>
//
// We walk the direct children of the container and skip the review counter.
// A child that is itself a <span> is one star; any other child contributes
// its own <span> children. This keeps the count structural, so it doesn't
// depend on the icon classes used for the stars.
pub fn count_rating(ratings: ElementRef<'_>) -> Result<u8, ExtractError> {
    let mut stars = 0usize;

    for child in ratings.children().filter_map(ElementRef::wrap) {
        if has_class(child, "review-count") {
            continue;
        }

        if child.value().name() == "span" {
            stars += 1;
        } else {
            stars += child
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|grandchild| grandchild.value().name() == "span")
                .count();
        }
    }

    if stars > MAX_RATING as usize {
        return Err(ExtractError::format(
            "rating",
            &stars.to_string(),
            format!("more than {} stars", MAX_RATING),
        ));
    }

    Ok(stars as u8)
}

fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why thiserror here when the rest of the app uses anyhow?
//    - Callers (and tests) can match on MissingField vs Format
//    - anyhow is still used one level up to add "which category" context
//
// 2. What does strip_prefix with a closure do?
//    - It removes ONE leading char if the closure returns true for it
//    - "$$10" becomes "$10", which then fails to parse - on purpose
//
// 3. Why ElementRef::wrap?
//    - children() yields every node, including whitespace text nodes
//    - wrap() returns Some only for elements, so filter_map skips the rest
// -----------------------------------------------------------------------------
