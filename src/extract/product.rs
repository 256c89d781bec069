// src/extract/product.rs
// =============================================================================
// This module maps a rendered category page to a list of Product records.
//
// Every product card on the page lives inside a `.product-wrapper` element.
// For each card we pull out five fields, in this order:
//
//   title           <- `title` attribute of `.title` (the link text is truncated)
//   description     <- text of `.description`
//   price           <- text of `.price`, e.g. "$24.99"
//   rating          <- number of star markers under `.ratings`
//   num_of_reviews  <- first token of `.ratings > .review-count`, e.g. "12 reviews"
//
// The field order of Product is also the column order of the CSV file.
//
// Rust concepts:
// - Iterators + collect::<Result<Vec<_>, _>>(): stop at the first error
// - Lifetimes: ElementRef<'a> borrows from the parsed document
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use super::fields::{count_rating, parse_price, parse_review_count, ExtractError};

/// One product card scraped from a category page.
///
/// serde serializes the fields in declaration order, which gives us the
/// CSV header `title,description,price,rating,num_of_reviews` for free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub rating: u8,
    pub num_of_reviews: u32,
}

impl Product {
    /// Column names in output order.
    pub const FIELDS: [&'static str; 5] =
        ["title", "description", "price", "rating", "num_of_reviews"];
}

// All the CSS selectors we need, parsed once per page
struct ProductSelectors {
    wrapper: Selector,
    title: Selector,
    description: Selector,
    price: Selector,
    ratings: Selector,
    review_count: Selector,
}

impl ProductSelectors {
    fn new() -> Self {
        // These selectors are constants and known to be valid,
        // so a parse failure would be a programmer error
        let parse = |css: &str| Selector::parse(css).expect("static selector is valid");

        ProductSelectors {
            wrapper: parse(".product-wrapper"),
            title: parse(".title"),
            description: parse(".description"),
            price: parse(".price"),
            ratings: parse(".ratings"),
            review_count: parse(".ratings > .review-count"),
        }
    }
}

// Extracts every product on the page, in page order
//
// Parameters:
//   document: the parsed, fully-expanded category page
//
// Returns: Vec<Product> in the same order the cards appear in the markup,
//          or the first ExtractError hit (no partial results)
pub fn extract_products(document: &Html) -> Result<Vec<Product>, ExtractError> {
    let selectors = ProductSelectors::new();

    let products = document
        .select(&selectors.wrapper)
        .map(|card| parse_single_product(card, &selectors))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = products.len(), "extracted products");
    Ok(products)
}

// Builds one Product from a `.product-wrapper` element
fn parse_single_product(
    card: ElementRef<'_>,
    selectors: &ProductSelectors,
) -> Result<Product, ExtractError> {
    let title = find(card, &selectors.title, "title")?
        .value()
        .attr("title")
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ExtractError::missing("title"))?
        .to_string();

    let description = text_of(find(card, &selectors.description, "description")?);

    let price = parse_price(&text_of(find(card, &selectors.price, "price")?))?;

    let rating = count_rating(find(card, &selectors.ratings, "rating")?)?;

    let num_of_reviews = parse_review_count(&text_of(find(
        card,
        &selectors.review_count,
        "num_of_reviews",
    )?))?;

    Ok(Product {
        title,
        description,
        price,
        rating,
        num_of_reviews,
    })
}

// First element under `card` matching `selector`, or MissingField(field)
fn find<'a>(
    card: ElementRef<'a>,
    selector: &Selector,
    field: &'static str,
) -> Result<ElementRef<'a>, ExtractError> {
    card.select(selector)
        .next()
        .ok_or_else(|| ExtractError::missing(field))
}

// All text nodes below an element, concatenated
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}
