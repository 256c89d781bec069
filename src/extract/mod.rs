// src/extract/mod.rs
// =============================================================================
// This module turns a fully-loaded category page into Product records.
//
// Submodules:
// - fields: The per-field rules (price, review count, star rating)
// - product: The Product type and the page-level extraction loop
//
// Everything here is synchronous and works on an already-parsed document,
// so it can be tested with plain HTML strings - no browser needed.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod fields;
mod product;

// Re-export public items from submodules
// This lets callers write `extract::extract_products()` instead of
// `extract::product::extract_products()`
pub use product::{extract_products, Product};
