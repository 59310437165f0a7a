//! Per-row normalization for the product feed.
//!
//! Supplier feeds are loosely structured: numbers arrive with comma
//! decimals, thousands marks or stray `%` signs, descriptions carry HTML
//! markup, and any field may simply be missing. Normalization is tolerant
//! everywhere except the stock code, which alone decides whether a row is
//! usable.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use lakkeriet_core::{StockCode, StockCodeError};

use crate::models::product::NewProduct;
use crate::services::translate::translate;

/// A raw feed row as parsed from the delimited file.
///
/// Every field is optional; validation happens in [`normalize`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeedRow {
    pub sku: Option<String>,
    #[serde(rename = "EAN")]
    pub ean: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub weight: Option<String>,
    pub qty: Option<String>,
    pub price: Option<String>,
    pub tax: Option<String>,
    pub brand: Option<String>,
    /// Comma-separated image URLs; only the first is kept.
    pub images: Option<String>,
}

/// Why a feed row was skipped instead of imported.
#[derive(Debug, Error)]
pub enum RowSkip {
    /// The row has no stock code, so there is nothing to upsert by.
    #[error("missing stock code")]
    MissingCode,

    /// The stock code is present but unusable.
    #[error("invalid stock code: {0}")]
    InvalidCode(StockCodeError),
}

/// Normalize a raw feed row into a full product field set.
///
/// Numeric fields fall back to 0 when unparsable; the English description
/// is derived from the cleaned Norwegian one through the translation stub.
///
/// # Errors
///
/// Returns [`RowSkip`] when the row lacks a usable stock code; no other
/// input can fail a row.
pub fn normalize(row: &FeedRow) -> Result<NewProduct, RowSkip> {
    let raw_sku = row.sku.as_deref().unwrap_or("");
    if raw_sku.trim().is_empty() {
        return Err(RowSkip::MissingCode);
    }
    let sku = StockCode::parse(raw_sku).map_err(RowSkip::InvalidCode)?;

    let description_no = clean_html(row.description.as_deref().unwrap_or(""));
    let description_en = translate(&description_no);

    Ok(NewProduct {
        sku,
        ean: non_empty(row.ean.as_deref()),
        name: row.name.as_deref().unwrap_or("").trim().to_owned(),
        description_no,
        description_en,
        category: non_empty(row.category.as_deref()),
        weight: to_f64(row.weight.as_deref().unwrap_or(""), 0.0),
        quantity_on_hand: to_i64(row.qty.as_deref().unwrap_or(""), 0),
        price: to_f64(row.price.as_deref().unwrap_or(""), 0.0),
        tax_rate: to_f64(row.tax.as_deref().unwrap_or(""), 0.0),
        brand: non_empty(row.brand.as_deref()),
        image_url: row.images.as_deref().and_then(first_image),
    })
}

/// Matches HTML tags; the non-greedy body mirrors how feeds nest markup.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<[^<]+?>").expect("valid pattern"));

/// Strip markup from an imported description.
///
/// Decodes HTML entities, removes tags, and collapses whitespace runs
/// (including non-breaking spaces) to single spaces. Empty input yields an
/// empty string.
#[must_use]
pub fn clean_html(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let decoded = decode_entities(raw);
    let stripped = TAG_RE.replace_all(&decoded, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode HTML entities (`&amp;`, `&nbsp;`, `&#233;`, `&#xE9;`, ...).
///
/// Unknown or malformed entities are left as-is.
fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        // An entity body is short; anything longer is a bare ampersand.
        let body_end = tail.find(';').filter(|end| (2..=32).contains(end));
        match body_end.and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end))) {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}

/// Tolerantly parse a float from feed input.
///
/// Strips `%` and whitespace, then treats the rightmost of `,`/`.` as the
/// decimal separator and drops every other separator as a thousands mark:
/// `"1.299,50"` parses to `1299.5`.
fn parse_f64(val: &str) -> Option<f64> {
    let s: String = val
        .chars()
        .filter(|c| *c != '%' && !c.is_whitespace())
        .collect();
    if s.is_empty() {
        return None;
    }

    let normalized: String = match s.rfind([',', '.']) {
        Some(decimal_pos) => s
            .char_indices()
            .filter_map(|(i, c)| match c {
                ',' | '.' if i != decimal_pos => None,
                ',' => Some('.'),
                other => Some(other),
            })
            .collect(),
        None => s,
    };

    normalized.parse().ok()
}

/// Parse a float, falling back to `default` on any unparsable input.
#[must_use]
pub fn to_f64(val: &str, default: f64) -> f64 {
    parse_f64(val).unwrap_or(default)
}

/// Parse an integer via float-then-truncate, falling back to `default`.
#[must_use]
pub fn to_i64(val: &str, default: i64) -> i64 {
    parse_f64(val).map_or(default, |f| f as i64)
}

/// First entry of a comma-separated image list, trimmed; `None` when empty.
fn first_image(images: &str) -> Option<String> {
    images
        .split(',')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Trimmed value, or `None` when the input is absent or blank.
fn non_empty(val: Option<&str>) -> Option<String> {
    val.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
}
