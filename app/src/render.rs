//! HTML rendering of the product container.
//!
//! The container's content is replaced wholesale on every state change, so
//! each state maps to one self-contained HTML fragment. Backend-supplied
//! text and error messages are escaped before they reach the page.

extern crate alloc;
use alloc::borrow::Cow;
use core::fmt::Write as _;

use crate::loader::LoadState;
use crate::types::Product;

pub const LOADING_MESSAGE: &str = "Loading products...";
pub const EMPTY_MESSAGE: &str = "No products yet. Run seed script.";
pub const ERROR_PREFIX: &str = "Error loading products: ";
pub const CURRENCY_SYMBOL: &str = "$";

/// Renders the container content for `state`.
#[must_use]
pub fn markup(state: &LoadState) -> String {
    match state {
        LoadState::Idle => String::new(),
        LoadState::Loading => format!("<p>{LOADING_MESSAGE}</p>"),
        LoadState::Empty => format!("<p>{EMPTY_MESSAGE}</p>"),
        LoadState::Populated(products) => product_list(products),
        LoadState::Error(message) => format!("<p>{ERROR_PREFIX}{}</p>", escape_html(message)),
    }
}

fn product_list(products: &[Product]) -> String {
    let mut html = String::from("<ul>");
    for product in products {
        let _ = write!(
            html,
            "<li><strong>{}</strong> \u{2014} {CURRENCY_SYMBOL}{} <br><em>{}</em></li>",
            escape_html(&product.name),
            escape_html(&product.price.to_string()),
            escape_html(&product.category),
        );
    }
    html.push_str("</ul>");
    html
}

/// Escapes the five characters with special meaning in HTML text and attributes.
#[must_use]
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }
    let mut escaped = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Price;

    fn product(name: &str, price: f64, category: &str) -> Product {
        Product {
            name: name.to_owned(),
            price: Price::from(price),
            category: category.to_owned(),
        }
    }

    #[test]
    fn test_idle_renders_nothing() {
        assert_eq!(markup(&LoadState::Idle), "");
    }

    #[test]
    fn test_loading_placeholder() {
        assert_eq!(markup(&LoadState::Loading), "<p>Loading products...</p>");
    }

    #[test]
    fn test_empty_state() {
        assert_eq!(
            markup(&LoadState::Empty),
            "<p>No products yet. Run seed script.</p>"
        );
    }

    #[test]
    fn test_error_state() {
        assert_eq!(
            markup(&LoadState::Error("Fetch failed: 500".to_owned())),
            "<p>Error loading products: Fetch failed: 500</p>"
        );
    }

    #[test]
    fn test_product_items() {
        let html = markup(&LoadState::Populated(vec![
            product("Smart Watch Elite", 299.99, "Electronics"),
            product("Yoga Mat Premium", 35.99, "Sports"),
        ]));
        assert_eq!(
            html,
            "<ul>\
             <li><strong>Smart Watch Elite</strong> \u{2014} $299.99 <br><em>Electronics</em></li>\
             <li><strong>Yoga Mat Premium</strong> \u{2014} $35.99 <br><em>Sports</em></li>\
             </ul>"
        );
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn test_backend_text_is_escaped() {
        let html = markup(&LoadState::Populated(vec![product(
            "<img src=x onerror=alert(1)>",
            1.0,
            "Tom & Jerry's",
        )]));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("Tom &amp; Jerry&#x27;s"));

        let html = markup(&LoadState::Error("<b>bad</b>".to_owned()));
        assert_eq!(html, "<p>Error loading products: &lt;b&gt;bad&lt;/b&gt;</p>");
    }

    #[test]
    fn test_escape_borrows_clean_input() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    }
}
