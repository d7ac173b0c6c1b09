use core::fmt;

use serde::Deserialize;
use serde_json::Value;

#[cfg(feature = "ssr")]
use axum::extract::FromRef;
#[cfg(feature = "ssr")]
use leptos::config::LeptosOptions;

#[cfg(feature = "ssr")]
use crate::config::BackendConfig;

#[cfg(feature = "ssr")]
#[derive(FromRef, Debug, Clone)]
pub struct AppState {
    pub backend: BackendConfig,
    pub leptos_options: std::sync::Arc<LeptosOptions>,
}

#[cfg(feature = "ssr")]
impl FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.as_ref().clone()
    }
}

/// A product as listed by the backend.
///
/// Only the fields the page displays are kept; anything else the backend
/// sends (ids, stock, images) is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Product {
    pub name: String,
    pub price: Price,
    pub category: String,
}

/// A product price, accepted either as a JSON number or as a numeric string.
///
/// String prices keep their original spelling for display so `"19.90"`
/// is not shown as `19.9`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(try_from = "Value")]
pub struct Price {
    amount: f64,
    text: String,
}

impl Price {
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }
}

impl TryFrom<Value> for Price {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(number) => {
                let amount = number
                    .as_f64()
                    .ok_or_else(|| format!("price {number} is not representable"))?;
                Ok(Self::from(amount))
            }
            Value::String(text) => {
                let text = text.trim().to_owned();
                match text.parse::<f64>() {
                    Ok(amount) if amount.is_finite() => Ok(Self { amount, text }),
                    _ => Err(format!("price {text:?} is not a number")),
                }
            }
            other => Err(format!("price must be a number or numeric string, got {other}")),
        }
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        // -0.0 displays as "-0"; a price of zero is just "0".
        let amount = if amount == 0.0 { 0.0 } else { amount };
        Self {
            amount,
            text: amount.to_string(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
