use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::error::{AppError, Result};

/// Category stored when a new product comes without one
pub const DEFAULT_CATEGORY: &str = "other";

/// Quantity stored when a new product comes without one
pub const DEFAULT_QUANTITY: &str = "1";

/// Database product model, serialized as-is in API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub calories: Option<i64>,
    /// Tables created without the price column read as 0
    #[sqlx(default)]
    pub price: f64,
    pub purchased: bool,
}

/// Raw JSON body of create and update requests.
///
/// Every field is kept as an untyped value so that the normalization rules
/// below decide what a missing or odd value turns into, instead of the
/// deserializer rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductPayload {
    pub name: Value,
    pub category: Value,
    pub quantity: Value,
    pub calories: Value,
    pub price: Value,
    pub purchased: Value,
}

/// Normalized values of a product about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub calories: i64,
    pub price: f64,
}

/// Normalized values that fully overwrite an existing product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub calories: Option<i64>,
    pub price: f64,
    pub purchased: bool,
}

impl TryFrom<ProductPayload> for NewProduct {
    type Error = AppError;

    fn try_from(payload: ProductPayload) -> Result<Self> {
        let name = match &payload.name {
            Value::String(name) => name.trim(),
            _ => "",
        };
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".into()));
        }

        let category = match is_truthy(&payload.category) {
            true => to_text(&payload.category),
            false => None,
        };
        let quantity = match is_truthy(&payload.quantity) {
            true => to_text(&payload.quantity),
            false => None,
        };
        let calories = match is_truthy(&payload.calories) {
            true => to_integer(&payload.calories),
            false => 0,
        };

        // `purchased` is ignored, new products always start unpurchased
        Ok(Self {
            name: name.to_string(),
            category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            quantity: quantity.unwrap_or_else(|| DEFAULT_QUANTITY.to_string()),
            calories,
            price: to_price(&payload.price),
        })
    }
}

impl From<ProductPayload> for ProductUpdate {
    fn from(payload: ProductPayload) -> Self {
        Self {
            name: to_text(&payload.name),
            category: to_text(&payload.category),
            quantity: to_text(&payload.quantity),
            calories: match payload.calories {
                Value::Null => None,
                ref calories => Some(to_integer(calories)),
            },
            price: to_price(&payload.price),
            purchased: is_truthy(&payload.purchased),
        }
    }
}

/// The one truthiness rule used for every boolean coercion.
///
/// `null` is false, booleans are themselves, numbers are true unless zero,
/// strings, arrays and objects are true unless empty. Note that the string
/// `"false"` is therefore true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Text column coercion. `null` means no value, booleans are stored the way
/// SQLite stores them, as `"1"` and `"0"`.
pub fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(i64::from(*b).to_string()),
        Value::Number(_) => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) => {
            Some(serde_json::to_string(value).unwrap_or_default())
        }
    }
}

/// Integer coercion with a fallback of 0 for anything that is not a number.
pub fn to_integer(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f as i64)
                })
                .unwrap_or(0)
        }
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

/// Price coercion: empty, missing and unparsable input all become 0.
pub fn to_price(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}
