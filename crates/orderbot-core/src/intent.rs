//! Supported intents and decoding of their parameters.
//!
//! The dialogue platform sends parameters as a loose JSON object whose shape
//! depends on the intent. Quantities arrive as JSON numbers (usually floats
//! such as `2.0`) and are truncated toward zero.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{OrderBotError, Result};
use crate::types::{OrderId, OrderLine};

pub const PARAM_FOOD_ITEM: &str = "food-item";
pub const PARAM_NUMBER: &str = "number";

/// The closed set of intents this backend fulfills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    TrackOrder,
    AddToOrder,
    RemoveFromOrder,
    CompleteOrder,
}

impl Intent {
    pub const ALL: [Intent; 4] = [
        Intent::TrackOrder,
        Intent::AddToOrder,
        Intent::RemoveFromOrder,
        Intent::CompleteOrder,
    ];

    /// Display name as configured on the dialogue platform.
    pub fn display_name(&self) -> &'static str {
        match self {
            Intent::TrackOrder => "track.order - context: ongoing-tracking",
            Intent::AddToOrder => "order.add - context: ongoing-order",
            Intent::RemoveFromOrder => "order.remove - context: ongoing-order",
            Intent::CompleteOrder => "order.complete - context: ongoing-order",
        }
    }
}

impl FromStr for Intent {
    type Err = OrderBotError;

    fn from_str(s: &str) -> Result<Self> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.display_name() == s)
            .ok_or_else(|| OrderBotError::UnsupportedIntent(s.to_string()))
    }
}

/// Outcome of pairing the `food-item` and `number` lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRequest {
    Paired(Vec<OrderLine>),
    /// Lists had different lengths; nothing can be paired reliably.
    Mismatched { items: usize, quantities: usize },
}

/// Pair item names with quantities by position.
pub fn pair_lines(items: Vec<String>, quantities: Vec<i64>) -> LineRequest {
    if items.len() != quantities.len() {
        return LineRequest::Mismatched {
            items: items.len(),
            quantities: quantities.len(),
        };
    }
    LineRequest::Paired(
        items
            .into_iter()
            .zip(quantities)
            .map(|(item, quantity)| OrderLine { item, quantity })
            .collect(),
    )
}

/// Decode `food-item` (array of strings, or a lone string).
pub fn food_items(params: &Map<String, Value>) -> Result<Vec<String>> {
    match required(params, PARAM_FOOD_ITEM)? {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(values) => values
            .iter()
            .map(|v| {
                v.as_str().map(str::to_string).ok_or_else(|| {
                    OrderBotError::InvalidParameters(format!(
                        "{PARAM_FOOD_ITEM} entries must be strings, got {v}"
                    ))
                })
            })
            .collect(),
        other => Err(OrderBotError::InvalidParameters(format!(
            "{PARAM_FOOD_ITEM} must be a list of strings, got {other}"
        ))),
    }
}

/// Decode `number` (array of numbers, or a lone number) into truncated integers.
pub fn quantities(params: &Map<String, Value>) -> Result<Vec<i64>> {
    match required(params, PARAM_NUMBER)? {
        Value::Array(values) => values.iter().map(truncate_number).collect(),
        other => Ok(vec![truncate_number(other)?]),
    }
}

/// Decode `number` as an order id. A one-element list is accepted too.
pub fn order_id(params: &Map<String, Value>) -> Result<OrderId> {
    let value = match required(params, PARAM_NUMBER)? {
        Value::Array(values) => match values.as_slice() {
            [single] => single,
            _ => {
                return Err(OrderBotError::InvalidParameters(format!(
                    "expected exactly one order id, got {}",
                    values.len()
                )))
            }
        },
        other => other,
    };
    truncate_number(value).map(OrderId)
}

fn required<'a>(params: &'a Map<String, Value>, name: &str) -> Result<&'a Value> {
    params
        .get(name)
        .ok_or_else(|| OrderBotError::InvalidParameters(format!("missing parameter: {name}")))
}

fn truncate_number(value: &Value) -> Result<i64> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
        .ok_or_else(|| OrderBotError::InvalidParameters(format!("not a number: {value}")))
}
