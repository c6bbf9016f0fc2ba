//! Product mentions handed over by the extraction collaborator.
//!
//! The model answers with a JSON object shaped like
//! `{customer_name, company_name, company_address, products: [...], competitor_name,
//! discount_mentioned}`. Only `products` feeds the matcher; the remaining keys are kept
//! verbatim in [`ExtractionPayload::context`] for callers that want to display them.

pub mod extraction;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub use extraction::{
    extraction_instructions, ChatMessage, ExtractionError, ExtractionRequest, MentionExtractor,
};

/// A part reference pulled from free text. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMention {
    #[serde(
        rename = "part_name",
        alias = "name",
        default,
        deserialize_with = "lenient_text"
    )]
    pub name: String,
    #[serde(
        rename = "part_id",
        alias = "identifier",
        default,
        deserialize_with = "lenient_text"
    )]
    pub identifier: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub quantity: String,
}

impl ProductMention {
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            quantity: quantity.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionPayload {
    pub products: Vec<ProductMention>,
    #[serde(flatten)]
    pub context: Map<String, Value>,
}

impl ExtractionPayload {
    /// Parses raw model output. Tolerates a surrounding ```json fence.
    pub fn parse(raw: &str) -> Result<Self, MalformedInputError> {
        let json = extract_json_object(raw).ok_or(MalformedInputError::NoJsonObject)?;
        let value: Value = serde_json::from_str(json).map_err(MalformedInputError::Json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, MalformedInputError> {
        let Value::Object(mut context) = value else {
            return Err(MalformedInputError::NotAnObject);
        };

        let products = match context.remove("products") {
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| mention_from_item(index, item))
                .collect(),
            Some(_) => return Err(MalformedInputError::ProductsNotAnArray),
            None => return Err(MalformedInputError::MissingProducts),
        };

        Ok(Self { products, context })
    }

    pub fn context_text(&self, key: &str) -> Option<&str> {
        self.context
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn discount_mentioned(&self) -> bool {
        matches!(self.context.get("discount_mentioned"), Some(Value::Bool(true)))
    }
}

/// A batch that is not shaped as a sequence of mention records.
#[derive(Debug, thiserror::Error)]
pub enum MalformedInputError {
    #[error("extraction output does not contain a JSON object")]
    NoJsonObject,
    #[error("extraction output is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("extraction output must be a JSON object")]
    NotAnObject,
    #[error("extraction output has no `products` field")]
    MissingProducts,
    #[error("`products` must be an array")]
    ProductsNotAnArray,
}

/// A product that is not a record degrades to an empty mention, which renders as a
/// `No Match` row instead of failing the batch.
fn mention_from_item(index: usize, item: Value) -> ProductMention {
    if !item.is_object() {
        warn!(index, item = %item, "product is not a record; treating it as empty");
        return ProductMention::default();
    }

    ProductMention::deserialize(item).unwrap_or_else(|err| {
        warn!(index, error = %err, "product could not be read; treating it as empty");
        ProductMention::default()
    })
}

fn extract_json_object(raw: &str) -> Option<&str> {
    if let Some(start_marker) = raw.find("```json") {
        let start = start_marker + "```json".len();
        if let Some(end_offset) = raw[start..].find("```") {
            return Some(raw[start..start + end_offset].trim());
        }
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end >= start).then(|| &raw[start..=end])
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(Value::Bool(flag)) => Ok(flag.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => Ok(String::new()),
    }
}
