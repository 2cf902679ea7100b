use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// A stored product.
///
/// `name`, `price` and `quantity` are kept exactly as the client sent them;
/// only their presence is checked, so they are plain JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Identifier assigned by the store
    #[schema(example = "0190f6a2-7c3e-7b4a-9d1e-2f5c8a9b0c1d")]
    pub id: String,
    #[schema(value_type = String, example = "Widget")]
    pub name: Value,
    #[schema(value_type = f64, example = 9.99)]
    pub price: Value,
    #[schema(value_type = i64, example = 5)]
    pub quantity: Value,
}

/// Product fields before the store has assigned an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: Value,
    pub price: Value,
    pub quantity: Value,
}

impl NewProduct {
    pub fn with_id(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Request body for create and replace.
///
/// A key that appears in the body counts as supplied even when its value is
/// `null`; only an absent key is `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[serde(default, deserialize_with = "present")]
    #[validate(required)]
    #[schema(value_type = String, example = "Widget")]
    pub name: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    #[validate(required)]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    #[validate(required)]
    #[schema(value_type = i64, example = 5)]
    pub quantity: Option<Value>,
}

impl ProductPayload {
    /// `None` unless all three fields were supplied.
    pub fn into_new_product(self) -> Option<NewProduct> {
        let Self {
            name: Some(name),
            price: Some(price),
            quantity: Some(quantity),
        } = self
        else {
            return None;
        };

        Some(NewProduct {
            name,
            price,
            quantity,
        })
    }
}

// Without this, serde maps an explicit `null` to `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
