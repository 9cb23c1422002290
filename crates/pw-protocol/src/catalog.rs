use serde::{Deserialize, Serialize};

/// An inbound customer message.
///
/// Field names follow the `messages.csv` column layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier (e.g., "M001").
    #[serde(rename = "message_id")]
    pub id: String,
    /// Free-text body written by the customer.
    #[serde(rename = "message")]
    pub text: String,
    /// Product the customer actually bought afterwards, if any.
    /// Ground truth for the analyzer; the pipeline never reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_to_purchase: Option<String>,
}

impl Message {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            converted_to_purchase: None,
        }
    }

    /// Purchased product id, treating an empty cell as no purchase.
    pub fn purchased_product(&self) -> Option<&str> {
        self.converted_to_purchase
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier (e.g., "P042").
    #[serde(rename = "product_id")]
    pub id: String,
    pub name: String,
    /// Category label, matched case-sensitively by the candidate filter.
    pub category: String,
    /// Unit price in dollars.
    pub price: f64,
    pub stock_quantity: u32,
    /// Mean customer rating (0.0 - 5.0).
    pub avg_rating: f64,
    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}
