//! Catalog entries.
//!
//! Products are immutable once loaded. The store only ever replaces the whole catalog
//! (see [`AppAction::SetProducts`](crate::actions::AppAction::SetProducts)).

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Catalog section a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Phones,
    Laptops,
    Tablets,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Phones, Category::Laptops, Category::Tablets];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Phones => "phones",
            Category::Laptops => "laptops",
            Category::Tablets => "tablets",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub category: Category,
    pub image: String,
    pub description: String,
}

impl Product {
    /// Creates a new Product with an empty image and description.
    ///
    /// # Arguments
    /// * `id` - Unique identifier within the catalog
    /// * `name` - Display name, also what search matches against
    /// * `price` - Unit price, expected to be finite and non-negative
    /// * `category` - Catalog section
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category,
            image: String::new(),
            description: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn has_valid_price(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0
    }
}
