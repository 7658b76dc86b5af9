use crate::model::{Product, ProductId};
use serde::{Deserialize, Serialize};

/// One entry in the cart: the product as it was when added, plus a quantity.
///
/// The cart holds at most one line per product id and `quantity` never drops below 1.
/// Both rules are upheld by the reducer in [`crate::state`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Starts a line for `product` with quantity 1.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price * quantity` for this line.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}
