//! Hard-coded demo data served by the simulated loaders.

use crate::model::{Category, Product, User};

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200";

fn demo_product(id: u32, name: &str, price: f64, category: Category, description: &str) -> Product {
    Product::new(id, name, price, category)
        .with_image(PLACEHOLDER_IMAGE)
        .with_description(description)
}

/// The six-product demo catalog: two phones, two laptops, two tablets.
pub fn mock_catalog() -> Vec<Product> {
    vec![
        demo_product(1, "iPhone 14", 799.0, Category::Phones, "The newest iPhone"),
        demo_product(2, "Samsung Galaxy S23", 699.0, Category::Phones, "Samsung flagship"),
        demo_product(3, "MacBook Pro", 1999.0, Category::Laptops, "Powerful Apple laptop"),
        demo_product(4, "Dell XPS 13", 1299.0, Category::Laptops, "Premium Dell laptop"),
        demo_product(5, "iPad Air", 599.0, Category::Tablets, "Apple tablet"),
        demo_product(6, "Samsung Galaxy Tab", 399.0, Category::Tablets, "Samsung tablet"),
    ]
}

/// The signed-in user for the simulated session.
pub fn mock_user() -> User {
    User::new(1, "Ivan Ivanov", "ivan@example.com")
}
