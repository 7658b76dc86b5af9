//! Catalog view: search, category filter and sort order over the loaded products.

use crate::model::{Category, Product};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which categories a view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Case-insensitive by name.
    #[default]
    Name,
    /// Cheapest first.
    Price,
}

/// Parameters of a catalog view. These live outside the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn category(mut self, filter: impl Into<CategoryFilter>) -> Self {
        self.category = filter.into();
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort = key;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product.category)
            && (self.search.is_empty()
                || product
                    .name
                    .to_lowercase()
                    .contains(&self.search.to_lowercase()))
    }
}

/// Applies `query` to `products`, returning the matching products in display order.
pub fn visible_products(products: &[Product], query: &CatalogQuery) -> Vec<Product> {
    let mut visible: Vec<Product> = products
        .iter()
        .filter(|product| query.matches(product))
        .cloned()
        .collect();

    match query.sort {
        SortKey::Name => visible.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        }),
        // Prices are validated finite on load; anything else compares equal.
        SortKey::Price => {
            visible.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal))
        }
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::mock_catalog;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_default_query_sorts_all_by_name() {
        let visible = visible_products(&mock_catalog(), &CatalogQuery::default());
        assert_eq!(
            names(&visible),
            vec![
                "Dell XPS 13",
                "iPad Air",
                "iPhone 14",
                "MacBook Pro",
                "Samsung Galaxy S23",
                "Samsung Galaxy Tab",
            ]
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let query = CatalogQuery::new().search("SAMSUNG");
        let visible = visible_products(&mock_catalog(), &query);
        assert_eq!(names(&visible), vec!["Samsung Galaxy S23", "Samsung Galaxy Tab"]);

        let query = CatalogQuery::new().search("nokia");
        assert!(visible_products(&mock_catalog(), &query).is_empty());
    }

    #[test]
    fn test_category_filter_and_price_sort() {
        let query = CatalogQuery::new()
            .category(Category::Laptops)
            .sort_by(SortKey::Price);
        let visible = visible_products(&mock_catalog(), &query);
        assert_eq!(names(&visible), vec!["Dell XPS 13", "MacBook Pro"]);

        let query = CatalogQuery::new().sort_by(SortKey::Price);
        let prices: Vec<f64> = visible_products(&mock_catalog(), &query)
            .iter()
            .map(|p| p.price)
            .collect();
        assert_eq!(prices, vec![399.0, 599.0, 699.0, 799.0, 1299.0, 1999.0]);
    }

    #[test]
    fn test_price_sort_is_stable() {
        let products = vec![
            Product::new(1, "b", 5.0, Category::Phones),
            Product::new(2, "a", 5.0, Category::Phones),
            Product::new(3, "c", 1.0, Category::Phones),
        ];
        let query = CatalogQuery::new().sort_by(SortKey::Price);
        let ids: Vec<u32> = visible_products(&products, &query)
            .iter()
            .map(|p| p.id.0)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(visible_products(&[], &CatalogQuery::new().search("x")).is_empty());
    }
}
