use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::{DomainError, FieldError};
use super::money::{decimal_text, decimal_text_opt};

/// Category name that matches every product.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[serde(with = "decimal_text")]
    #[schema(value_type = String, example = "999.99")]
    pub price: BigDecimal,
    pub category: String,
    pub image: String,
    #[serde(with = "decimal_text")]
    #[schema(value_type = String, example = "4.5")]
    pub rating: BigDecimal,
    pub badge: Option<String>,
    #[serde(default, with = "decimal_text_opt")]
    #[schema(value_type = Option<String>)]
    pub discount_price: Option<BigDecimal>,
    pub is_service: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
    pub image: String,
    pub rating: BigDecimal,
    pub badge: Option<String>,
    pub discount_price: Option<BigDecimal>,
    pub is_service: bool,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();
        for (field, value) in [
            ("name", &self.name),
            ("description", &self.description),
            ("category", &self.category),
            ("image", &self.image),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, "must not be empty"));
            }
        }
        let zero = BigDecimal::from(0);
        if self.price < zero {
            errors.push(FieldError::new("price", "must not be negative"));
        }
        if self.rating < zero || self.rating > BigDecimal::from(5) {
            errors.push(FieldError::new("rating", "must be between 0 and 5"));
        }
        if matches!(&self.discount_price, Some(d) if *d < zero) {
            errors.push(FieldError::new("discountPrice", "must not be negative"));
        }
        DomainError::check("Invalid product data", errors)
    }
}

/// Ordering applied to a product listing. Unknown names fall back to
/// `Featured`, which keeps catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    RatingDesc,
}

impl ProductSort {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "price-asc" => ProductSort::PriceAsc,
            "price-desc" => ProductSort::PriceDesc,
            "name-asc" => ProductSort::NameAsc,
            "name-desc" => ProductSort::NameDesc,
            "rating-desc" => ProductSort::RatingDesc,
            _ => ProductSort::Featured,
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            ProductSort::Featured => Ordering::Equal,
            ProductSort::PriceAsc => a.price.cmp(&b.price),
            ProductSort::PriceDesc => b.price.cmp(&a.price),
            ProductSort::NameAsc => a.name.cmp(&b.name),
            ProductSort::NameDesc => b.name.cmp(&a.name),
            ProductSort::RatingDesc => b.rating.cmp(&a.rating),
        }
    }
}

/// Search, price/rating bounds and sort order for the product grid.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
    pub min_rating: Option<BigDecimal>,
    pub sort: ProductSort,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(query) = self.search.as_deref().map(str::to_lowercase) {
            if !query.is_empty()
                && !product.name.to_lowercase().contains(&query)
                && !product.description.to_lowercase().contains(&query)
            {
                return false;
            }
        }
        if matches!(&self.min_price, Some(min) if product.price < *min) {
            return false;
        }
        if matches!(&self.max_price, Some(max) if product.price > *max) {
            return false;
        }
        if matches!(&self.min_rating, Some(min) if product.rating < *min) {
            return false;
        }
        true
    }

    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let mut result: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        // Stable sort keeps catalog order between equal keys.
        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }
}
