use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::{DomainError, FieldError};
use crate::domain::money::{decimal_text, decimal_text_opt, parse_decimal};
use crate::domain::product::{NewProduct, Product, ProductFilter, ProductSort};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    /// Decimal price, e.g. "9.99"
    #[serde(with = "decimal_text")]
    #[schema(value_type = String, example = "9.99")]
    pub price: BigDecimal,
    pub category: String,
    pub image: String,
    #[serde(with = "decimal_text")]
    #[schema(value_type = String, example = "4.5")]
    pub rating: BigDecimal,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default, with = "decimal_text_opt")]
    #[schema(value_type = Option<String>)]
    pub discount_price: Option<BigDecimal>,
    #[serde(default)]
    pub is_service: bool,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(r: CreateProductRequest) -> Self {
        NewProduct {
            name: r.name,
            description: r.description,
            price: r.price,
            category: r.category,
            image: r.image,
            rating: r.rating,
            badge: r.badge,
            discount_price: r.discount_price,
            is_service: r.is_service,
        }
    }
}

/// Optional search, bounds and sort for product listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_rating: Option<String>,
    pub sort: Option<String>,
}

impl ProductQuery {
    pub fn to_filter(&self) -> Result<ProductFilter, DomainError> {
        let mut errors = Vec::new();
        let mut bound = |field: &str, raw: &Option<String>| match raw.as_deref() {
            None | Some("") => None,
            Some(text) => {
                let parsed = parse_decimal(text);
                if parsed.is_none() {
                    errors.push(FieldError::new(field, format!("'{}' is not a number", text)));
                }
                parsed
            }
        };
        let min_price = bound("minPrice", &self.min_price);
        let max_price = bound("maxPrice", &self.max_price);
        let min_rating = bound("minRating", &self.min_rating);
        DomainError::check("Invalid product filter", errors)?;

        Ok(ProductFilter {
            search: self.search.clone(),
            min_price,
            max_price,
            min_rating,
            sort: self.sort.as_deref().map(ProductSort::parse).unwrap_or_default(),
        })
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or description"),
        ("minPrice" = Option<String>, Query, description = "Inclusive lower price bound"),
        ("maxPrice" = Option<String>, Query, description = "Inclusive upper price bound"),
        ("minRating" = Option<String>, Query, description = "Minimum rating"),
        ("sort" = Option<String>, Query, description = "price-asc, price-desc, name-asc, name-desc, rating-desc or featured"),
    ),
    responses(
        (status = 200, description = "Products", body = [Product]),
        (status = 400, description = "Invalid filter"),
    ),
    tag = "products"
)]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.to_filter()?;
    Ok(HttpResponse::Ok().json(state.catalog.list_products(&filter)?))
}

/// GET /api/products/category/{category}
///
/// The `all` category lists every product.
#[utoipa::path(
    get,
    path = "/api/products/category/{category}",
    params(("category" = String, Path, description = "Category name, or `all`")),
    responses((status = 200, description = "Products in the category", body = [Product])),
    tag = "products"
)]
pub async fn list_by_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.to_filter()?;
    let products = state.catalog.list_by_category(&path.into_inner(), &filter)?;
    Ok(HttpResponse::Ok().json(products))
}

/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Invalid product id"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.catalog.get_product(path.into_inner())?))
}

/// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid product data"),
    ),
    tag = "products"
)]
pub async fn create_product(
    state: web::Data<AppState>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let created = state.catalog.create_product(body.into_inner().into())?;
    Ok(HttpResponse::Created().json(created))
}
