use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product, ProductFilter, ALL_CATEGORIES};

pub struct CatalogService<R> {
    repo: R,
}

impl<R: ProductRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError> {
        Ok(filter.apply(self.repo.list()?))
    }

    /// Products in `category`; the `all` category matches everything.
    pub fn list_by_category(
        &self,
        category: &str,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, DomainError> {
        let products = self.repo.list()?;
        if category == ALL_CATEGORIES {
            return Ok(filter.apply(products));
        }
        Ok(filter.apply(
            products
                .into_iter()
                .filter(|p| p.category == category)
                .collect(),
        ))
    }

    pub fn get_product(&self, id: i32) -> Result<Product, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound("Product"))
    }

    pub fn create_product(&self, product: NewProduct) -> Result<Product, DomainError> {
        product.validate()?;
        let created = self.repo.create(product)?;
        log::info!("Created product {} ({})", created.id, created.name);
        Ok(created)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
