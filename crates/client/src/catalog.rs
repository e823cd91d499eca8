//! Product catalog service.
//!
//! Read-only access to `/products` with the backend's filter/sort/paging
//! query parameters. Responses are cached with `moka` (5-minute TTL);
//! search queries bypass the cache.

use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use shopfront_core::{CategoryId, Page, Product, ProductId};
use tracing::{debug, instrument};

use crate::api::{ApiClient, ApiError};

/// Catalog sort orders understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortBy {
    PriceLowHigh,
    PriceHighLow,
    NameAZ,
    NameZA,
    #[default]
    Newest,
}

impl SortBy {
    /// Wire value for the `sortBy` query parameter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::PriceLowHigh => "price,asc",
            Self::PriceHighLow => "price,desc",
            Self::NameAZ => "name,asc",
            Self::NameZA => "name,desc",
            Self::Newest => "createdAt,desc",
        }
    }
}

/// Filter set for a catalog listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    pub category_id: Option<CategoryId>,
    /// Free-text search; sent as `q` and never cached.
    pub search: Option<String>,
    pub sort_by: Option<SortBy>,
    /// Only include products with stock remaining.
    pub in_stock: bool,
    /// Zero-based page index.
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ProductFilters {
    /// Build the `/products` query string pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(category_id) = self.category_id {
            query.push(("categoryId".to_string(), category_id.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            query.push(("sortBy".to_string(), sort_by.as_param().to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("q".to_string(), search.clone()));
        }
        if self.in_stock {
            query.push(("inStock".to_string(), "true".to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            query.push(("size".to_string(), size.to_string()));
        }
        query
    }

    fn cache_key(&self) -> String {
        format!(
            "products:{}:{}:{}:{}:{}",
            self.category_id.map_or(-1, |id| id.as_i64()),
            self.sort_by.unwrap_or_default().as_param(),
            self.in_stock,
            self.page.unwrap_or(0),
            self.size.unwrap_or(0),
        )
    }
}

#[derive(Clone)]
enum CacheValue {
    Product(Box<Product>),
    Listing(Page<Product>),
}

/// Client for the product catalog endpoints.
#[derive(Clone)]
pub struct ProductCatalog {
    api: ApiClient,
    cache: Cache<String, CacheValue>,
}

impl ProductCatalog {
    /// Create a catalog client over the shared API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self { api, cache }
    }

    /// Get a paginated product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, filters))]
    pub async fn list(&self, filters: &ProductFilters) -> Result<Page<Product>, ApiError> {
        let cache_key = filters.cache_key();

        // Cache only default (non-search) listings
        if filters.search.is_none()
            && let Some(CacheValue::Listing(page)) = self.cache.get(&cache_key).await
        {
            debug!("Cache hit for product listing");
            return Ok(page);
        }

        let page: Page<Product> = self
            .api
            .get_with_query("/products", &filters.to_query())
            .await?;

        if filters.search.is_none() {
            self.cache
                .insert(cache_key, CacheValue::Listing(page.clone()))
                .await;
        }

        Ok(page)
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get(&self, product_id: ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{product_id}");

        if let Some(CacheValue::Product(product)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.api.get(&format!("/products/{product_id}")).await?;

        self.cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }
}
