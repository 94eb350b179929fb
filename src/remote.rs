//! Remote catalog API: service traits and the reqwest-backed client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::aggregates::{CategoryDraft, CategoryNode, CategoryPatch, Product};
use crate::{CatalogError, Result};

/// Category endpoints of the catalog backend.
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<CategoryNode>>;
    async fn create_category(&self, draft: &CategoryDraft) -> Result<CategoryNode>;
    async fn update_category(&self, id: &str, patch: &CategoryPatch) -> Result<CategoryNode>;
    async fn delete_category(&self, id: &str) -> Result<()>;
}

/// Product listing endpoint of the catalog backend.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn list_products(&self, params: &ListProductsParams) -> Result<Vec<Product>>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ListProductsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

// Response envelopes: every endpoint answers `{success, ...}`.

#[derive(Deserialize)]
struct CategoriesEnvelope {
    success: bool,
    #[serde(default)]
    categories: Vec<CategoryNode>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct StatusEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct ProductsEnvelope {
    success: bool,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

/// HTTP client for the catalog backend.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, base_url: config.catalog_api_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    fn url(&self, path: &str) -> String { format!("{}/{}", self.base_url, path) }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text).map(|b| b.message).unwrap_or(text);
            return Err(CatalogError::Remote { status: status.as_u16(), message });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

fn unsuccessful(message: Option<String>) -> CatalogError {
    CatalogError::Remote { status: 200, message: message.unwrap_or_else(|| "request was not successful".into()) }
}

#[async_trait]
impl CategoryService for HttpCatalogClient {
    async fn list_categories(&self) -> Result<Vec<CategoryNode>> {
        let response = self.client.get(self.url("categories")).send().await?;
        let body: CategoriesEnvelope = Self::decode(response).await?;
        if !body.success { return Err(unsuccessful(body.message)); }
        Ok(body.categories)
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<CategoryNode> {
        let response = self.client.post(self.url("categories")).json(draft).send().await?;
        let body: DataEnvelope<CategoryNode> = Self::decode(response).await?;
        match (body.success, body.data) {
            (true, Some(node)) => Ok(node),
            (_, _) => Err(unsuccessful(body.message)),
        }
    }

    async fn update_category(&self, id: &str, patch: &CategoryPatch) -> Result<CategoryNode> {
        let response = self.client.put(self.url(&format!("categories/{id}"))).json(patch).send().await?;
        let body: DataEnvelope<CategoryNode> = Self::decode(response).await?;
        match (body.success, body.data) {
            (true, Some(node)) => Ok(node),
            (_, _) => Err(unsuccessful(body.message)),
        }
    }

    async fn delete_category(&self, id: &str) -> Result<()> {
        let response = self.client.delete(self.url(&format!("categories/{id}"))).send().await?;
        let body: StatusEnvelope = Self::decode(response).await?;
        if !body.success { return Err(unsuccessful(body.message)); }
        Ok(())
    }
}

#[async_trait]
impl ProductService for HttpCatalogClient {
    async fn list_products(&self, params: &ListProductsParams) -> Result<Vec<Product>> {
        let response = self.client.get(self.url("products")).query(params).send().await?;
        let body: ProductsEnvelope = Self::decode(response).await?;
        if !body.success { return Err(unsuccessful(body.message)); }
        Ok(body.products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelopes_decode() {
        let body: CategoriesEnvelope = serde_json::from_str(
            r#"{"success": true, "categories": [{"_id": "1", "slug": "beauty", "name": "Beauty"}]}"#,
        ).unwrap();
        assert!(body.success);
        assert_eq!(body.categories[0].slug, "beauty");

        let body: DataEnvelope<CategoryNode> = serde_json::from_str(r#"{"success": false, "message": "duplicate slug"}"#).unwrap();
        assert!(!body.success && body.data.is_none());
        assert_eq!(unsuccessful(body.message).to_string(), "Catalog API error (200): duplicate slug");
    }

    #[test]
    fn test_client_trims_base_url() {
        let config = Config::from_lookup(|key| (key == "CATALOG_API_URL").then(|| "http://api.local/".to_string())).unwrap();
        let client = HttpCatalogClient::new(&config).unwrap();
        assert_eq!(client.url("categories"), "http://api.local/categories");
    }

    #[test]
    fn test_product_params_skip_empty() {
        let params = ListProductsParams { limit: Some(50), ..Default::default() };
        assert_eq!(serde_json::to_value(&params).unwrap(), serde_json::json!({"limit": 50}));
        let params = ListProductsParams { page: Some(2), limit: Some(50), ..Default::default() };
        assert_eq!(serde_json::to_value(&params).unwrap(), serde_json::json!({"page": 2, "limit": 50}));
    }
}
