//! HTTP surface of the storefront catalog.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::{resolve, Breadcrumb, CategoryPath, CategorySnapshot, CategoryStore, ProductFilter};
use crate::domain::aggregates::{CategoryDraft, CategoryNode, CategoryPatch, Product};
use crate::domain::events::TreeSource;
use crate::domain::value_objects::HierarchyLevel;
use crate::navigation::NavMenu;
use crate::remote::{ListProductsParams, ProductService};
use crate::CatalogError;

type ApiError = (StatusCode, String);

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CategoryStore>,
    pub products: Arc<dyn ProductService>,
    /// Page size used when listing products from the backend.
    pub product_fetch_limit: u32,
    pub product_max_pages: u32,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async {
            Json(serde_json::json!({"status": "healthy", "service": "storefront-catalog"}))
        }))
        .route("/api/v1/categories", get(list_categories).post(create_category))
        .route("/api/v1/categories/:id", axum::routing::put(update_category).delete(delete_category))
        .route("/api/v1/navigation", get(list_navigation))
        .route("/api/v1/navigation/:main", get(get_navigation))
        .route("/category/:main", get(category_page))
        .route("/category/:main/:level/:slug", get(category_page_deep))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_error(e: CatalogError) -> ApiError {
    let status = match &e {
        CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
        CatalogError::CategoryNotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Remote { status, .. } if (400..500).contains(status) => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CatalogError::Remote { .. } | CatalogError::Transport(_) | CatalogError::Decode(_) => {
            StatusCode::BAD_GATEWAY
        }
    };
    (status, e.to_string())
}

/// Current tree. Re-lists while nothing has loaded yet or the fallback tree
/// is being served, so a recovered backend is picked up without a manual refresh.
async fn current_tree(store: &CategoryStore) -> Arc<CategorySnapshot> {
    let snapshot = store.snapshot();
    if snapshot.source == TreeSource::Remote {
        return snapshot;
    }
    store.list().await;
    store.snapshot()
}

async fn list_categories(State(s): State<AppState>) -> Json<CategorySnapshot> {
    s.store.list().await;
    Json(s.store.snapshot().as_ref().clone())
}

async fn create_category(
    State(s): State<AppState>,
    Json(draft): Json<CategoryDraft>,
) -> Result<(StatusCode, Json<CategoryNode>), ApiError> {
    let node = s.store.create(draft).await.map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(node)))
}

async fn update_category(
    State(s): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CategoryPatch>,
) -> Result<Json<CategoryNode>, ApiError> {
    s.store.update(&id, patch).await.map(Json).map_err(api_error)
}

async fn delete_category(State(s): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    s.store.delete(&id).await.map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_navigation(State(s): State<AppState>) -> Json<Vec<NavMenu>> {
    let tree = current_tree(&s.store).await;
    Json(NavMenu::build_all(&tree.categories))
}

async fn get_navigation(State(s): State<AppState>, Path(main): Path<String>) -> Result<Json<NavMenu>, ApiError> {
    let tree = current_tree(&s.store).await;
    crate::catalog::find_main(&tree.categories, &main)
        .map(|node| Json(NavMenu::build(node)))
        .ok_or_else(|| api_error(CatalogError::CategoryNotFound(main)))
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    pub main_category: CategoryNode,
    pub target_category: CategoryNode,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub deep_match_found: bool,
    pub products: Vec<Product>,
    /// Product fetch failure or truncation notice; the page still renders.
    pub error: Option<String>,
}

async fn category_page(
    State(s): State<AppState>,
    Path(main): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CategoryPage>, ApiError> {
    render_page(&s, CategoryPath::main(main), query).await
}

async fn category_page_deep(
    State(s): State<AppState>,
    Path((main, level, slug)): Path<(String, String, String)>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CategoryPage>, ApiError> {
    let level = HierarchyLevel::from_route_segment(&level)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown hierarchy level: {level}")))?;
    render_page(&s, CategoryPath::main(main).with_segment(level, slug), query).await
}

async fn render_page(s: &AppState, path: CategoryPath, query: PageQuery) -> Result<Json<CategoryPage>, ApiError> {
    let tree = current_tree(&s.store).await;
    let (main_category, target_category, breadcrumbs, deep_match_found, filter) = {
        let resolution = resolve(&tree.categories, &path)
            .ok_or_else(|| api_error(CatalogError::CategoryNotFound(path.main.clone())))?;
        (
            resolution.main.clone(),
            resolution.target.to_node(),
            resolution.breadcrumbs,
            resolution.deep_match_found,
            ProductFilter::new(&resolution.target).with_search(query.q),
        )
    };

    let (products, error) = match fetch_products(s).await {
        Ok((all, complete)) => {
            let error = (!complete).then(|| {
                tracing::warn!(pages = s.product_max_pages, "product listing truncated");
                format!("product listing truncated after {} pages", s.product_max_pages)
            });
            (filter.apply(&all).into_iter().cloned().collect(), error)
        }
        Err(e) => {
            tracing::warn!(error = %e, category = %target_category.slug, "product fetch failed");
            (vec![], Some(e.to_string()))
        }
    };

    Ok(Json(CategoryPage { main_category, target_category, breadcrumbs, deep_match_found, products, error }))
}

/// Pages through the whole listing, since matching happens locally and a
/// skipped page would drop products silently. `false` means the page cap was hit.
async fn fetch_products(s: &AppState) -> crate::Result<(Vec<Product>, bool)> {
    let page_size = s.product_fetch_limit.max(1);
    let mut all = Vec::new();
    for page in 1..=s.product_max_pages.max(1) {
        let params = ListProductsParams { page: Some(page), limit: Some(page_size), ..Default::default() };
        let batch = s.products.list_products(&params).await?;
        let exhausted = batch.len() < page_size as usize;
        all.extend(batch);
        if exhausted {
            return Ok((all, true));
        }
    }
    Ok((all, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::resolver::tests::sample_tree;
    use crate::catalog::store::tests::FakeCategoryService;
    use crate::domain::aggregates::CategoryRef;
    use crate::Result;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    #[derive(Default)]
    struct FakeProductService {
        products: Vec<Product>,
        fail: AtomicBool,
    }

    #[async_trait]
    impl ProductService for FakeProductService {
        async fn list_products(&self, params: &ListProductsParams) -> Result<Vec<Product>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(CatalogError::Remote { status: 500, message: "products down".into() });
            }
            let limit = params.limit.map_or(usize::MAX, |l| l as usize);
            let skip = (params.page.unwrap_or(1).saturating_sub(1) as usize).saturating_mul(limit);
            Ok(self.products.iter().skip(skip).take(limit).cloned().collect())
        }
    }

    fn app(categories: FakeCategoryService, products: FakeProductService) -> (Arc<FakeCategoryService>, Router) {
        app_paged(categories, products, 100, 50)
    }

    fn app_paged(
        categories: FakeCategoryService,
        products: FakeProductService,
        page_size: u32,
        max_pages: u32,
    ) -> (Arc<FakeCategoryService>, Router) {
        let categories = Arc::new(categories);
        let state = AppState {
            store: Arc::new(CategoryStore::new(categories.clone())),
            products: Arc::new(products),
            product_fetch_limit: page_size,
            product_max_pages: max_pages,
        };
        (categories, router(state))
    }

    fn crowded_catalog() -> Vec<Product> {
        let mut products: Vec<Product> = (0..250)
            .map(|i| Product::new(format!("e{i}"), "Gadget").in_category(CategoryRef::Slug("electronics".into())))
            .collect();
        products.push(Product::new("s1", "Oxford shirt").in_category(CategoryRef::Slug("shirts".into())));
        products
    }

    fn catalog_products() -> Vec<Product> {
        vec![
            Product::new("p1", "Oxford shirt").in_category(CategoryRef::Slug("shirts".into())),
            Product::new("p2", "Sneakers").in_category(CategoryRef::Slug("footwear".into())),
            Product::new("p3", "Phone").in_category(CategoryRef::Slug("electronics".into())),
        ]
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn test_category_page_main() {
        let (_, router) = app(FakeCategoryService::with(sample_tree()), FakeProductService { products: catalog_products(), ..Default::default() });
        let (status, body) = get_json(router, "/category/men").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["targetCategory"]["slug"], "men");
        assert_eq!(body["products"].as_array().unwrap().len(), 2);
        assert!(body["error"].is_null());
    }

    #[tokio::test]
    async fn test_category_page_deep_with_search() {
        let (_, router) = app(FakeCategoryService::with(sample_tree()), FakeProductService { products: catalog_products(), ..Default::default() });
        let (status, body) = get_json(router, "/category/men/type/shirts-type-id?q=oxford").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["targetCategory"]["name"], "Shirts");
        let crumbs: Vec<&str> = body["breadcrumbs"].as_array().unwrap().iter().map(|b| b["name"].as_str().unwrap()).collect();
        assert_eq!(crumbs, vec!["Men's Collection", "Clothing", "Shirts"]);
        assert_eq!(body["products"][0]["id"], "p1");
    }

    #[tokio::test]
    async fn test_unknown_main_and_level() {
        let (_, router) = app(FakeCategoryService::with(sample_tree()), FakeProductService::default());
        let (status, _) = get_json(router.clone(), "/category/toys").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get_json(router, "/category/men/colour/red").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_product_failure_is_stored_on_page() {
        let products = FakeProductService { products: catalog_products(), fail: AtomicBool::new(true) };
        let (_, router) = app(FakeCategoryService::with(sample_tree()), products);
        let (status, body) = get_json(router, "/category/electronics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["products"].as_array().unwrap().is_empty());
        assert!(body["error"].as_str().unwrap().contains("products down"));
    }

    #[tokio::test]
    async fn test_category_outage_serves_fallback() {
        let categories = FakeCategoryService::default();
        categories.fail_list.store(true, Ordering::SeqCst);
        let (_, router) = app(categories, FakeProductService::default());
        let (status, body) = get_json(router.clone(), "/api/v1/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["categories"].as_array().unwrap().len(), 6);

        let (status, body) = get_json(router, "/api/v1/navigation/men").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entries"][0]["href"], "/category/men/subcategory/shirts");
    }

    #[tokio::test]
    async fn test_create_and_failed_delete() {
        let (service, router) = app(FakeCategoryService::default(), FakeProductService::default());
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/categories")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name": "Garden"}"#))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = Request::builder().method("POST").uri("/api/v1/categories")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name": ""}"#)).unwrap();
        assert_eq!(router.clone().oneshot(request).await.unwrap().status(), StatusCode::BAD_REQUEST);

        service.fail_mutations.store(true, Ordering::SeqCst);
        let request = Request::builder().method("DELETE").uri("/api/v1/categories/id-garden").body(Body::empty()).unwrap();
        assert_eq!(router.oneshot(request).await.unwrap().status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_matches_beyond_first_page_are_kept() {
        let products = FakeProductService { products: crowded_catalog(), ..Default::default() };
        let (_, router) = app_paged(FakeCategoryService::with(sample_tree()), products, 200, 50);
        let (status, body) = get_json(router, "/category/men").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["products"].as_array().unwrap().len(), 1);
        assert_eq!(body["products"][0]["id"], "s1");
        assert!(body["error"].is_null());
    }

    #[tokio::test]
    async fn test_page_cap_is_reported() {
        let products = FakeProductService { products: crowded_catalog(), ..Default::default() };
        let (_, router) = app_paged(FakeCategoryService::with(sample_tree()), products, 100, 2);
        let (status, body) = get_json(router, "/category/electronics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["products"].as_array().unwrap().len(), 200);
        assert!(body["error"].as_str().unwrap().contains("truncated"));
    }

    #[tokio::test]
    async fn test_recovers_from_fallback_once_backend_returns() {
        let categories = FakeCategoryService::with(sample_tree());
        categories.fail_list.store(true, Ordering::SeqCst);
        let (service, router) = app(categories, FakeProductService::default());
        let (_, body) = get_json(router.clone(), "/api/v1/navigation/men").await;
        assert_eq!(body["name"], "Men's Collection");
        assert_eq!(body["entries"][0]["slug"], "shirts");

        service.fail_list.store(false, Ordering::SeqCst);
        let (_, body) = get_json(router, "/api/v1/navigation/men").await;
        assert_eq!(body["entries"][0]["slug"], "clothing");
    }
}
