//! HTTP handlers for the catalog API

use axum::{
    Json, Router,
    extract::{Extension, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    JwtAuth, UuidPath, ValidatedJson,
    auth::AuthUser,
    bearer_auth_middleware,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{
    Category, CreateProduct, DeleteResponse, ListProductsQuery, Product, ProductWithCategory,
    Role, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        list_categories,
    ),
    components(
        schemas(
            Product, Category, ProductWithCategory, CreateProduct, UpdateProduct,
            DeleteResponse, Role
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints"),
        (name = "Categories", description = "Category browsing endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router.
///
/// Browsing is public; create/update/delete require a verified bearer
/// credential, checked by the auth middleware before the handler runs.
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    auth: JwtAuth,
) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product));

    let protected = Router::new()
        .route("/", axum::routing::post(create_product))
        .route(
            "/{id}",
            axum::routing::put(update_product).delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(auth, bearer_auth_middleware));

    public.merge(protected).with_state(shared_service)
}

/// Create the categories router (read-only)
pub fn categories_router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(list_categories))
        .with_state(Arc::new(service))
}

/// List products in a category
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Products in the category, joined with the category, at most 25 rows", body = Vec<ProductWithCategory>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<ListProductsQuery>,
) -> CatalogResult<Json<Vec<ProductWithCategory>>> {
    let products = service.list_products(query.category.as_deref()).await?;
    Ok(Json(products))
}

/// Create a new product owned by the caller
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Extension(caller): Extension<AuthUser>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let product = service.create_product(&caller, input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found; a single-element row array", body = Vec<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Vec<Product>>> {
    let product = service.get_product(id).await?;
    // The lookup keeps its row-array wire shape
    Ok(Json(vec![product]))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Extension(caller): Extension<AuthUser>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> CatalogResult<Json<Product>> {
    let product = service.update_product(&caller, id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeleteResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Extension(caller): Extension<AuthUser>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<DeleteResponse>> {
    service.delete_product(&caller, id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Product successfully deleted".to_string(),
    }))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> CatalogResult<Json<Vec<Category>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}
