// SPDX-License-Identifier: AGPL-3.0-or-later

//! HTTP surface. Route handlers live in the submodules; this module wires
//! them into a router and exposes the OpenAPI document.
//!
//! Product creation is the only gated route: requests pass through the
//! session middleware first and the role gate second, so an unauthenticated
//! caller sees 401 before the role check can 403.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{
        middleware::{authenticate, require_role},
        Role,
    },
    models::{
        AuthResponse, Category, CreateProductRequest, LoginRequest, MeResponse, MessageResponse,
        Product, PublicUser, RegisterRequest, SessionResponse,
    },
    state::AppState,
};

pub mod auth;
pub mod categories;
pub mod health;
pub mod products;

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/categories", get(categories::list_categories))
        .route("/products", get(products::list_products));

    let admin_routes = Router::new()
        .route("/products", post(products::create_product))
        .route_layer(middleware::from_fn(require_role(&[Role::Admin])))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ));

    let api_routes = public_routes.merge(admin_routes).with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        categories::list_categories,
        products::list_products,
        products::create_product
    ),
    components(
        schemas(
            PublicUser,
            Role,
            SessionResponse,
            AuthResponse,
            MeResponse,
            MessageResponse,
            RegisterRequest,
            LoginRequest,
            Product,
            CreateProductRequest,
            Category,
            health::HealthResponse,
            health::HealthChecks
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Auth", description = "Accounts and sessions"),
        (name = "Catalog", description = "Products and categories")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Opaque session token from register or login"))
                    .build(),
            ),
        );
    }
}
