use std::sync::Arc;

use adminkit::auth::AuthService;
use adminkit::metrics;
use adminkit::routes::Route;
use adminkit::sim::{ActionKind, PanelId, Simulator};
use adminkit::store::theme::ThemeMode;
use adminkit::store::{
    NotificationsAction, OrdersAction, ProductsAction, ThemeAction, UiAction, UsersAction,
};
use adminkit::table::{Column, TableRow};
use adminkit::types::{NotificationDraft, OrderStatus, ProductStatus, Role, UserStatus};
use adminkit::validation::{LoginForm, SignupForm};
use adminkit::{AdminError, StoreHandle};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, patch, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub store: StoreHandle,
    pub simulator: Arc<Simulator>,
    pub auth: Arc<AuthService>,
}

pub struct ApiError(AdminError);

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AdminError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AdminError::ImportError(_) => StatusCode::BAD_REQUEST,
            AdminError::NotFound(_) => StatusCode::NOT_FOUND,
            AdminError::SimulationError(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = match &self.0 {
            AdminError::ValidationError(errors) => json!({
                "error": self.0.to_string(),
                "fields": errors.0,
            }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/metrics", get(handle_metrics))
        .route("/api/store", get(handle_store))
        .route("/api/routes", get(handle_routes))
        // auth
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/signup", post(handle_signup))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/auth/session", get(handle_session))
        .route("/api/auth/profile", patch(handle_update_profile))
        // commerce
        .route("/api/users", get(handle_users))
        .route("/api/users/fetch", post(handle_fetch_users))
        .route("/api/users/:id/status", patch(handle_user_status))
        .route("/api/users/:id/role", patch(handle_user_role))
        .route("/api/products", get(handle_products))
        .route("/api/products/fetch", post(handle_fetch_products))
        .route("/api/products/low-stock", get(handle_low_stock))
        .route("/api/products/:id/stock", patch(handle_product_stock))
        .route("/api/products/:id/status", patch(handle_product_status))
        .route("/api/orders", get(handle_orders))
        .route("/api/orders/fetch", post(handle_fetch_orders))
        .route("/api/orders/:id/status", patch(handle_order_status))
        .route("/api/analytics", get(handle_analytics))
        .route("/api/analytics/fetch", post(handle_fetch_analytics))
        .route("/api/tables/:entity", get(handle_table))
        // notifications
        .route(
            "/api/notifications",
            get(handle_notifications)
                .post(handle_add_notification)
                .delete(handle_clear_notifications),
        )
        .route("/api/notifications/read-all", post(handle_read_all))
        .route("/api/notifications/:id/read", post(handle_mark_read))
        .route("/api/notifications/:id", delete(handle_remove_notification))
        // theme
        .route("/api/theme", get(handle_theme))
        .route("/api/theme/mode", put(handle_theme_mode))
        .route("/api/theme/toggle", post(handle_theme_toggle))
        .route("/api/theme/colors", put(handle_theme_color))
        .route(
            "/api/theme/modules/:module",
            put(handle_module_color).delete(handle_reset_module),
        )
        .route("/api/theme/modules/:module/:key", get(handle_resolve_color))
        .route("/api/theme/reset", post(handle_theme_reset))
        .route("/api/theme/css", get(handle_theme_css))
        .route("/api/theme/export", get(handle_theme_export))
        .route("/api/theme/import", post(handle_theme_import))
        .route("/api/theme/import-file", post(handle_theme_import_file))
        // ui
        .route("/api/ui", get(handle_ui))
        .route("/api/ui/navigate", post(handle_navigate))
        .route("/api/ui/sidebar/toggle", post(handle_toggle_sidebar))
        .route("/api/ui/modal", post(handle_open_modal).delete(handle_close_modal))
        // simulated panels
        .route("/api/panels", get(handle_panels))
        .route("/api/panels/:id", get(handle_panel))
        .route("/api/panels/:id/mount", post(handle_mount))
        .route("/api/panels/:id/unmount", post(handle_unmount))
        .route("/api/panels/:id/actions/:action", post(handle_trigger))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "admin-api",
        "mounted_panels": state.simulator.mounted(),
        "timestamp": chrono::Utc::now(),
    }))
}

async fn handle_metrics() -> ApiResult<impl IntoResponse> {
    let body = metrics::gather_text()?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}

async fn handle_store(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.snapshot().await)
}

async fn handle_routes() -> impl IntoResponse {
    let routes: Vec<_> = Route::all()
        .into_iter()
        .map(|r| json!({ "path": r.path(), "title": r.title() }))
        .collect();
    Json(routes)
}

// ---- auth ----

async fn handle_login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> ApiResult<impl IntoResponse> {
    let session = state.store.login(&state.auth, &form).await?;
    Ok(Json(session))
}

async fn handle_signup(
    State(state): State<AppState>,
    Json(form): Json<SignupForm>,
) -> ApiResult<impl IntoResponse> {
    let session = state.store.signup(&state.auth, &form).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

async fn handle_logout(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.store.logout(&state.auth).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_session(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.snapshot().await.auth)
}

#[derive(Deserialize)]
struct ProfileUpdate {
    name: String,
    email: String,
}

async fn handle_update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<impl IntoResponse> {
    if !state.store.read(|s| s.auth.is_authenticated).await {
        return Err(AdminError::NotFound("active session".into()).into());
    }
    state
        .store
        .dispatch(adminkit::store::AuthAction::UpdateProfile {
            name: update.name,
            email: update.email,
        })
        .await;
    Ok(Json(state.store.snapshot().await.auth))
}

// ---- commerce ----

async fn handle_users(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.snapshot().await.users)
}

async fn handle_fetch_users(State(state): State<AppState>) -> impl IntoResponse {
    state.store.fetch_users().await;
    Json(state.store.snapshot().await.users)
}

#[derive(Deserialize)]
struct UserStatusBody {
    status: UserStatus,
}

async fn handle_user_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UserStatusBody>,
) -> ApiResult<impl IntoResponse> {
    require(state.store.read(|s| s.users.get(&id).is_some()).await, "user", &id)?;
    state
        .store
        .dispatch(UsersAction::UpdateStatus {
            id: id.clone(),
            status: body.status,
        })
        .await;
    Ok(Json(state.store.read(|s| s.users.get(&id).cloned()).await))
}

#[derive(Deserialize)]
struct UserRoleBody {
    role: Role,
}

async fn handle_user_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UserRoleBody>,
) -> ApiResult<impl IntoResponse> {
    require(state.store.read(|s| s.users.get(&id).is_some()).await, "user", &id)?;
    state
        .store
        .dispatch(UsersAction::UpdateRole {
            id: id.clone(),
            role: body.role,
        })
        .await;
    Ok(Json(state.store.read(|s| s.users.get(&id).cloned()).await))
}

async fn handle_products(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.snapshot().await.products)
}

async fn handle_fetch_products(State(state): State<AppState>) -> impl IntoResponse {
    state.store.fetch_products().await;
    Json(state.store.snapshot().await.products)
}

#[derive(Deserialize)]
struct LowStockQuery {
    #[serde(default = "default_low_stock_threshold")]
    threshold: u32,
}

fn default_low_stock_threshold() -> u32 {
    10
}

async fn handle_low_stock(
    State(state): State<AppState>,
    Query(query): Query<LowStockQuery>,
) -> impl IntoResponse {
    let products = state
        .store
        .read(|s| s.products.low_stock(query.threshold).cloned().collect::<Vec<_>>())
        .await;
    Json(products)
}

#[derive(Deserialize)]
struct StockBody {
    stock: u32,
}

async fn handle_product_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StockBody>,
) -> ApiResult<impl IntoResponse> {
    require(state.store.read(|s| s.products.get(&id).is_some()).await, "product", &id)?;
    state
        .store
        .dispatch(ProductsAction::UpdateStock {
            id: id.clone(),
            stock: body.stock,
        })
        .await;
    Ok(Json(state.store.read(|s| s.products.get(&id).cloned()).await))
}

#[derive(Deserialize)]
struct ProductStatusBody {
    status: ProductStatus,
}

async fn handle_product_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ProductStatusBody>,
) -> ApiResult<impl IntoResponse> {
    require(state.store.read(|s| s.products.get(&id).is_some()).await, "product", &id)?;
    state
        .store
        .dispatch(ProductsAction::UpdateStatus {
            id: id.clone(),
            status: body.status,
        })
        .await;
    Ok(Json(state.store.read(|s| s.products.get(&id).cloned()).await))
}

async fn handle_orders(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.snapshot().await.orders)
}

async fn handle_fetch_orders(State(state): State<AppState>) -> impl IntoResponse {
    state.store.fetch_orders().await;
    Json(state.store.snapshot().await.orders)
}

#[derive(Deserialize)]
struct OrderStatusBody {
    status: OrderStatus,
}

async fn handle_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<OrderStatusBody>,
) -> ApiResult<impl IntoResponse> {
    let current = state
        .store
        .read(|s| s.orders.get(&id).map(|o| o.status))
        .await
        .ok_or_else(|| AdminError::NotFound(format!("order `{}`", id)))?;

    if current != body.status && !current.is_adjacent(body.status) {
        warn!("Order {} jumps from {} to {}", id, current, body.status);
    }
    state
        .store
        .dispatch(OrdersAction::UpdateStatus {
            id: id.clone(),
            status: body.status,
        })
        .await;
    Ok(Json(state.store.read(|s| s.orders.get(&id).cloned()).await))
}

async fn handle_analytics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.snapshot().await.analytics)
}

async fn handle_fetch_analytics(State(state): State<AppState>) -> impl IntoResponse {
    state.store.fetch_analytics().await;
    Json(state.store.snapshot().await.analytics)
}

/// Rendered table for `users`, `products` or `orders`.
async fn handle_table(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let store = state.store.snapshot().await;
    let rows: Vec<TableRow<'_>> = match entity.as_str() {
        "users" => store.users.users.iter().map(TableRow::User).collect(),
        "products" => store.products.products.iter().map(TableRow::Product).collect(),
        "orders" => store.orders.orders.iter().map(TableRow::Order).collect(),
        other => return Err(AdminError::NotFound(format!("table `{}`", other)).into()),
    };

    let headers: Vec<&str> = rows
        .first()
        .map(|row| row.columns().into_iter().map(Column::header).collect())
        .unwrap_or_default();
    let body: Vec<_> = rows
        .iter()
        .map(|row| json!({ "id": row.id(), "cells": row.cells() }))
        .collect();

    Ok(Json(json!({ "headers": headers, "rows": body })))
}

// ---- notifications ----

async fn handle_notifications(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.snapshot().await.notifications)
}

async fn handle_add_notification(
    State(state): State<AppState>,
    Json(draft): Json<NotificationDraft>,
) -> impl IntoResponse {
    let id = state.store.notify(draft).await;
    (StatusCode::CREATED, Json(json!({ "id": id })))
}

async fn handle_mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    state.store.dispatch(NotificationsAction::MarkAsRead(id)).await;
    Json(state.store.snapshot().await.notifications)
}

async fn handle_read_all(State(state): State<AppState>) -> impl IntoResponse {
    state.store.dispatch(NotificationsAction::MarkAllAsRead).await;
    Json(state.store.snapshot().await.notifications)
}

async fn handle_remove_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    state.store.dispatch(NotificationsAction::Remove(id)).await;
    StatusCode::NO_CONTENT
}

async fn handle_clear_notifications(State(state): State<AppState>) -> impl IntoResponse {
    state.store.dispatch(NotificationsAction::ClearAll).await;
    StatusCode::NO_CONTENT
}

// ---- theme ----

async fn handle_theme(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.snapshot().await.theme)
}

#[derive(Deserialize)]
struct ModeBody {
    mode: ThemeMode,
}

async fn handle_theme_mode(
    State(state): State<AppState>,
    Json(body): Json<ModeBody>,
) -> impl IntoResponse {
    state.store.dispatch(ThemeAction::SetMode(body.mode)).await;
    Json(state.store.snapshot().await.theme)
}

async fn handle_theme_toggle(State(state): State<AppState>) -> impl IntoResponse {
    state.store.dispatch(ThemeAction::ToggleMode).await;
    Json(state.store.snapshot().await.theme)
}

#[derive(Deserialize)]
struct ColorBody {
    key: String,
    value: String,
}

async fn handle_theme_color(
    State(state): State<AppState>,
    Json(body): Json<ColorBody>,
) -> impl IntoResponse {
    state
        .store
        .dispatch(ThemeAction::SetColor {
            key: body.key,
            value: body.value,
        })
        .await;
    Json(state.store.snapshot().await.theme)
}

async fn handle_module_color(
    State(state): State<AppState>,
    Path(module): Path<String>,
    Json(body): Json<ColorBody>,
) -> impl IntoResponse {
    state
        .store
        .dispatch(ThemeAction::SetModuleColor {
            module,
            key: body.key,
            value: body.value,
        })
        .await;
    Json(state.store.snapshot().await.theme)
}

async fn handle_reset_module(
    State(state): State<AppState>,
    Path(module): Path<String>,
) -> impl IntoResponse {
    state.store.dispatch(ThemeAction::ResetModule(module)).await;
    Json(state.store.snapshot().await.theme)
}

async fn handle_resolve_color(
    State(state): State<AppState>,
    Path((module, key)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let value = state
        .store
        .read(|s| s.theme.resolve(&module, &key).map(str::to_string))
        .await
        .ok_or_else(|| AdminError::NotFound(format!("colour `{}`", key)))?;
    Ok(Json(json!({ "module": module, "key": key, "value": value })))
}

async fn handle_theme_reset(State(state): State<AppState>) -> impl IntoResponse {
    state.store.dispatch(ThemeAction::Reset).await;
    Json(state.store.snapshot().await.theme)
}

async fn handle_theme_css(State(state): State<AppState>) -> impl IntoResponse {
    let css = state
        .store
        .read(|s| {
            s.theme
                .css_variables()
                .into_iter()
                .map(|(name, value)| format!("  {}: {};", name, value))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .await;
    ([(header::CONTENT_TYPE, "text/css")], format!(":root {{\n{}\n}}\n", css))
}

async fn handle_theme_export(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let json = state.store.export_theme().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"theme.json\""),
        ],
        json,
    ))
}

/// Takes the raw exported document as the request body.
async fn handle_theme_import(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<impl IntoResponse> {
    state.store.import_theme_json(&body).await?;
    Ok(Json(state.store.snapshot().await.theme))
}

#[derive(Deserialize)]
struct ImportFileBody {
    path: String,
}

/// Imports a theme document from a path on the server's filesystem.
async fn handle_theme_import_file(
    State(state): State<AppState>,
    Json(body): Json<ImportFileBody>,
) -> ApiResult<impl IntoResponse> {
    state.store.import_theme_file(&body.path).await?;
    Ok(Json(state.store.snapshot().await.theme))
}

// ---- ui ----

async fn handle_ui(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.snapshot().await.ui)
}

#[derive(Deserialize)]
struct NavigateBody {
    path: String,
}

async fn handle_navigate(
    State(state): State<AppState>,
    Json(body): Json<NavigateBody>,
) -> ApiResult<impl IntoResponse> {
    let route = Route::from_path(&body.path)?;
    state.store.dispatch(UiAction::Navigate(route)).await;
    Ok(Json(state.store.snapshot().await.ui))
}

async fn handle_toggle_sidebar(State(state): State<AppState>) -> impl IntoResponse {
    state.store.dispatch(UiAction::ToggleSidebar).await;
    Json(state.store.snapshot().await.ui)
}

#[derive(Deserialize)]
struct ModalBody {
    name: String,
}

async fn handle_open_modal(
    State(state): State<AppState>,
    Json(body): Json<ModalBody>,
) -> impl IntoResponse {
    state.store.dispatch(UiAction::OpenModal(body.name)).await;
    Json(state.store.snapshot().await.ui)
}

async fn handle_close_modal(State(state): State<AppState>) -> impl IntoResponse {
    state.store.dispatch(UiAction::CloseModal).await;
    Json(state.store.snapshot().await.ui)
}

// ---- panels ----

async fn handle_panels(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.simulator.snapshot_all())
}

async fn handle_panel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id: PanelId = id.parse()?;
    Ok(Json(state.simulator.snapshot(id)))
}

async fn handle_mount(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id: PanelId = id.parse()?;
    Ok(Json(state.simulator.mount(id)))
}

async fn handle_unmount(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id: PanelId = id.parse()?;
    let was_mounted = state.simulator.unmount(id);
    Ok(Json(json!({ "panel": id, "unmounted": was_mounted })))
}

async fn handle_trigger(
    State(state): State<AppState>,
    Path((id, action)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let id: PanelId = id.parse()?;
    let kind: ActionKind = action.parse()?;
    let run_id = state.simulator.trigger(id, kind)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "panel": id, "action": kind, "run": run_id })),
    ))
}

fn require(found: bool, what: &str, id: &str) -> Result<(), ApiError> {
    if found {
        Ok(())
    } else {
        Err(AdminError::NotFound(format!("{} `{}`", what, id)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminkit::config::{SimulationConfig, StoreConfig};
    use adminkit::storage::MemoryStorage;
    use adminkit::Store;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn state() -> AppState {
        let store = StoreHandle::new(Store::seeded(), StoreConfig::immediate());
        AppState {
            simulator: Arc::new(Simulator::new(store.clone(), SimulationConfig::default())),
            auth: Arc::new(AuthService::new(Arc::new(MemoryStorage::new()))),
            store,
        }
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = router(state());
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn shipping_order_two() {
        let state = state();
        let app = router(state.clone());
        let (status, body) = send(
            &app,
            "PATCH",
            "/api/orders/2/status",
            Some(json!({ "status": "shipped" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "shipped");

        let orders = state.store.snapshot().await.orders;
        assert_eq!(orders.count_by_status(OrderStatus::Shipped), 2);
        assert_eq!(orders.get("3").map(|o| o.status), Some(OrderStatus::Pending));
    }

    #[tokio::test]
    async fn unknown_order_is_404() {
        let app = router(state());
        let (status, _) = send(
            &app,
            "PATCH",
            "/api/orders/99/status",
            Some(json!({ "status": "shipped" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_login_lists_field_errors() {
        let app = router(state());
        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "bad", "password": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn login_then_session() {
        let app = router(state());
        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "admin@example.com", "password": "admin" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().unwrap().starts_with("mock-token-"));

        let (_, session) = send(&app, "GET", "/api/auth/session", None).await;
        assert_eq!(session["is_authenticated"], true);
    }

    #[tokio::test]
    async fn notifications_lifecycle() {
        let app = router(state());
        let (status, created) = send(
            &app,
            "POST",
            "/api/notifications",
            Some(json!({ "title": "Hello", "message": "World", "type": "info" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (_, list) = send(&app, "GET", "/api/notifications", None).await;
        assert_eq!(list["unread_count"], 1);

        let (_, list) = send(&app, "POST", &format!("/api/notifications/{}/read", id), None).await;
        assert_eq!(list["unread_count"], 0);
        assert_eq!(list["notifications"][0]["read"], true);
    }

    #[tokio::test]
    async fn bad_theme_import_is_400_with_one_notification() {
        let state = state();
        let app = router(state.clone());
        let request = Request::builder()
            .method("POST")
            .uri("/api/theme/import")
            .body(Body::from("definitely not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.store.snapshot().await.notifications.unread_count, 1);
    }

    #[tokio::test]
    async fn theme_import_from_missing_file_is_400() {
        let state = state();
        let app = router(state.clone());
        let (status, _) = send(
            &app,
            "POST",
            "/api/theme/import-file",
            Some(json!({ "path": "/definitely/not/here/theme.json" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.store.snapshot().await.notifications.unread_count, 1);
    }

    #[tokio::test]
    async fn module_override_resolves_until_reset() {
        let app = router(state());
        let (_, base) = send(&app, "GET", "/api/theme/modules/blockchain/accent", None).await;
        let base_accent = base["value"].clone();

        let (status, _) = send(
            &app,
            "PUT",
            "/api/theme/modules/blockchain",
            Some(json!({ "key": "accent", "value": "#f7931a" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (_, resolved) = send(&app, "GET", "/api/theme/modules/blockchain/accent", None).await;
        assert_eq!(resolved["value"], "#f7931a");

        let (status, theme) = send(&app, "DELETE", "/api/theme/modules/blockchain", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(theme["module_colors"].get("blockchain").is_none());
        let (_, resolved) = send(&app, "GET", "/api/theme/modules/blockchain/accent", None).await;
        assert_eq!(resolved["value"], base_accent);

        let (status, _) = send(&app, "GET", "/api/theme/modules/blockchain/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn panel_lifecycle_over_http() {
        let app = router(state());
        let (status, snap) = send(&app, "POST", "/api/panels/blockchain/mount", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snap["mounted"], true);

        let (status, _) = send(
            &app,
            "POST",
            "/api/panels/blockchain/actions/execute-contract",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);

        let (status, _) = send(
            &app,
            "POST",
            "/api/panels/blockchain/actions/render-video",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, body) = send(&app, "POST", "/api/panels/blockchain/unmount", None).await;
        assert_eq!(body["unmounted"], true);

        let (status, _) = send(&app, "GET", "/api/panels/warp-drive", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn low_stock_uses_threshold() {
        let app = router(state());
        let (_, body) = send(&app, "GET", "/api/products/low-stock", None).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let (_, body) = send(&app, "GET", "/api/products/low-stock?threshold=30", None).await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn orders_table_renders_cells() {
        let app = router(state());
        let (status, body) = send(&app, "GET", "/api/tables/orders", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["headers"][0], "Order");
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn navigate_rejects_unknown_routes() {
        let app = router(state());
        let (status, body) = send(
            &app,
            "POST",
            "/api/ui/navigate",
            Some(json!({ "path": "/admin/system-monitor" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["active_route"], "/admin/system-monitor");

        let (status, _) = send(
            &app,
            "POST",
            "/api/ui/navigate",
            Some(json!({ "path": "/admin/nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
