//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AuthService, BookingService, ChecklistService, MaintenanceService};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::auth::handlers as auth_handlers;
use crate::interfaces::http::modules::auth::handlers::AuthAppState;
use crate::interfaces::http::modules::bookings::handlers as booking_handlers;
use crate::interfaces::http::modules::bookings::handlers::BookingAppState;
use crate::interfaces::http::modules::checklists::handlers as checklist_handlers;
use crate::interfaces::http::modules::checklists::handlers::ChecklistAppState;
use crate::interfaces::http::modules::dashboard::handlers as dashboard_handlers;
use crate::interfaces::http::modules::dashboard::handlers::DashboardAppState;
use crate::interfaces::http::modules::health::handlers as health_handlers;
use crate::interfaces::http::modules::maintenance::handlers as maintenance_handlers;
use crate::interfaces::http::modules::maintenance::handlers::MaintenanceAppState;
use crate::interfaces::http::modules::metrics::handlers as metrics_handlers;
use crate::interfaces::http::modules::metrics::handlers::MetricsState;
use crate::interfaces::http::modules::users::handlers as user_handlers;
use crate::interfaces::http::modules::users::handlers::UserAppState;

/// Unified state for all routes. Axum extracts each handler's own state via
/// `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub booking_service: Arc<BookingService>,
    pub auth_service: Arc<AuthService>,
    pub checklist_service: Arc<ChecklistService>,
    pub maintenance_service: Arc<MaintenanceService>,
    pub auth: AuthState,
    pub metrics: MetricsState,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for AuthAppState {
    fn from_ref(s: &ApiState) -> Self {
        AuthAppState {
            auth_service: Arc::clone(&s.auth_service),
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<ApiState> for BookingAppState {
    fn from_ref(s: &ApiState) -> Self {
        BookingAppState {
            booking_service: Arc::clone(&s.booking_service),
        }
    }
}

impl FromRef<ApiState> for ChecklistAppState {
    fn from_ref(s: &ApiState) -> Self {
        ChecklistAppState {
            checklist_service: Arc::clone(&s.checklist_service),
        }
    }
}

impl FromRef<ApiState> for MaintenanceAppState {
    fn from_ref(s: &ApiState) -> Self {
        MaintenanceAppState {
            maintenance_service: Arc::clone(&s.maintenance_service),
        }
    }
}

impl FromRef<ApiState> for UserAppState {
    fn from_ref(s: &ApiState) -> Self {
        UserAppState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<ApiState> for DashboardAppState {
    fn from_ref(s: &ApiState) -> Self {
        DashboardAppState {
            booking_service: Arc::clone(&s.booking_service),
            checklist_service: Arc::clone(&s.checklist_service),
            maintenance_service: Arc::clone(&s.maintenance_service),
        }
    }
}

impl FromRef<ApiState> for AuthState {
    fn from_ref(s: &ApiState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<ApiState> for MetricsState {
    fn from_ref(s: &ApiState) -> Self {
        s.metrics.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health_handlers::health_check,
        // Metrics
        metrics_handlers::get_metrics,
        // Auth
        auth_handlers::login,
        auth_handlers::logout,
        auth_handlers::verify_session,
        auth_handlers::refresh_token,
        // Users
        user_handlers::list_users,
        user_handlers::get_me,
        user_handlers::update_me,
        // Bookings
        booking_handlers::create_booking,
        booking_handlers::list_bookings,
        booking_handlers::get_booking,
        booking_handlers::update_booking_dates,
        booking_handlers::cancel_booking,
        // Checklists
        checklist_handlers::create_checklist,
        checklist_handlers::list_checklists,
        checklist_handlers::get_checklist,
        checklist_handlers::add_entry,
        checklist_handlers::submit_checklist,
        // Maintenance
        maintenance_handlers::report_issue,
        maintenance_handlers::list_issues,
        maintenance_handlers::get_issue,
        maintenance_handlers::assign_issue,
        maintenance_handlers::complete_issue,
        maintenance_handlers::reopen_issue,
        // Dashboard
        dashboard_handlers::get_summary,
    ),
    components(schemas(
        crate::interfaces::http::modules::auth::dto::LoginRequest,
        crate::interfaces::http::modules::auth::dto::DeviceInfoDto,
        crate::interfaces::http::modules::auth::dto::LoginResponse,
        crate::interfaces::http::modules::auth::dto::VerifySessionResponse,
        crate::interfaces::http::modules::auth::dto::RefreshResponse,
        crate::interfaces::http::modules::users::dto::UserDto,
        crate::interfaces::http::modules::users::dto::DeviceDto,
        crate::interfaces::http::modules::users::dto::UpdateProfileRequest,
        crate::interfaces::http::modules::bookings::dto::CreateBookingRequest,
        crate::interfaces::http::modules::bookings::dto::UpdateBookingDatesRequest,
        crate::interfaces::http::modules::bookings::dto::BookingDto,
        crate::interfaces::http::modules::checklists::dto::CreateChecklistRequest,
        crate::interfaces::http::modules::checklists::dto::AddEntryRequest,
        crate::interfaces::http::modules::checklists::dto::ChecklistEntryDto,
        crate::interfaces::http::modules::checklists::dto::ChecklistDto,
        crate::interfaces::http::modules::maintenance::dto::CreateMaintenanceRequest,
        crate::interfaces::http::modules::maintenance::dto::AssignRequest,
        crate::interfaces::http::modules::maintenance::dto::CompleteRequest,
        crate::interfaces::http::modules::maintenance::dto::ReopenRequest,
        crate::interfaces::http::modules::maintenance::dto::MaintenanceDto,
        crate::interfaces::http::modules::dashboard::handlers::DashboardSummary,
        crate::interfaces::http::modules::health::handlers::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login, sessions, device binding"),
        (name = "Users", description = "Family members"),
        (name = "Bookings", description = "House calendar"),
        (name = "Checklists", description = "Exit checklists"),
        (name = "Maintenance", description = "Maintenance requests"),
        (name = "Dashboard", description = "Home-screen summary"),
        (name = "Health", description = "Service health"),
        (name = "Monitoring", description = "Metrics"),
    )
)]
struct ApiDoc;

/// Build the full API router.
pub fn create_api_router(state: ApiState) -> Router {
    let auth_state = state.auth.clone();

    // Routes reachable without a session
    let public = Router::new()
        .route("/health", get(health_handlers::health_check))
        .route("/metrics", get(metrics_handlers::get_metrics))
        .route("/api/v1/auth/login", post(auth_handlers::login));

    // Everything else requires a bearer session token
    let protected = Router::new()
        .route("/api/v1/auth/logout", post(auth_handlers::logout))
        .route("/api/v1/auth/verify", get(auth_handlers::verify_session))
        .route("/api/v1/auth/refresh", post(auth_handlers::refresh_token))
        .route("/api/v1/users", get(user_handlers::list_users))
        .route(
            "/api/v1/users/me",
            get(user_handlers::get_me).put(user_handlers::update_me),
        )
        .route(
            "/api/v1/bookings",
            get(booking_handlers::list_bookings).post(booking_handlers::create_booking),
        )
        .route(
            "/api/v1/bookings/{booking_id}",
            get(booking_handlers::get_booking).delete(booking_handlers::cancel_booking),
        )
        .route(
            "/api/v1/bookings/{booking_id}/dates",
            put(booking_handlers::update_booking_dates),
        )
        .route(
            "/api/v1/checklists",
            get(checklist_handlers::list_checklists).post(checklist_handlers::create_checklist),
        )
        .route(
            "/api/v1/checklists/{checklist_id}",
            get(checklist_handlers::get_checklist),
        )
        .route(
            "/api/v1/checklists/{checklist_id}/entries",
            post(checklist_handlers::add_entry),
        )
        .route(
            "/api/v1/checklists/{checklist_id}/submit",
            post(checklist_handlers::submit_checklist),
        )
        .route(
            "/api/v1/maintenance",
            get(maintenance_handlers::list_issues).post(maintenance_handlers::report_issue),
        )
        .route(
            "/api/v1/maintenance/{request_id}",
            get(maintenance_handlers::get_issue),
        )
        .route(
            "/api/v1/maintenance/{request_id}/assign",
            post(maintenance_handlers::assign_issue),
        )
        .route(
            "/api/v1/maintenance/{request_id}/complete",
            post(maintenance_handlers::complete_issue),
        )
        .route(
            "/api/v1/maintenance/{request_id}/reopen",
            post(maintenance_handlers::reopen_issue),
        )
        .route(
            "/api/v1/dashboard/summary",
            get(dashboard_handlers::get_summary),
        )
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
