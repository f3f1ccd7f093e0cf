pub mod account;
pub mod health;
pub mod hirer_routes;
pub mod hiring_routes;
pub mod notification_routes;
pub mod talent_routes;

use crate::middleware::auth::require_principal;
use crate::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

/// The full API surface. Shared between `main` and the integration
/// tests so both exercise the same router.
pub fn api_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api/hirers/register", post(hirer_routes::register_hirer))
        .route("/api/hirers/login", post(hirer_routes::login_hirer))
        .route(
            "/api/hirers/forgot-password",
            post(hirer_routes::forgot_hirer_password),
        )
        .route(
            "/api/hirers/reset-password/:token",
            post(hirer_routes::reset_hirer_password),
        )
        .route("/api/talents/register", post(talent_routes::register_talent))
        .route("/api/talents/login", post(talent_routes::login_talent))
        .route(
            "/api/talents/forgot-password",
            post(talent_routes::forgot_talent_password),
        )
        .route(
            "/api/talents/reset-password/:token",
            post(talent_routes::reset_talent_password),
        )
        .route(
            "/api/notifications/global",
            get(notification_routes::global_feed),
        );

    let protected = Router::new()
        .route(
            "/api/hirers/verify-otp",
            post(hirer_routes::verify_hirer_otp),
        )
        .route(
            "/api/hirers/resend-otp",
            post(hirer_routes::resend_hirer_otp),
        )
        .route(
            "/api/hirers/update-profile",
            put(hirer_routes::update_hirer_profile),
        )
        .route(
            "/api/hirers/get-profile",
            get(hirer_routes::get_hirer_profile),
        )
        .route("/api/hirers/submit", post(hirer_routes::create_submission))
        .route(
            "/api/hirers/submissions",
            get(hirer_routes::list_submissions),
        )
        .route(
            "/api/hirers/submissions/:id",
            put(hirer_routes::update_submission).delete(hirer_routes::delete_submission),
        )
        .route(
            "/api/hirers/hirer/:hirer_id/submissions",
            get(hirer_routes::list_hirer_submissions),
        )
        .route(
            "/api/talents/verify-otp",
            post(talent_routes::verify_talent_otp),
        )
        .route(
            "/api/talents/resend-otp",
            post(talent_routes::resend_talent_otp),
        )
        .route(
            "/api/talents/update-profile",
            put(talent_routes::update_talent_profile),
        )
        .route(
            "/api/talents/get-profile",
            get(talent_routes::get_talent_profile),
        )
        .route("/api/talents/all-talents", get(talent_routes::all_talents))
        .route("/api/hiring/send", post(hiring_routes::send_request))
        .route("/api/hiring/talent", get(hiring_routes::talent_requests))
        .route("/api/hiring/hirer", get(hiring_routes::hirer_requests))
        .route("/api/hiring/status", put(hiring_routes::update_status))
        .route(
            "/api/notifications/all",
            post(notification_routes::send_to_all),
        )
        .route(
            "/api/notifications/user",
            post(notification_routes::send_to_user).get(notification_routes::user_feed),
        )
        .layer(from_fn_with_state(state.clone(), require_principal));

    public.merge(protected).with_state(state)
}
