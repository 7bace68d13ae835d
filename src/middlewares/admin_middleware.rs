use axum::{http::Request, middleware::Next, response::Response, extract::State, body::Body};
use axum::http::{header, StatusCode};
use std::sync::Arc;
use tracing::warn;
use crate::util::jwt::IdentityProvider;

pub struct AdminAuthState {
    pub identity: Arc<dyn IdentityProvider>,
}

/// Lets the request through only for a signed-in admin. The resolved
/// [`crate::model::user::CurrentUser`] is attached to the request extensions.
pub async fn admin_auth(
    State(state): State<Arc<AdminAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());

    let Some(user) = state.identity.current_user(auth_header) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    if !user.is_admin() {
        warn!(email = %user.email, "Non-admin user denied access to the dashboard");
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
