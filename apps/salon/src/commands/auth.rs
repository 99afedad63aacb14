//! # Auth Commands

use tracing::debug;

use crate::error::AppError;
use crate::state::Session;
use crate::AppContext;

/// Attempts a login. On success the process-wide session is initialized.
pub async fn login(ctx: &AppContext, username: &str, password: &str) -> Result<Session, AppError> {
    debug!(username, "login command");
    ctx.session.login(username, password)
}

/// Signs out. The session is torn down; gated commands start failing with
/// `AUTH_REQUIRED`.
pub async fn logout(ctx: &AppContext) -> Result<(), AppError> {
    debug!("logout command");
    ctx.session.logout();
    Ok(())
}

/// Returns the active session, if any. Used by the frontend's route guard.
pub async fn current_session(ctx: &AppContext) -> Result<Option<Session>, AppError> {
    Ok(ctx.session.current())
}
