use sqlx::PgPool;

use crate::models::user::AuthUser;

/// Resolves a session token to its user, ignoring expired sessions.
/// Read-only; this service never mints or refreshes sessions.
pub async fn find_user_by_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<AuthUser>, sqlx::Error> {
    sqlx::query_as::<_, AuthUser>(
        r#"
        SELECT u.id, u.name
        FROM sessions s
        INNER JOIN users u ON u.id = s.user_id
        WHERE s.token = $1 AND s.expires_at > now()
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}
