use sqlx::PgPool;

use crate::models::user::UserProfile;

pub async fn find_profile(
    pool: &PgPool,
    id: &str,
) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, name, image, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
