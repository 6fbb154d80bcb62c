use chrono::Utc;

use super::Database;
use crate::models::Notification;

impl Database {
    pub async fn create_notification(&self, message: &str) -> Result<Notification, sqlx::Error> {
        let row = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (message, is_read, created_at)
            VALUES (?, 0, ?)
            RETURNING id, message, is_read, created_at
            "#,
        )
        .bind(message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Most recent first, at most `limit` rows.
    pub async fn recent_notifications(&self, limit: i64) -> Result<Vec<Notification>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, message, is_read, created_at
            FROM notifications
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
