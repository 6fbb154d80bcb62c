use chrono::Utc;

use super::Database;
use crate::models::{Incident, IncidentInput};

const SELECT_INCIDENT: &str = r#"
    SELECT i.id, i.date, i.last_maintenance_date, i.pressure, i.temperature,
           i.failure, i.risk, i.actions, i.reported_by,
           u.username AS reported_by_username,
           i.created_at, i.updated_at
    FROM incidents i
    LEFT JOIN users u ON u.id = i.reported_by
"#;

impl Database {
    /// Inserts every input in order inside one transaction; either all rows
    /// land or none do. Returns the number of rows inserted.
    pub async fn insert_incidents(
        &self,
        inputs: &[IncidentInput],
        reported_by: Option<i64>,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();
        let mut inserted = 0;

        for input in inputs {
            sqlx::query(
                r#"
                INSERT INTO incidents (date, last_maintenance_date, pressure, temperature,
                                       failure, risk, actions, reported_by, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(input.date)
            .bind(input.last_maintenance_date)
            .bind(input.pressure)
            .bind(input.temperature)
            .bind(&input.failure)
            .bind(&input.risk)
            .bind(&input.actions)
            .bind(reported_by)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }

        tx.commit().await?;
        tracing::debug!(inserted, "incident batch committed");
        Ok(inserted)
    }

    pub async fn get_incident(&self, id: i64) -> Result<Option<Incident>, sqlx::Error> {
        let sql = format!("{} WHERE i.id = ?", SELECT_INCIDENT);
        let row = sqlx::query_as::<_, Incident>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Every incident, newest date first.
    pub async fn list_incidents(&self) -> Result<Vec<Incident>, sqlx::Error> {
        let sql = format!("{} ORDER BY i.date DESC, i.id DESC", SELECT_INCIDENT);
        let rows = sqlx::query_as::<_, Incident>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn count_incidents(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM incidents")
            .fetch_one(&self.pool)
            .await
    }

    /// Returns `false` when no such incident exists.
    pub async fn update_incident(&self, id: i64, input: &IncidentInput) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE incidents
            SET date = ?, last_maintenance_date = ?, pressure = ?, temperature = ?,
                failure = ?, risk = ?, actions = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(input.date)
        .bind(input.last_maintenance_date)
        .bind(input.pressure)
        .bind(input.temperature)
        .bind(&input.failure)
        .bind(&input.risk)
        .bind(&input.actions)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no such incident exists.
    pub async fn delete_incident(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM incidents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
