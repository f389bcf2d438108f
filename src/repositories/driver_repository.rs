use async_trait::async_trait;
use sqlx::PgPool;

use super::{DriverRepository, StoreError, StoreResult};
use crate::models::{Driver, DriverChanges, NewDriver};

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn create(&self, driver: NewDriver) -> StoreResult<Driver> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (first_name, last_name, license_number, phone, is_active, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(driver.first_name)
        .bind(driver.last_name)
        .bind(driver.license_number)
        .bind(driver.phone)
        .bind(driver.is_active)
        .bind(driver.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    async fn find_all(&self) -> StoreResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }

    async fn find_by_creator(&self, user_id: i32, limit: i64) -> StoreResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>(
            r#"
            SELECT * FROM drivers
            WHERE created_by = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    async fn count_by_creator(&self, user_id: i32) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM drivers WHERE created_by = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn update(&self, id: i32, changes: DriverChanges) -> StoreResult<Driver> {
        sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                license_number = COALESCE($4, license_number),
                phone = COALESCE($5, phone),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.license_number)
        .bind(changes.phone)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
