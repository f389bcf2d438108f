use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, StoreResult, TruckRepository};
use crate::models::{NewTruck, Truck, TruckChanges};

pub struct PgTruckRepository {
    pool: PgPool,
}

impl PgTruckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TruckRepository for PgTruckRepository {
    async fn create(&self, truck: NewTruck) -> StoreResult<Truck> {
        let truck = sqlx::query_as::<_, Truck>(
            r#"
            INSERT INTO trucks (number, model, fuel_type, current_status, is_active, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(truck.number)
        .bind(truck.model)
        .bind(truck.fuel_type)
        .bind(truck.current_status)
        .bind(truck.is_active)
        .bind(truck.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(truck)
    }

    async fn find_all(&self) -> StoreResult<Vec<Truck>> {
        let trucks = sqlx::query_as::<_, Truck>(
            "SELECT * FROM trucks ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trucks)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Truck>> {
        let truck = sqlx::query_as::<_, Truck>("SELECT * FROM trucks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(truck)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Truck>> {
        let trucks = sqlx::query_as::<_, Truck>("SELECT * FROM trucks WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(trucks)
    }

    async fn find_by_creator(&self, user_id: i32, limit: i64) -> StoreResult<Vec<Truck>> {
        let trucks = sqlx::query_as::<_, Truck>(
            r#"
            SELECT * FROM trucks
            WHERE created_by = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(trucks)
    }

    async fn count_by_creator(&self, user_id: i32) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trucks WHERE created_by = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn update(&self, id: i32, changes: TruckChanges) -> StoreResult<Truck> {
        sqlx::query_as::<_, Truck>(
            r#"
            UPDATE trucks SET
                number = COALESCE($2, number),
                model = COALESCE($3, model),
                fuel_type = COALESCE($4, fuel_type),
                current_status = COALESCE($5, current_status),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.number)
        .bind(changes.model)
        .bind(changes.fuel_type)
        .bind(changes.current_status)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM trucks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
