use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;

use super::{StoreError, StoreResult, TripExpenseRepository, TripRepository};
use crate::models::{
    NewTrip, NewTripExpense, Trip, TripChanges, TripExpense, TripExpenseChanges, TripLink,
};

pub struct PgTripRepository {
    pool: PgPool,
}

impl PgTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripRepository for PgTripRepository {
    async fn create(&self, trip: NewTrip) -> StoreResult<Trip> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (
                client_id, driver_id, truck_id, start_date, end_date,
                origin_address, destination_address, base_revenue, additional_charges,
                status, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(trip.client_id)
        .bind(trip.driver_id)
        .bind(trip.truck_id)
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(trip.origin_address)
        .bind(trip.destination_address)
        .bind(trip.base_revenue)
        .bind(trip.additional_charges)
        .bind(trip.status)
        .bind(trip.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(trip)
    }

    async fn find_all(&self) -> StoreResult<Vec<Trip>> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Trip>> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    async fn find_linked(
        &self,
        link: TripLink,
        id: i32,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Trip>> {
        // LIMIT NULL means no limit in PostgreSQL.
        let sql = format!(
            "SELECT * FROM trips WHERE {} = $1 ORDER BY start_date DESC, id DESC LIMIT $2",
            link.column()
        );
        let trips = sqlx::query_as::<_, Trip>(&sql)
            .bind(id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(trips)
    }

    async fn count_linked(&self, link: TripLink, id: i32) -> StoreResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM trips WHERE {} = $1", link.column());
        let (count,): (i64,) = sqlx::query_as(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_linked_many(
        &self,
        link: TripLink,
        ids: &[i32],
    ) -> StoreResult<HashMap<i32, i64>> {
        let column = link.column();
        let sql = format!(
            "SELECT {column}, COUNT(*) FROM trips WHERE {column} = ANY($1) GROUP BY {column}"
        );
        let rows: Vec<(i32, i64)> = sqlx::query_as(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().collect())
    }

    async fn update(&self, id: i32, changes: TripChanges) -> StoreResult<Trip> {
        sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips SET
                client_id = COALESCE($2, client_id),
                driver_id = COALESCE($3, driver_id),
                truck_id = COALESCE($4, truck_id),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                origin_address = COALESCE($7, origin_address),
                destination_address = COALESCE($8, destination_address),
                base_revenue = COALESCE($9, base_revenue),
                additional_charges = COALESCE($10, additional_charges),
                status = COALESCE($11, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.client_id)
        .bind(changes.driver_id)
        .bind(changes.truck_id)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(changes.origin_address)
        .bind(changes.destination_address)
        .bind(changes.base_revenue)
        .bind(changes.additional_charges)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

pub struct PgTripExpenseRepository {
    pool: PgPool,
}

impl PgTripExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripExpenseRepository for PgTripExpenseRepository {
    async fn create(&self, expense: NewTripExpense) -> StoreResult<TripExpense> {
        let expense = sqlx::query_as::<_, TripExpense>(
            r#"
            INSERT INTO trip_expenses (
                trip_id, type, amount, description, receipt_number, vendor_name, expense_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(expense.trip_id)
        .bind(expense.expense_type)
        .bind(expense.amount)
        .bind(expense.description)
        .bind(expense.receipt_number)
        .bind(expense.vendor_name)
        .bind(expense.expense_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    async fn find_by_trip(&self, trip_id: i32) -> StoreResult<Vec<TripExpense>> {
        let expenses = sqlx::query_as::<_, TripExpense>(
            "SELECT * FROM trip_expenses WHERE trip_id = $1 ORDER BY expense_date DESC, id DESC",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    async fn count_by_trips(&self, trip_ids: &[i32]) -> StoreResult<HashMap<i32, i64>> {
        let rows: Vec<(i32, i64)> = sqlx::query_as(
            "SELECT trip_id, COUNT(*) FROM trip_expenses WHERE trip_id = ANY($1) GROUP BY trip_id",
        )
        .bind(trip_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    async fn update(
        &self,
        trip_id: i32,
        expense_id: i32,
        changes: TripExpenseChanges,
    ) -> StoreResult<TripExpense> {
        sqlx::query_as::<_, TripExpense>(
            r#"
            UPDATE trip_expenses SET
                type = COALESCE($3, type),
                amount = COALESCE($4, amount),
                description = COALESCE($5, description),
                receipt_number = COALESCE($6, receipt_number),
                vendor_name = COALESCE($7, vendor_name),
                expense_date = COALESCE($8, expense_date),
                updated_at = NOW()
            WHERE id = $1 AND trip_id = $2
            RETURNING *
            "#,
        )
        .bind(expense_id)
        .bind(trip_id)
        .bind(changes.expense_type)
        .bind(changes.amount)
        .bind(changes.description)
        .bind(changes.receipt_number)
        .bind(changes.vendor_name)
        .bind(changes.expense_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, trip_id: i32, expense_id: i32) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM trip_expenses WHERE id = $1 AND trip_id = $2")
            .bind(expense_id)
            .bind(trip_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
