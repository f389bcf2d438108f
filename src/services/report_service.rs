//! Driver, truck, client and trip reports
//!
//! `ReportService` loads the rows; the free functions below do the
//! arithmetic and never touch the store. All money math is in `Decimal`.
//! Averages and margins are rounded half away from zero to two places, and
//! a zero denominator yields 0.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use crate::dto::report_dto::{
    AssociatedEntities, ClientReport, ClientReportProfile, DriverReport, DriverReportProfile,
    ExpenseBreakdown, FinancialSummary, PerformanceMetrics, ProfitAnalysis, RevenueBreakdown,
    StatusBreakdown, TripFinancialReport, TripInfo, TruckReport, TruckReportProfile,
};
use crate::models::{Trip, TripExpense, TripLink, TripStatus};
use crate::state::AppState;
use crate::utils::errors::not_found_error;
use crate::utils::AppResult;

const MILLIS_PER_DAY: i64 = 86_400_000;

pub struct ReportService<'a> {
    state: &'a AppState,
}

impl<'a> ReportService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn driver_report(&self, id: i32) -> AppResult<DriverReport> {
        let repositories = &self.state.repositories;
        let driver = repositories
            .drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))?;
        let creator = repositories.users.find_by_id(driver.created_by).await?;
        let trips = repositories.trips.find_linked(TripLink::Driver, id, None).await?;

        Ok(DriverReport {
            driver: DriverReportProfile::new(&driver, creator.as_ref()),
            performance_metrics: performance_metrics(&trips, false),
            trip_status_breakdown: status_breakdown(&trips),
        })
    }

    pub async fn truck_report(&self, id: i32) -> AppResult<TruckReport> {
        let repositories = &self.state.repositories;
        let truck = repositories
            .trucks
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Truck", id))?;
        let creator = repositories.users.find_by_id(truck.created_by).await?;
        let trips = repositories.trips.find_linked(TripLink::Truck, id, None).await?;

        Ok(TruckReport {
            truck: TruckReportProfile::new(&truck, creator.as_ref()),
            performance_metrics: performance_metrics(&trips, true),
            trip_status_breakdown: status_breakdown(&trips),
        })
    }

    pub async fn client_report(&self, id: i32) -> AppResult<ClientReport> {
        let repositories = &self.state.repositories;
        let client = repositories
            .clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Client", id))?;
        let creator = repositories.users.find_by_id(client.created_by).await?;
        let trips = repositories.trips.find_linked(TripLink::Client, id, None).await?;

        Ok(ClientReport {
            client: ClientReportProfile::new(&client, creator.as_ref()),
            performance_metrics: performance_metrics(&trips, false),
            trip_status_breakdown: status_breakdown(&trips),
        })
    }

    /// Revenue, expenses and profit for a single trip.
    pub async fn trip_report(&self, id: i32) -> AppResult<TripFinancialReport> {
        let repositories = &self.state.repositories;
        let trip = repositories
            .trips
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trip", id))?;

        let client = repositories.clients.find_by_id(trip.client_id).await?;
        let driver = match trip.driver_id {
            Some(driver_id) => repositories.drivers.find_by_id(driver_id).await?,
            None => None,
        };
        let truck = match trip.truck_id {
            Some(truck_id) => repositories.trucks.find_by_id(truck_id).await?,
            None => None,
        };
        let creator = repositories.users.find_by_id(trip.created_by).await?;
        let expenses = repositories.expenses.find_by_trip(id).await?;

        let financials = trip_financials(&trip, &expenses);

        Ok(TripFinancialReport {
            trip_info: TripInfo::new(
                &trip,
                duration_days(trip.start_date, trip.end_date),
                creator.as_ref(),
            ),
            associated_entities: AssociatedEntities {
                client: client.as_ref().map(Into::into),
                driver: driver.as_ref().map(Into::into),
                truck: truck.as_ref().map(Into::into),
            },
            revenue_breakdown: financials.revenue,
            expense_breakdown: financials.expenses,
            profit_analysis: financials.profit,
            summary: financials.summary,
        })
    }
}

pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `total / count` rounded to cents, 0 for an empty set.
pub fn average(total: Decimal, count: i64) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    round2(total / Decimal::from(count))
}

pub fn performance_metrics(trips: &[Trip], with_completed: bool) -> PerformanceMetrics {
    let total_trips = trips.len() as i64;
    let total_revenue: Decimal = trips.iter().map(Trip::total_revenue).sum();

    PerformanceMetrics {
        total_trips,
        completed_trips: with_completed.then(|| {
            trips
                .iter()
                .filter(|trip| trip.status == TripStatus::Completed)
                .count() as i64
        }),
        total_revenue,
        average_revenue_per_trip: average(total_revenue, total_trips),
    }
}

pub fn status_breakdown(trips: &[Trip]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::new();
    for trip in trips {
        *breakdown.entry(trip.status.as_str().to_string()).or_insert(0) += 1;
    }
    breakdown
}

/// Whole days between start and end, rounded up. `None` while the trip is open.
pub fn duration_days(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Option<i64> {
    let end = end?;
    let millis = (end - start).num_milliseconds().abs();
    Some((millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY)
}

/// `profit / revenue * 100` to two places; 0 unless revenue is positive.
pub fn profit_margin(profit: Decimal, revenue: Decimal) -> Decimal {
    if revenue <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round2(profit / revenue * Decimal::ONE_HUNDRED)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripFinancials {
    pub revenue: RevenueBreakdown,
    pub expenses: ExpenseBreakdown,
    pub profit: ProfitAnalysis,
    pub summary: FinancialSummary,
}

pub fn trip_financials(trip: &Trip, expenses: &[TripExpense]) -> TripFinancials {
    let total_revenue = trip.total_revenue();
    let total_expenses: Decimal = expenses.iter().map(|expense| expense.amount).sum();
    let gross_profit = total_revenue - total_expenses;

    let mut by_type = BTreeMap::new();
    for expense in expenses {
        *by_type.entry(expense.expense_type).or_insert(Decimal::ZERO) += expense.amount;
    }

    TripFinancials {
        revenue: RevenueBreakdown {
            base_revenue: trip.base_revenue,
            additional_charges: trip.additional_charges,
            total_revenue,
        },
        expenses: ExpenseBreakdown {
            total_expenses,
            expense_count: expenses.len() as i64,
            by_type,
        },
        profit: ProfitAnalysis {
            gross_profit,
            profit_margin_percentage: profit_margin(gross_profit, total_revenue),
            is_profitable: gross_profit > Decimal::ZERO,
        },
        summary: FinancialSummary {
            total_revenue,
            total_expenses,
            net_profit: gross_profit,
        },
    }
}
