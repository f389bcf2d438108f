//! Report payloads
//!
//! Money fields are `Decimal` and serialize as JSON numbers. Averages and
//! margins are rounded to two decimals by `services::report_service`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::models::{Client, Driver, ExpenseType, FuelType, Trip, TripStatus, Truck, TruckStatus, User};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatorName {
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for CreatorName {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Trip totals for one driver, truck or client.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PerformanceMetrics {
    pub total_trips: i64,
    /// Only reported for trucks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_trips: Option<i64>,
    pub total_revenue: Decimal,
    pub average_revenue_per_trip: Decimal,
}

/// Trip count keyed by status name.
pub type StatusBreakdown = BTreeMap<String, i64>;

#[derive(Debug, Serialize, ToSchema)]
pub struct DriverReportProfile {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub creator: Option<CreatorName>,
}

impl DriverReportProfile {
    pub fn new(driver: &Driver, creator: Option<&User>) -> Self {
        Self {
            id: driver.id,
            first_name: driver.first_name.clone(),
            last_name: driver.last_name.clone(),
            license_number: driver.license_number.clone(),
            phone: driver.phone.clone(),
            is_active: driver.is_active,
            created_at: driver.created_at,
            creator: creator.map(CreatorName::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DriverReport {
    pub driver: DriverReportProfile,
    pub performance_metrics: PerformanceMetrics,
    pub trip_status_breakdown: StatusBreakdown,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TruckReportProfile {
    pub id: i32,
    pub number: String,
    pub model: String,
    pub fuel_type: FuelType,
    pub current_status: TruckStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub creator: Option<CreatorName>,
}

impl TruckReportProfile {
    pub fn new(truck: &Truck, creator: Option<&User>) -> Self {
        Self {
            id: truck.id,
            number: truck.number.clone(),
            model: truck.model.clone(),
            fuel_type: truck.fuel_type,
            current_status: truck.current_status,
            is_active: truck.is_active,
            created_at: truck.created_at,
            creator: creator.map(CreatorName::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TruckReport {
    pub truck: TruckReportProfile,
    pub performance_metrics: PerformanceMetrics,
    pub trip_status_breakdown: StatusBreakdown,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientReportProfile {
    pub id: i32,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub creator: Option<CreatorName>,
}

impl ClientReportProfile {
    pub fn new(client: &Client, creator: Option<&User>) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            contact_person: client.contact_person.clone(),
            phone: client.phone.clone(),
            email: client.email.clone(),
            address: client.address.clone(),
            is_active: client.is_active,
            created_at: client.created_at,
            creator: creator.map(CreatorName::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientReport {
    pub client: ClientReportProfile,
    pub performance_metrics: PerformanceMetrics,
    pub trip_status_breakdown: StatusBreakdown,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripInfo {
    pub id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration_days: Option<i64>,
    pub status: TripStatus,
    pub origin_address: String,
    pub destination_address: String,
    pub created_at: DateTime<Utc>,
    pub creator: Option<CreatorName>,
}

impl TripInfo {
    pub fn new(trip: &Trip, duration_days: Option<i64>, creator: Option<&User>) -> Self {
        Self {
            id: trip.id,
            start_date: trip.start_date,
            end_date: trip.end_date,
            duration_days,
            status: trip.status,
            origin_address: trip.origin_address.clone(),
            destination_address: trip.destination_address.clone(),
            created_at: trip.created_at,
            creator: creator.map(CreatorName::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientContact {
    pub id: i32,
    pub name: String,
    pub contact_person: String,
    pub email: String,
}

impl From<&Client> for ClientContact {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            contact_person: client.contact_person.clone(),
            email: client.email.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DriverIdentity {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
}

impl From<&Driver> for DriverIdentity {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id,
            first_name: driver.first_name.clone(),
            last_name: driver.last_name.clone(),
            license_number: driver.license_number.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TruckIdentity {
    pub id: i32,
    pub number: String,
    pub model: String,
    pub fuel_type: FuelType,
}

impl From<&Truck> for TruckIdentity {
    fn from(truck: &Truck) -> Self {
        Self {
            id: truck.id,
            number: truck.number.clone(),
            model: truck.model.clone(),
            fuel_type: truck.fuel_type,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssociatedEntities {
    pub client: Option<ClientContact>,
    pub driver: Option<DriverIdentity>,
    pub truck: Option<TruckIdentity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RevenueBreakdown {
    pub base_revenue: Decimal,
    pub additional_charges: Decimal,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExpenseBreakdown {
    pub total_expenses: Decimal,
    pub expense_count: i64,
    /// Sum of amounts per expense type, only types that occur.
    pub by_type: BTreeMap<ExpenseType, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfitAnalysis {
    pub gross_profit: Decimal,
    pub profit_margin_percentage: Decimal,
    pub is_profitable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FinancialSummary {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripFinancialReport {
    pub trip_info: TripInfo,
    pub associated_entities: AssociatedEntities,
    pub revenue_breakdown: RevenueBreakdown,
    pub expense_breakdown: ExpenseBreakdown,
    pub profit_analysis: ProfitAnalysis,
    pub summary: FinancialSummary,
}
