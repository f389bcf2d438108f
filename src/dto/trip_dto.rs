//! Trip and trip expense payloads

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::client_dto::ClientResponse;
use super::common::{CreatorDetail, CreatorSummary};
use super::driver_dto::DriverResponse;
use super::truck_dto::TruckResponse;
use crate::models::{
    Client, Driver, ExpenseType, NewTrip, NewTripExpense, Trip, TripChanges, TripExpense,
    TripExpenseChanges, TripStatus, Truck, TruckStatus,
};
use crate::utils::validation::{validate_money, validate_positive_money};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTripRequest {
    #[schema(example = 1)]
    pub client_id: i32,

    pub driver_id: Option<i32>,

    pub truck_id: Option<i32>,

    #[schema(example = "2024-01-15T08:00:00Z")]
    pub start_date: DateTime<Utc>,

    pub end_date: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 500))]
    #[schema(example = "123 Warehouse St, City A")]
    pub origin_address: String,

    #[validate(length(min = 1, max = 500))]
    #[schema(example = "456 Delivery Ave, City B")]
    pub destination_address: String,

    #[validate(custom = "validate_positive_money")]
    #[schema(example = 1500.0)]
    pub base_revenue: Decimal,

    /// Defaults to 0.
    #[validate(custom = "validate_money")]
    #[schema(example = 150.0)]
    pub additional_charges: Option<Decimal>,

    pub status: TripStatus,
}

impl CreateTripRequest {
    pub fn into_new_trip(self, created_by: i32) -> NewTrip {
        NewTrip {
            client_id: self.client_id,
            driver_id: self.driver_id,
            truck_id: self.truck_id,
            start_date: self.start_date,
            end_date: self.end_date,
            origin_address: self.origin_address,
            destination_address: self.destination_address,
            base_revenue: self.base_revenue,
            additional_charges: self.additional_charges.unwrap_or(Decimal::ZERO),
            status: self.status,
            created_by,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTripRequest {
    pub client_id: Option<i32>,
    pub driver_id: Option<i32>,
    pub truck_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 500))]
    pub origin_address: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub destination_address: Option<String>,

    #[validate(custom = "validate_positive_money")]
    pub base_revenue: Option<Decimal>,

    #[validate(custom = "validate_money")]
    pub additional_charges: Option<Decimal>,

    pub status: Option<TripStatus>,
}

impl From<UpdateTripRequest> for TripChanges {
    fn from(request: UpdateTripRequest) -> Self {
        Self {
            client_id: request.client_id,
            driver_id: request.driver_id,
            truck_id: request.truck_id,
            start_date: request.start_date,
            end_date: request.end_date,
            origin_address: request.origin_address,
            destination_address: request.destination_address,
            base_revenue: request.base_revenue,
            additional_charges: request.additional_charges,
            status: request.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TripResponse {
    pub id: i32,
    pub client_id: i32,
    pub driver_id: Option<i32>,
    pub truck_id: Option<i32>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub origin_address: String,
    pub destination_address: String,
    pub base_revenue: Decimal,
    pub additional_charges: Decimal,
    pub status: TripStatus,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Trip> for TripResponse {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id,
            client_id: trip.client_id,
            driver_id: trip.driver_id,
            truck_id: trip.truck_id,
            start_date: trip.start_date,
            end_date: trip.end_date,
            origin_address: trip.origin_address.clone(),
            destination_address: trip.destination_address.clone(),
            base_revenue: trip.base_revenue,
            additional_charges: trip.additional_charges,
            status: trip.status,
            created_by: trip.created_by,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripListItem {
    #[serde(flatten)]
    pub trip: TripResponse,
    pub client: Option<TripClient>,
    pub driver: Option<TripDriver>,
    pub truck: Option<TripTruck>,
    pub creator: Option<CreatorSummary>,
    pub expense_count: i64,
}

/// Client as embedded in the trip list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TripClient {
    pub id: i32,
    pub name: String,
    pub contact_person: String,
}

impl From<&Client> for TripClient {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            contact_person: client.contact_person.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TripDriver {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
}

impl From<&Driver> for TripDriver {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id,
            first_name: driver.first_name.clone(),
            last_name: driver.last_name.clone(),
            license_number: driver.license_number.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TripTruck {
    pub id: i32,
    pub number: String,
    pub model: String,
    pub current_status: TruckStatus,
}

impl From<&Truck> for TripTruck {
    fn from(truck: &Truck) -> Self {
        Self {
            id: truck.id,
            number: truck.number.clone(),
            model: truck.model.clone(),
            current_status: truck.current_status,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripDetail {
    #[serde(flatten)]
    pub trip: TripResponse,
    pub client: Option<ClientResponse>,
    pub driver: Option<DriverResponse>,
    pub truck: Option<TruckResponse>,
    pub creator: Option<CreatorDetail>,
    pub expenses: Vec<TripExpenseResponse>,
    pub expense_count: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTripExpenseRequest {
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,

    #[validate(custom = "validate_positive_money")]
    #[schema(example = 250.75)]
    pub amount: Decimal,

    #[validate(length(min = 1, max = 500))]
    #[schema(example = "Fuel refill at Highway Gas Station")]
    pub description: String,

    #[validate(length(min = 1, max = 100))]
    pub receipt_number: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub vendor_name: Option<String>,

    pub expense_date: DateTime<Utc>,
}

impl CreateTripExpenseRequest {
    pub fn into_new_expense(self, trip_id: i32) -> NewTripExpense {
        NewTripExpense {
            trip_id,
            expense_type: self.expense_type,
            amount: self.amount,
            description: self.description,
            receipt_number: self.receipt_number,
            vendor_name: self.vendor_name,
            expense_date: self.expense_date,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTripExpenseRequest {
    #[serde(rename = "type")]
    pub expense_type: Option<ExpenseType>,

    #[validate(custom = "validate_positive_money")]
    pub amount: Option<Decimal>,

    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub receipt_number: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub vendor_name: Option<String>,

    pub expense_date: Option<DateTime<Utc>>,
}

impl From<UpdateTripExpenseRequest> for TripExpenseChanges {
    fn from(request: UpdateTripExpenseRequest) -> Self {
        Self {
            expense_type: request.expense_type,
            amount: request.amount,
            description: request.description,
            receipt_number: request.receipt_number,
            vendor_name: request.vendor_name,
            expense_date: request.expense_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TripExpenseResponse {
    pub id: i32,
    pub trip_id: i32,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub amount: Decimal,
    pub description: String,
    pub receipt_number: Option<String>,
    pub vendor_name: Option<String>,
    pub expense_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&TripExpense> for TripExpenseResponse {
    fn from(expense: &TripExpense) -> Self {
        Self {
            id: expense.id,
            trip_id: expense.trip_id,
            expense_type: expense.expense_type,
            amount: expense.amount,
            description: expense.description.clone(),
            receipt_number: expense.receipt_number.clone(),
            vendor_name: expense.vendor_name.clone(),
            expense_date: expense.expense_date,
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_trip_rejects_non_positive_revenue() {
        let request: CreateTripRequest = serde_json::from_value(json!({
            "client_id": 1,
            "start_date": "2024-01-15T08:00:00Z",
            "origin_address": "A",
            "destination_address": "B",
            "base_revenue": 0,
            "additional_charges": -1,
            "status": "SCHEDULED"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("base_revenue"));
        assert!(fields.contains_key("additional_charges"));
    }

    #[test]
    fn create_trip_rejects_amounts_the_money_columns_cannot_hold() {
        let request: CreateTripRequest = serde_json::from_value(json!({
            "client_id": 1,
            "start_date": "2024-01-15T08:00:00Z",
            "origin_address": "A",
            "destination_address": "B",
            "base_revenue": 20000000000u64,
            "additional_charges": 0.005,
            "status": "SCHEDULED"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["base_revenue"][0].code, "money_range");
        assert_eq!(fields["additional_charges"][0].code, "money_precision");
    }

    #[test]
    fn expense_update_rejects_sub_cent_amounts() {
        let request: UpdateTripExpenseRequest =
            serde_json::from_value(json!({ "amount": 0.004 })).unwrap();
        assert!(request.validate().is_err());

        let request: UpdateTripExpenseRequest =
            serde_json::from_value(json!({ "amount": 19.99 })).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn additional_charges_default_to_zero() {
        let request: CreateTripRequest = serde_json::from_value(json!({
            "client_id": 3,
            "start_date": "2024-01-15T08:00:00Z",
            "origin_address": "A",
            "destination_address": "B",
            "base_revenue": 1200.5,
            "status": "IN_PROGRESS"
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let trip = request.into_new_trip(9);
        assert_eq!(trip.additional_charges, Decimal::ZERO);
        assert_eq!(trip.created_by, 9);
        assert_eq!(trip.status, TripStatus::InProgress);
    }

    #[test]
    fn expense_type_is_read_from_type_key() {
        let request: CreateTripExpenseRequest = serde_json::from_value(json!({
            "type": "TOLL",
            "amount": 12.4,
            "description": "Bridge toll",
            "expense_date": "2024-01-15T14:30:00Z"
        }))
        .unwrap();
        assert_eq!(request.expense_type, ExpenseType::Toll);
        assert!(request.validate().is_ok());
    }
}
