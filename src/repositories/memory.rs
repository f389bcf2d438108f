//! In-process store
//!
//! Backs every repository trait with ordered maps behind a tokio `RwLock`.
//! Unique keys, foreign keys, `ON DELETE RESTRICT` and the expense cascade
//! follow the SQL schema, so services observe the same `StoreError`s as
//! with PostgreSQL. Used by the test suite and for running without a
//! database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::{
    ClientRepository, DriverRepository, StoreError, StoreResult, TripExpenseRepository,
    TripRepository, TruckRepository, UserRepository,
};
use crate::models::{
    Client, ClientChanges, Driver, DriverChanges, NewClient, NewDriver, NewTrip, NewTripExpense,
    NewTruck, NewUser, Trip, TripChanges, TripExpense, TripExpenseChanges, TripLink, Truck,
    TruckChanges, User, UserChanges,
};

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    sequences: HashMap<&'static str, i32>,
    users: BTreeMap<i32, User>,
    drivers: BTreeMap<i32, Driver>,
    trucks: BTreeMap<i32, Truck>,
    clients: BTreeMap<i32, Client>,
    trips: BTreeMap<i32, Trip>,
    expenses: BTreeMap<i32, TripExpense>,
}

impl Tables {
    fn next_id(&mut self, table: &'static str) -> i32 {
        let id = self.sequences.entry(table).or_insert(0);
        *id += 1;
        *id
    }

    fn require_user(&self, id: i32, constraint: &str) -> StoreResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation(constraint.to_string()))
        }
    }

    fn check_trip_references(
        &self,
        client_id: i32,
        driver_id: Option<i32>,
        truck_id: Option<i32>,
        created_by: i32,
    ) -> StoreResult<()> {
        if !self.clients.contains_key(&client_id) {
            return Err(fk("trips_client_id_fkey"));
        }
        if driver_id.is_some_and(|id| !self.drivers.contains_key(&id)) {
            return Err(fk("trips_driver_id_fkey"));
        }
        if truck_id.is_some_and(|id| !self.trucks.contains_key(&id)) {
            return Err(fk("trips_truck_id_fkey"));
        }
        self.require_user(created_by, "trips_created_by_fkey")
    }

    fn trip_references(&self, link: TripLink, id: i32) -> bool {
        self.trips.values().any(|trip| link.target(trip) == Some(id))
    }
}

fn fk(constraint: &str) -> StoreError {
    StoreError::ForeignKeyViolation(constraint.to_string())
}

fn unique(constraint: &str) -> StoreError {
    StoreError::UniqueViolation(constraint.to_string())
}

/// Newest first, ties broken by the higher id.
fn newest_first<T: Clone>(
    rows: impl Iterator<Item = T>,
    key: impl Fn(&T) -> (DateTime<Utc>, i32),
) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}

fn pick<T: Clone>(table: &BTreeMap<i32, T>, ids: &[i32]) -> Vec<T> {
    ids.iter().filter_map(|id| table.get(id).cloned()).collect()
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(unique("users_email_key"));
        }

        let now = Utc::now();
        let row = User {
            id: tables.next_id("users"),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            is_active: user.is_active,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.users.values().cloned(), |u| {
            (u.created_at, u.id)
        }))
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<User>> {
        Ok(pick(&self.tables.read().await.users, ids))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if let Some(email) = &changes.email {
            if tables.users.values().any(|u| u.id != id && &u.email == email) {
                return Err(unique("users_email_key"));
            }
        }

        let user = tables.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(is_active) = changes.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if tables.drivers.values().any(|d| d.created_by == id) {
            return Err(fk("drivers_created_by_fkey"));
        }
        if tables.trucks.values().any(|t| t.created_by == id) {
            return Err(fk("trucks_created_by_fkey"));
        }
        if tables.clients.values().any(|c| c.created_by == id) {
            return Err(fk("clients_created_by_fkey"));
        }
        if tables.trip_references(TripLink::Creator, id) {
            return Err(fk("trips_created_by_fkey"));
        }
        tables.users.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl DriverRepository for MemoryStore {
    async fn create(&self, driver: NewDriver) -> StoreResult<Driver> {
        let mut tables = self.tables.write().await;
        if tables
            .drivers
            .values()
            .any(|d| d.license_number == driver.license_number)
        {
            return Err(unique("drivers_license_number_key"));
        }
        tables.require_user(driver.created_by, "drivers_created_by_fkey")?;

        let now = Utc::now();
        let row = Driver {
            id: tables.next_id("drivers"),
            first_name: driver.first_name,
            last_name: driver.last_name,
            license_number: driver.license_number,
            phone: driver.phone,
            is_active: driver.is_active,
            created_by: driver.created_by,
            created_at: now,
            updated_at: now,
        };
        tables.drivers.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_all(&self) -> StoreResult<Vec<Driver>> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.drivers.values().cloned(), |d| {
            (d.created_at, d.id)
        }))
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Driver>> {
        Ok(self.tables.read().await.drivers.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Driver>> {
        Ok(pick(&self.tables.read().await.drivers, ids))
    }

    async fn find_by_creator(&self, user_id: i32, limit: i64) -> StoreResult<Vec<Driver>> {
        let tables = self.tables.read().await;
        let mut drivers = newest_first(
            tables.drivers.values().filter(|d| d.created_by == user_id).cloned(),
            |d| (d.created_at, d.id),
        );
        drivers.truncate(limit.max(0) as usize);
        Ok(drivers)
    }

    async fn count_by_creator(&self, user_id: i32) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.drivers.values().filter(|d| d.created_by == user_id).count() as i64)
    }

    async fn update(&self, id: i32, changes: DriverChanges) -> StoreResult<Driver> {
        let mut tables = self.tables.write().await;
        if !tables.drivers.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if let Some(license_number) = &changes.license_number {
            if tables
                .drivers
                .values()
                .any(|d| d.id != id && &d.license_number == license_number)
            {
                return Err(unique("drivers_license_number_key"));
            }
        }

        let driver = tables.drivers.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(first_name) = changes.first_name {
            driver.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            driver.last_name = last_name;
        }
        if let Some(license_number) = changes.license_number {
            driver.license_number = license_number;
        }
        if let Some(phone) = changes.phone {
            driver.phone = phone;
        }
        if let Some(is_active) = changes.is_active {
            driver.is_active = is_active;
        }
        driver.updated_at = Utc::now();
        Ok(driver.clone())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.drivers.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if tables.trip_references(TripLink::Driver, id) {
            return Err(fk("trips_driver_id_fkey"));
        }
        tables.drivers.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TruckRepository for MemoryStore {
    async fn create(&self, truck: NewTruck) -> StoreResult<Truck> {
        let mut tables = self.tables.write().await;
        if tables.trucks.values().any(|t| t.number == truck.number) {
            return Err(unique("trucks_number_key"));
        }
        tables.require_user(truck.created_by, "trucks_created_by_fkey")?;

        let now = Utc::now();
        let row = Truck {
            id: tables.next_id("trucks"),
            number: truck.number,
            model: truck.model,
            fuel_type: truck.fuel_type,
            current_status: truck.current_status,
            is_active: truck.is_active,
            created_by: truck.created_by,
            created_at: now,
            updated_at: now,
        };
        tables.trucks.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_all(&self) -> StoreResult<Vec<Truck>> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.trucks.values().cloned(), |t| {
            (t.created_at, t.id)
        }))
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Truck>> {
        Ok(self.tables.read().await.trucks.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Truck>> {
        Ok(pick(&self.tables.read().await.trucks, ids))
    }

    async fn find_by_creator(&self, user_id: i32, limit: i64) -> StoreResult<Vec<Truck>> {
        let tables = self.tables.read().await;
        let mut trucks = newest_first(
            tables.trucks.values().filter(|t| t.created_by == user_id).cloned(),
            |t| (t.created_at, t.id),
        );
        trucks.truncate(limit.max(0) as usize);
        Ok(trucks)
    }

    async fn count_by_creator(&self, user_id: i32) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.trucks.values().filter(|t| t.created_by == user_id).count() as i64)
    }

    async fn update(&self, id: i32, changes: TruckChanges) -> StoreResult<Truck> {
        let mut tables = self.tables.write().await;
        if !tables.trucks.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if let Some(number) = &changes.number {
            if tables.trucks.values().any(|t| t.id != id && &t.number == number) {
                return Err(unique("trucks_number_key"));
            }
        }

        let truck = tables.trucks.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(number) = changes.number {
            truck.number = number;
        }
        if let Some(model) = changes.model {
            truck.model = model;
        }
        if let Some(fuel_type) = changes.fuel_type {
            truck.fuel_type = fuel_type;
        }
        if let Some(current_status) = changes.current_status {
            truck.current_status = current_status;
        }
        if let Some(is_active) = changes.is_active {
            truck.is_active = is_active;
        }
        truck.updated_at = Utc::now();
        Ok(truck.clone())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.trucks.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if tables.trip_references(TripLink::Truck, id) {
            return Err(fk("trips_truck_id_fkey"));
        }
        tables.trucks.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn create(&self, client: NewClient) -> StoreResult<Client> {
        let mut tables = self.tables.write().await;
        if tables.clients.values().any(|c| c.email == client.email) {
            return Err(unique("clients_email_key"));
        }
        tables.require_user(client.created_by, "clients_created_by_fkey")?;

        let now = Utc::now();
        let row = Client {
            id: tables.next_id("clients"),
            name: client.name,
            contact_person: client.contact_person,
            phone: client.phone,
            email: client.email,
            address: client.address,
            is_active: client.is_active,
            created_by: client.created_by,
            created_at: now,
            updated_at: now,
        };
        tables.clients.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_all(&self) -> StoreResult<Vec<Client>> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.clients.values().cloned(), |c| {
            (c.created_at, c.id)
        }))
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Client>> {
        Ok(self.tables.read().await.clients.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Client>> {
        Ok(pick(&self.tables.read().await.clients, ids))
    }

    async fn find_by_creator(&self, user_id: i32, limit: i64) -> StoreResult<Vec<Client>> {
        let tables = self.tables.read().await;
        let mut clients = newest_first(
            tables.clients.values().filter(|c| c.created_by == user_id).cloned(),
            |c| (c.created_at, c.id),
        );
        clients.truncate(limit.max(0) as usize);
        Ok(clients)
    }

    async fn count_by_creator(&self, user_id: i32) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.clients.values().filter(|c| c.created_by == user_id).count() as i64)
    }

    async fn update(&self, id: i32, changes: ClientChanges) -> StoreResult<Client> {
        let mut tables = self.tables.write().await;
        if !tables.clients.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if let Some(email) = &changes.email {
            if tables.clients.values().any(|c| c.id != id && &c.email == email) {
                return Err(unique("clients_email_key"));
            }
        }

        let client = tables.clients.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(name) = changes.name {
            client.name = name;
        }
        if let Some(contact_person) = changes.contact_person {
            client.contact_person = contact_person;
        }
        if let Some(phone) = changes.phone {
            client.phone = phone;
        }
        if let Some(email) = changes.email {
            client.email = email;
        }
        if let Some(address) = changes.address {
            client.address = address;
        }
        if let Some(is_active) = changes.is_active {
            client.is_active = is_active;
        }
        client.updated_at = Utc::now();
        Ok(client.clone())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.clients.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if tables.trip_references(TripLink::Client, id) {
            return Err(fk("trips_client_id_fkey"));
        }
        tables.clients.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TripRepository for MemoryStore {
    async fn create(&self, trip: NewTrip) -> StoreResult<Trip> {
        let mut tables = self.tables.write().await;
        tables.check_trip_references(
            trip.client_id,
            trip.driver_id,
            trip.truck_id,
            trip.created_by,
        )?;

        let now = Utc::now();
        let row = Trip {
            id: tables.next_id("trips"),
            client_id: trip.client_id,
            driver_id: trip.driver_id,
            truck_id: trip.truck_id,
            start_date: trip.start_date,
            end_date: trip.end_date,
            origin_address: trip.origin_address,
            destination_address: trip.destination_address,
            base_revenue: trip.base_revenue,
            additional_charges: trip.additional_charges,
            status: trip.status,
            created_by: trip.created_by,
            created_at: now,
            updated_at: now,
        };
        tables.trips.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_all(&self) -> StoreResult<Vec<Trip>> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.trips.values().cloned(), |t| {
            (t.created_at, t.id)
        }))
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Trip>> {
        Ok(self.tables.read().await.trips.get(&id).cloned())
    }

    async fn find_linked(
        &self,
        link: TripLink,
        id: i32,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Trip>> {
        let tables = self.tables.read().await;
        let mut trips = newest_first(
            tables
                .trips
                .values()
                .filter(|trip| link.target(trip) == Some(id))
                .cloned(),
            |t| (t.start_date, t.id),
        );
        if let Some(limit) = limit {
            trips.truncate(limit.max(0) as usize);
        }
        Ok(trips)
    }

    async fn count_linked(&self, link: TripLink, id: i32) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .trips
            .values()
            .filter(|trip| link.target(trip) == Some(id))
            .count() as i64)
    }

    async fn count_linked_many(
        &self,
        link: TripLink,
        ids: &[i32],
    ) -> StoreResult<HashMap<i32, i64>> {
        let tables = self.tables.read().await;
        let mut counts = HashMap::new();
        for trip in tables.trips.values() {
            if let Some(target) = link.target(trip).filter(|target| ids.contains(target)) {
                *counts.entry(target).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn update(&self, id: i32, changes: TripChanges) -> StoreResult<Trip> {
        let mut tables = self.tables.write().await;
        let current = tables.trips.get(&id).cloned().ok_or(StoreError::NotFound)?;
        tables.check_trip_references(
            changes.client_id.unwrap_or(current.client_id),
            changes.driver_id.or(current.driver_id),
            changes.truck_id.or(current.truck_id),
            current.created_by,
        )?;

        let trip = tables.trips.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(client_id) = changes.client_id {
            trip.client_id = client_id;
        }
        if changes.driver_id.is_some() {
            trip.driver_id = changes.driver_id;
        }
        if changes.truck_id.is_some() {
            trip.truck_id = changes.truck_id;
        }
        if let Some(start_date) = changes.start_date {
            trip.start_date = start_date;
        }
        if changes.end_date.is_some() {
            trip.end_date = changes.end_date;
        }
        if let Some(origin_address) = changes.origin_address {
            trip.origin_address = origin_address;
        }
        if let Some(destination_address) = changes.destination_address {
            trip.destination_address = destination_address;
        }
        if let Some(base_revenue) = changes.base_revenue {
            trip.base_revenue = base_revenue;
        }
        if let Some(additional_charges) = changes.additional_charges {
            trip.additional_charges = additional_charges;
        }
        if let Some(status) = changes.status {
            trip.status = status;
        }
        trip.updated_at = Utc::now();
        Ok(trip.clone())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.trips.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        tables.expenses.retain(|_, expense| expense.trip_id != id);
        Ok(())
    }
}

#[async_trait]
impl TripExpenseRepository for MemoryStore {
    async fn create(&self, expense: NewTripExpense) -> StoreResult<TripExpense> {
        let mut tables = self.tables.write().await;
        if !tables.trips.contains_key(&expense.trip_id) {
            return Err(fk("trip_expenses_trip_id_fkey"));
        }

        let now = Utc::now();
        let row = TripExpense {
            id: tables.next_id("trip_expenses"),
            trip_id: expense.trip_id,
            expense_type: expense.expense_type,
            amount: expense.amount,
            description: expense.description,
            receipt_number: expense.receipt_number,
            vendor_name: expense.vendor_name,
            expense_date: expense.expense_date,
            created_at: now,
            updated_at: now,
        };
        tables.expenses.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_trip(&self, trip_id: i32) -> StoreResult<Vec<TripExpense>> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .expenses
                .values()
                .filter(|e| e.trip_id == trip_id)
                .cloned(),
            |e| (e.expense_date, e.id),
        ))
    }

    async fn count_by_trips(&self, trip_ids: &[i32]) -> StoreResult<HashMap<i32, i64>> {
        let tables = self.tables.read().await;
        let mut counts = HashMap::new();
        for expense in tables.expenses.values() {
            if trip_ids.contains(&expense.trip_id) {
                *counts.entry(expense.trip_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn update(
        &self,
        trip_id: i32,
        expense_id: i32,
        changes: TripExpenseChanges,
    ) -> StoreResult<TripExpense> {
        let mut tables = self.tables.write().await;
        let expense = tables
            .expenses
            .get_mut(&expense_id)
            .filter(|e| e.trip_id == trip_id)
            .ok_or(StoreError::NotFound)?;

        if let Some(expense_type) = changes.expense_type {
            expense.expense_type = expense_type;
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(description) = changes.description {
            expense.description = description;
        }
        if changes.receipt_number.is_some() {
            expense.receipt_number = changes.receipt_number;
        }
        if changes.vendor_name.is_some() {
            expense.vendor_name = changes.vendor_name;
        }
        if let Some(expense_date) = changes.expense_date {
            expense.expense_date = expense_date;
        }
        expense.updated_at = Utc::now();
        Ok(expense.clone())
    }

    async fn delete(&self, trip_id: i32, expense_id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let belongs_to_trip = tables
            .expenses
            .get(&expense_id)
            .is_some_and(|expense| expense.trip_id == trip_id);
        if !belongs_to_trip {
            return Err(StoreError::NotFound);
        }
        tables.expenses.remove(&expense_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, TripStatus};
    use rust_decimal::Decimal;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::Admin,
            is_active: true,
        }
    }

    fn new_client(email: &str, created_by: i32) -> NewClient {
        NewClient {
            name: "Acme Logistics".to_string(),
            contact_person: "Wile E.".to_string(),
            phone: "+15550100".to_string(),
            email: email.to_string(),
            address: "1 Desert Road".to_string(),
            is_active: true,
            created_by,
        }
    }

    fn new_trip(client_id: i32, created_by: i32) -> NewTrip {
        NewTrip {
            client_id,
            driver_id: None,
            truck_id: None,
            start_date: Utc::now(),
            end_date: None,
            origin_address: "Depot".to_string(),
            destination_address: "Warehouse".to_string(),
            base_revenue: Decimal::from(100),
            additional_charges: Decimal::ZERO,
            status: TripStatus::Scheduled,
            created_by,
        }
    }

    #[tokio::test]
    async fn rejects_duplicate_user_email() {
        let store = MemoryStore::default();
        UserRepository::create(&store, new_user("a@fleet.io")).await.unwrap();
        let second = UserRepository::create(&store, new_user("a@fleet.io")).await;
        assert!(matches!(second, Err(StoreError::UniqueViolation(_))));
    }

    #[tokio::test]
    async fn restricts_deleting_referenced_client() {
        let store = MemoryStore::default();
        let user = UserRepository::create(&store, new_user("a@fleet.io")).await.unwrap();
        let client = ClientRepository::create(&store, new_client("c@acme.io", user.id))
            .await
            .unwrap();
        let trip = TripRepository::create(&store, new_trip(client.id, user.id))
            .await
            .unwrap();

        let blocked = ClientRepository::delete(&store, client.id).await;
        assert!(matches!(blocked, Err(StoreError::ForeignKeyViolation(_))));

        TripRepository::delete(&store, trip.id).await.unwrap();
        ClientRepository::delete(&store, client.id).await.unwrap();
        assert!(ClientRepository::find_by_id(&store, client.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn trip_requires_existing_client() {
        let store = MemoryStore::default();
        let user = UserRepository::create(&store, new_user("a@fleet.io")).await.unwrap();
        let result = TripRepository::create(&store, new_trip(999, user.id)).await;
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation(_))));
    }

    #[tokio::test]
    async fn deleting_trip_cascades_to_expenses() {
        let store = MemoryStore::default();
        let user = UserRepository::create(&store, new_user("a@fleet.io")).await.unwrap();
        let client = ClientRepository::create(&store, new_client("c@acme.io", user.id))
            .await
            .unwrap();
        let trip = TripRepository::create(&store, new_trip(client.id, user.id))
            .await
            .unwrap();
        TripExpenseRepository::create(
            &store,
            NewTripExpense {
                trip_id: trip.id,
                expense_type: crate::models::ExpenseType::Toll,
                amount: Decimal::from(12),
                description: "Bridge toll".to_string(),
                receipt_number: None,
                vendor_name: None,
                expense_date: Utc::now(),
            },
        )
        .await
        .unwrap();

        TripRepository::delete(&store, trip.id).await.unwrap();
        let counts = TripExpenseRepository::count_by_trips(&store, &[trip.id])
            .await
            .unwrap();
        assert!(counts.is_empty());
    }

    #[tokio::test]
    async fn updating_missing_user_is_not_found_even_with_taken_email() {
        let store = MemoryStore::default();
        UserRepository::create(&store, new_user("taken@fleet.io")).await.unwrap();

        let result = UserRepository::update(
            &store,
            404,
            UserChanges {
                email: Some("taken@fleet.io".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }
}
