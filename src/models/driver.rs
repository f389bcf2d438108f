use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Driver {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub phone: String,
    pub is_active: bool,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDriver {
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub phone: String,
    pub is_active: bool,
    pub created_by: i32,
}

#[derive(Debug, Clone, Default)]
pub struct DriverChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub license_number: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}
