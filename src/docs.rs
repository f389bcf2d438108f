//! OpenAPI document served at `/api/v1/docs/openapi.json`.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::middleware::ACCESS_TOKEN_COOKIE;
use crate::routes::{
    auth_routes, client_routes, driver_routes, report_routes, trip_routes, truck_routes,
    user_routes,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Fleet back office API", version = "1.0.0"),
    paths(
        auth_routes::register,
        auth_routes::login,
        auth_routes::logout,
        user_routes::list_users,
        user_routes::get_user,
        user_routes::update_user,
        user_routes::delete_user,
        driver_routes::create_driver,
        driver_routes::list_drivers,
        driver_routes::get_driver,
        driver_routes::update_driver,
        driver_routes::delete_driver,
        truck_routes::create_truck,
        truck_routes::list_trucks,
        truck_routes::get_truck,
        truck_routes::update_truck,
        truck_routes::delete_truck,
        client_routes::create_client,
        client_routes::list_clients,
        client_routes::get_client,
        client_routes::update_client,
        client_routes::delete_client,
        trip_routes::create_trip,
        trip_routes::list_trips,
        trip_routes::get_trip,
        trip_routes::update_trip,
        trip_routes::delete_trip,
        trip_routes::create_expense,
        trip_routes::list_expenses,
        trip_routes::update_expense,
        trip_routes::delete_expense,
        report_routes::driver_report,
        report_routes::truck_report,
        report_routes::client_report,
        report_routes::trip_report,
    ),
    modifiers(&CookieAuth),
    tags(
        (name = "Authentication"),
        (name = "Users"),
        (name = "Drivers"),
        (name = "Trucks"),
        (name = "Clients"),
        (name = "Trips"),
        (name = "Trip expenses"),
        (name = "Reports")
    )
)]
pub struct ApiDoc;

struct CookieAuth;

impl Modify for CookieAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "access_token",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(ACCESS_TOKEN_COOKIE))),
        );
    }
}
