//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod contact;
pub mod error;
pub mod fields;
pub mod health;
pub mod home;
pub mod login;
pub mod persons;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod uploads;
pub mod validation;

pub use error::ApiResult;

/// Register every endpoint of the API, including the health checks.
///
/// Callers supply the application data the handlers depend on:
/// [`state::HttpState`], [`health::HealthState`], and the
/// [`uploads::multipart_config`] limits.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use roster::inbound::http::{self, health::HealthState, state::HttpState};
///
/// let _app = App::new()
///     .app_data(web::Data::new(HttpState::default()))
///     .app_data(web::Data::new(HealthState::new()))
///     .app_data(http::uploads::multipart_config(1024))
///     .configure(http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home::home)
        .service(persons::create_person)
        .service(persons::show_person)
        .service(persons::show_person_by_id)
        .service(persons::update_person)
        .service(login::login)
        .service(contact::contact)
        .service(uploads::post_image)
        .service(health::ready)
        .service(health::live);
}
