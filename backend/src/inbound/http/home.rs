//! Root greeting endpoint.

use actix_web::{get, web};

use crate::domain::Greeting;

/// Return the fixed greeting.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = Greeting)),
    tags = ["home"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home() -> web::Json<Greeting> {
    web::Json(Greeting::default())
}
