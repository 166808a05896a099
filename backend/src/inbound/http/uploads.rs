//! Image upload endpoint.
//!
//! The `image` part is buffered in memory; its size is bounded by the
//! [`MultipartFormConfig`] registered through [`multipart_config`].

use actix_multipart::MultipartError;
use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::{HttpRequest, post, web};
use tracing::{debug, info};

use crate::domain::{Error, FieldSource, ImageSummary, Violation};
use crate::inbound::http::schemas::ImageUploadSchema;

/// Name of the multipart part carrying the file.
pub const IMAGE_FIELD: &str = "image";

/// Content type reported when the client declares none.
pub const FALLBACK_FORMAT: &str = "application/octet-stream";

/// Multipart body accepted by [`post_image`].
#[derive(MultipartForm)]
pub struct ImageUpload {
    /// The uploaded file, buffered in memory.
    pub image: Bytes,
}

/// Multipart limits for uploads; rejections become 422 responses.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use roster::inbound::http::uploads::multipart_config;
///
/// let _app = App::new().app_data(multipart_config(2 * 1024 * 1024));
/// ```
#[must_use]
pub fn multipart_config(memory_limit: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .memory_limit(memory_limit)
        .error_handler(reject_upload)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "signature is fixed by MultipartFormConfig::error_handler"
)]
fn reject_upload(err: MultipartError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    debug!(%message, "upload rejected");
    Error::validation(vec![Violation::new(
        FieldSource::File,
        IMAGE_FIELD,
        "multipart",
        message,
    )])
    .into()
}

/// Summarise an uploaded image: file name, declared type, and size in KiB.
#[utoipa::path(
    post,
    path = "/post-image",
    request_body(content = ImageUploadSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload summary", body = ImageSummary),
        (status = 422, description = "Upload rejected", body = Error)
    ),
    tags = ["uploads"],
    operation_id = "postImage"
)]
#[post("/post-image")]
pub async fn post_image(form: MultipartForm<ImageUpload>) -> web::Json<ImageSummary> {
    let ImageUpload { image } = form.into_inner();
    let filename = image.file_name.unwrap_or_default();
    let format = image
        .content_type
        .map_or_else(|| FALLBACK_FORMAT.to_owned(), |mime| mime.to_string());
    let summary = ImageSummary::new(filename, format, image.data.len());
    info!(
        filename = %summary.filename,
        format = %summary.format,
        size_kb = summary.size_kb,
        "image uploaded"
    );
    web::Json(summary)
}
