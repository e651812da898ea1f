//! Multipart form parsing for the upload and product-create endpoints.
//!
//! A file part with an empty body is treated as absent, matching the admin
//! dashboard client which always appends the form field even when the user
//! picked no image.

use axum::extract::multipart::{Field, Multipart};
use shopkit_core::AppError;

const DEFAULT_FILENAME: &str = "upload";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A fully buffered file part from a multipart request.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Raw text fields of the product-create form, plus the optional image part.
///
/// Values are kept as strings here; parsing and required-field checks happen
/// in the handler so validation failures are reported before any storage I/O.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub category: Option<String>,
    pub image: Option<FilePart>,
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart request: {}", err))
}

async fn read_file_part(field: Field<'_>) -> Result<Option<FilePart>, AppError> {
    let filename = field
        .file_name()
        .unwrap_or(DEFAULT_FILENAME)
        .to_string();
    let content_type = field
        .content_type()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    let data = field.bytes().await.map_err(multipart_error)?.to_vec();

    if data.is_empty() {
        return Ok(None);
    }

    Ok(Some(FilePart {
        filename,
        content_type,
        data,
    }))
}

/// Extract the `file` part from a standalone upload request.
///
/// Returns `None` when the part is missing or has an empty body; the handler
/// turns that into `AppError::MissingFile`.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<Option<FilePart>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            if let Some(file) = read_file_part(field).await? {
                return Ok(Some(file));
            }
        }
    }
    Ok(None)
}

/// Collect the product-create form fields and the optional `image` part.
pub async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" => {
                form.image = read_file_part(field).await?;
            }
            "name" => form.name = Some(field.text().await.map_err(multipart_error)?),
            "description" => {
                form.description = Some(field.text().await.map_err(multipart_error)?)
            }
            "price" => form.price = Some(field.text().await.map_err(multipart_error)?),
            "stock" => form.stock = Some(field.text().await.map_err(multipart_error)?),
            "category" => form.category = Some(field.text().await.map_err(multipart_error)?),
            // Unknown fields are ignored rather than rejected.
            _ => {}
        }
    }

    Ok(form)
}
