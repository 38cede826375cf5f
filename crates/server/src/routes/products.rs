//! Catalog route handlers: list, add (multipart with optional image), export.

use axum::{
    Json,
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Serialize;

use super::SuccessResponse;
use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::{NewProduct, Product};
use crate::state::AppState;

/// `{success:true, products}` response for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub success: bool,
    pub products: Vec<Product>,
}

/// List all products, most recently added first.
///
/// GET /api/products
pub async fn list(State(state): State<AppState>) -> Result<Json<ProductsResponse>> {
    let repo = ProductRepository::new(state.pool());
    let products = repo
        .list()
        .await
        .map_err(|e| AppError::operation("Failed to fetch products", &e))?;

    Ok(Json(ProductsResponse {
        success: true,
        products,
    }))
}

/// Text fields collected from the multipart form, pre-validation.
#[derive(Debug, Default)]
struct AddProductForm {
    prod_name: Option<String>,
    writer: Option<String>,
    pub_date: Option<String>,
    qty: Option<String>,
    price: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

/// Create a product from a multipart form.
///
/// POST /api/addproducts
///
/// The image part is buffered in memory until validation completes, so a 400
/// always means no row was inserted and no file was written, regardless of
/// field order in the multipart stream. If the insert fails after the image
/// was written, the file is deleted before responding.
pub async fn add(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SuccessResponse>)> {
    let mut form = AddProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().unwrap_or("").to_owned();
        match name.as_str() {
            "prodName" => form.prod_name = Some(read_text(field).await?),
            "writer" => form.writer = Some(read_text(field).await?),
            "pubDate" => form.pub_date = Some(read_text(field).await?),
            "qty" => form.qty = Some(read_text(field).await?),
            "price" => form.price = Some(read_text(field).await?),
            "image" => {
                let original = field.file_name().unwrap_or("").to_owned();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Malformed multipart request: {e}"))
                })?;
                // An empty file part counts as "no image supplied"
                if !bytes.is_empty() {
                    form.image = Some((original, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    let new = validate(&form)?;

    // Validation is complete; only now touch the filesystem.
    let stored = match &form.image {
        Some((original, bytes)) => Some(
            state
                .uploads()
                .save(original, bytes)
                .await
                .map_err(|e| AppError::operation_opaque("Failed to add product", &e))?,
        ),
        None => None,
    };

    let new = NewProduct {
        image_path: stored.as_ref().map(|s| s.public_path.clone()),
        ..new
    };

    let repo = ProductRepository::new(state.pool());
    if let Err(e) = repo.insert(&new).await {
        // Remove the just-written file so no orphan remains on disk.
        if let Some(stored) = &stored {
            state.uploads().remove(stored).await;
        }
        return Err(AppError::operation_opaque("Failed to add product", &e));
    }

    Ok((StatusCode::CREATED, Json(SuccessResponse::OK)))
}

/// Download the catalog as CSV, most recently added first.
///
/// GET /api/products/export
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let repo = ProductRepository::new(state.pool());
    let products = repo
        .list()
        .await
        .map_err(|e| AppError::operation("Failed to fetch products", &e))?;

    let csv = render_csv(&products);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"products.csv\"",
            ),
        ],
        csv,
    ))
}

/// Read a text field, surfacing decode failures as validation errors.
async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))
}

/// Check presence and formats of the five required text fields.
///
/// Missing or blank fields share the fixed "Missing required fields"
/// message; present-but-unparsable values get field-specific ones.
fn validate(form: &AddProductForm) -> Result<NewProduct> {
    let (Some(prod_name), Some(writer), Some(pub_date), Some(qty), Some(price)) = (
        non_empty(form.prod_name.as_deref()),
        non_empty(form.writer.as_deref()),
        non_empty(form.pub_date.as_deref()),
        non_empty(form.qty.as_deref()),
        non_empty(form.price.as_deref()),
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let published_on = NaiveDate::parse_from_str(pub_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid publication date".to_string()))?;
    let quantity: f64 = qty
        .parse()
        .map_err(|_| AppError::Validation("Invalid quantity".to_string()))?;
    let price: f64 = price
        .parse()
        .map_err(|_| AppError::Validation("Invalid price".to_string()))?;

    Ok(NewProduct {
        name: prod_name.to_string(),
        writer: writer.to_string(),
        published_on,
        quantity,
        price,
        image_path: None,
    })
}

/// Trimmed value, or `None` when missing or blank.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Render the product listing as RFC-4180-style CSV.
fn render_csv(products: &[Product]) -> String {
    let mut out = String::from("ID,PRODNAME,PRODWRITE,PUBDATE,QTY,PRICE,IMAGE\n");
    for p in products {
        let row = [
            p.id.to_string(),
            csv_field(&p.name),
            csv_field(&p.writer),
            p.published_on.format("%Y-%m-%d").to_string(),
            p.quantity.to_string(),
            p.price.to_string(),
            csv_field(p.image_path.as_deref().unwrap_or("")),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Quote a CSV field if it contains a comma, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
