//! Integration tests for the catalog endpoints: list, add, export, uploads.

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use bookstall_integration_tests::TestContext;

/// Build the multipart form for an add-product request. `None` omits the
/// field entirely.
fn product_form(
    prod_name: Option<&str>,
    writer: Option<&str>,
    pub_date: Option<&str>,
    qty: Option<&str>,
    price: Option<&str>,
    image: Option<(&str, Vec<u8>)>,
) -> Form {
    let mut form = Form::new();
    for (name, value) in [
        ("prodName", prod_name),
        ("writer", writer),
        ("pubDate", pub_date),
        ("qty", qty),
        ("price", price),
    ] {
        if let Some(value) = value {
            form = form.text(name, value.to_owned());
        }
    }
    if let Some((filename, bytes)) = image {
        form = form.part("image", Part::bytes(bytes).file_name(filename.to_owned()));
    }
    form
}

fn dune_form(image: Option<(&str, Vec<u8>)>) -> Form {
    product_form(
        Some("Dune"),
        Some("Frank Herbert"),
        Some("1965-08-01"),
        Some("4"),
        Some("12.5"),
        image,
    )
}

async fn add(ctx: &TestContext, form: Form) -> reqwest::Response {
    ctx.client
        .post(ctx.url("/api/addproducts"))
        .multipart(form)
        .send()
        .await
        .expect("addproducts request failed")
}

async fn list(ctx: &TestContext) -> Value {
    let resp = ctx
        .client
        .get(ctx.url("/api/products"))
        .send()
        .await
        .expect("products request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("json body")
}

#[tokio::test]
async fn test_list_empty_catalog() {
    let ctx = TestContext::new().await;

    let body = list(&ctx).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["products"], serde_json::json!([]));
}

#[tokio::test]
async fn test_add_without_image() {
    let ctx = TestContext::new().await;

    let resp = add(&ctx, dune_form(None)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["success"], true);

    let body = list(&ctx).await;
    let products = body["products"].as_array().expect("products array");
    assert_eq!(products.len(), 1);
    let p = &products[0];
    assert_eq!(p["PRODNAME"], "Dune");
    assert_eq!(p["PRODWRITE"], "Frank Herbert");
    assert_eq!(p["PUBDATE"], "1965-08-01");
    assert_eq!(p["QTY"], 4.0);
    assert_eq!(p["PRICE"], 12.5);
    assert!(p["IMAGE"].is_null());
    assert_eq!(ctx.upload_count(), 0);
}

#[tokio::test]
async fn test_add_with_image_stores_and_serves_it() {
    let ctx = TestContext::new().await;
    let bytes = b"fake png bytes".to_vec();

    let resp = add(&ctx, dune_form(Some(("cover.png", bytes.clone())))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = list(&ctx).await;
    let image = body["products"][0]["IMAGE"].as_str().expect("image path");
    assert!(image.starts_with("/uploads/"));
    assert!(image.ends_with(".png"));
    assert_eq!(ctx.upload_count(), 1);

    // The recorded path must resolve through the static file service
    let resp = ctx
        .client
        .get(ctx.url(image))
        .send()
        .await
        .expect("image request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.bytes().await.expect("image bytes").to_vec(), bytes);
}

#[tokio::test]
async fn test_add_missing_field_writes_nothing() {
    let ctx = TestContext::new().await;

    // writer omitted, image supplied: the 400 must leave no row and no file
    let form = product_form(
        Some("Dune"),
        None,
        Some("1965-08-01"),
        Some("4"),
        Some("12.5"),
        Some(("cover.png", b"bytes".to_vec())),
    );
    let resp = add(&ctx, form).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing required fields");

    assert_eq!(ctx.upload_count(), 0);
    let body = list(&ctx).await;
    assert_eq!(body["products"].as_array().expect("array").len(), 0);
}

#[tokio::test]
async fn test_add_unparsable_numeric_is_400_not_500() {
    let ctx = TestContext::new().await;

    let form = product_form(
        Some("Dune"),
        Some("Frank Herbert"),
        Some("1965-08-01"),
        Some("many"),
        Some("12.5"),
        None,
    );
    let resp = add(&ctx, form).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["message"], "Invalid quantity");
}

#[tokio::test]
async fn test_listing_is_descending_by_id() {
    let ctx = TestContext::new().await;

    for i in 1..=3 {
        let title = format!("Book {i}");
        let form = product_form(
            Some(&title),
            Some("Writer"),
            Some("2020-01-01"),
            Some("1"),
            Some("5"),
            None,
        );
        let resp = add(&ctx, form).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let body = list(&ctx).await;
    let products = body["products"].as_array().expect("products array");
    assert_eq!(products.len(), 3);
    let ids: Vec<i64> = products
        .iter()
        .map(|p| p["ID"].as_i64().expect("id"))
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);
    // Most recently added first
    assert_eq!(products[0]["PRODNAME"], "Book 3");
}

#[tokio::test]
async fn test_same_original_filename_gets_distinct_files() {
    let ctx = TestContext::new().await;

    for bytes in [b"first".to_vec(), b"second".to_vec()] {
        let resp = add(&ctx, dune_form(Some(("cover.png", bytes)))).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let body = list(&ctx).await;
    let products = body["products"].as_array().expect("products array");
    let a = products[0]["IMAGE"].as_str().expect("image path");
    let b = products[1]["IMAGE"].as_str().expect("image path");
    assert_ne!(a, b);
    assert_eq!(ctx.upload_count(), 2);
}

#[tokio::test]
async fn test_failed_insert_leaves_no_orphaned_file() {
    let ctx = TestContext::new().await;

    // Force the insert to fail after the upload write succeeds
    sqlx::query("DROP TABLE products")
        .execute(&ctx.pool)
        .await
        .expect("drop table");

    let resp = add(&ctx, dune_form(Some(("cover.png", b"bytes".to_vec())))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to add product");

    // The just-written file was deleted; no orphan remains
    assert_eq!(ctx.upload_count(), 0);
}

#[tokio::test]
async fn test_list_failure_is_500_with_error_detail() {
    let ctx = TestContext::new().await;

    sqlx::query("DROP TABLE products")
        .execute(&ctx.pool)
        .await
        .expect("drop table");

    let resp = ctx
        .client
        .get(ctx.url("/api/products"))
        .send()
        .await
        .expect("products request failed");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to fetch products");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_export_csv() {
    let ctx = TestContext::new().await;

    let resp = add(&ctx, dune_form(None)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let form = product_form(
        Some("Dune, Messiah"),
        Some("Frank Herbert"),
        Some("1969-10-15"),
        Some("2"),
        Some("9"),
        None,
    );
    let resp = add(&ctx, form).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ctx
        .client
        .get(ctx.url("/api/products/export"))
        .send()
        .await
        .expect("export request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()["content-type"]
            .to_str()
            .expect("header")
            .starts_with("text/csv")
    );
    assert_eq!(
        resp.headers()["content-disposition"],
        "attachment; filename=\"products.csv\""
    );

    let text = resp.text().await.expect("csv body");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "ID,PRODNAME,PRODWRITE,PUBDATE,QTY,PRICE,IMAGE");
    // Most recently added first; the embedded comma is quoted
    assert_eq!(lines[1], "2,\"Dune, Messiah\",Frank Herbert,1969-10-15,2,9,");
    assert_eq!(lines[2], "1,Dune,Frank Herbert,1965-08-01,4,12.5,");
    assert_eq!(lines.len(), 3);
}
