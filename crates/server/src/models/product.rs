//! Product models.

use chrono::NaiveDate;
use serde::Serialize;

use bookstall_core::ProductId;

/// A catalog product.
///
/// JSON keys keep the column-style names the original API exposed
/// (`PRODNAME`, `PRODWRITE`, ...). `image_path` is a public-relative URL
/// under `/uploads/`, or `None` when no image was supplied.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: ProductId,
    #[serde(rename = "PRODNAME")]
    pub name: String,
    #[serde(rename = "PRODWRITE")]
    pub writer: String,
    #[serde(rename = "PUBDATE")]
    pub published_on: NaiveDate,
    #[serde(rename = "QTY")]
    pub quantity: f64,
    #[serde(rename = "PRICE")]
    pub price: f64,
    #[serde(rename = "IMAGE")]
    pub image_path: Option<String>,
}

/// Fields for a new product row. The id is generated by the store.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub writer: String,
    pub published_on: NaiveDate,
    pub quantity: f64,
    pub price: f64,
    pub image_path: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_column_style_keys() {
        let product = Product {
            id: ProductId::new(3),
            name: "Dune".to_string(),
            writer: "Frank Herbert".to_string(),
            published_on: NaiveDate::from_ymd_opt(1965, 8, 1).unwrap(),
            quantity: 4.0,
            price: 12.5,
            image_path: None,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["ID"], 3);
        assert_eq!(json["PRODNAME"], "Dune");
        assert_eq!(json["PRODWRITE"], "Frank Herbert");
        assert_eq!(json["PUBDATE"], "1965-08-01");
        assert_eq!(json["QTY"], 4.0);
        assert_eq!(json["PRICE"], 12.5);
        assert!(json["IMAGE"].is_null());
    }
}
