//! Wire schema of the inventory API and its conversion into domain types.
//!
//! Response rows are decoded into these DTOs first and then validated with
//! `TryFrom`, so nothing loosely typed reaches the reconciler.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use stockroom_catalog::{Category, Product};
use stockroom_core::{CategoryId, DomainError, ProductId, StockId, UserId};
use stockroom_inventory::{StockRecord, StockRowDetails};

use crate::auth::User;

#[derive(Debug, Clone, Deserialize)]
pub struct ProductRow {
    pub id_produk: i64,
    pub nama_produk: String,
    pub id_kategori: i64,
    #[serde(default)]
    pub nama_kategori: Option<String>,
    #[serde(default)]
    pub kode_produk: Option<String>,
    #[serde(default)]
    pub foto_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DomainError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        if row.nama_produk.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {} has a blank name",
                row.id_produk
            )));
        }
        Ok(Product {
            id: ProductId::new(row.id_produk),
            name: row.nama_produk,
            category_id: CategoryId::new(row.id_kategori),
            category_name: row.nama_kategori,
            code: row.kode_produk.unwrap_or_default(),
            photo_url: row.foto_url.filter(|u| !u.trim().is_empty()),
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRow {
    pub id_kategori: i64,
    pub nama_kategori: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        if row.nama_kategori.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "category {} has a blank name",
                row.id_kategori
            )));
        }
        Ok(Category {
            id: CategoryId::new(row.id_kategori),
            name: row.nama_kategori,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockRow {
    pub id_stok: i64,
    pub id_produk: i64,
    #[serde(deserialize_with = "quantity_from_number_or_text")]
    pub jumlah_barang: i64,
    #[serde(default)]
    pub nama_produk: Option<String>,
    #[serde(default)]
    pub kode_produk: Option<String>,
}

impl TryFrom<StockRow> for (StockRecord, StockRowDetails) {
    type Error = DomainError;

    fn try_from(row: StockRow) -> Result<Self, Self::Error> {
        let quantity = u64::try_from(row.jumlah_barang).map_err(|_| {
            DomainError::validation(format!(
                "stock {} has a negative quantity ({})",
                row.id_stok, row.jumlah_barang
            ))
        })?;
        Ok((
            StockRecord {
                id: StockId::new(row.id_stok),
                product_id: ProductId::new(row.id_produk),
                quantity,
            },
            StockRowDetails {
                product_name: row.nama_produk,
                product_code: row.kode_produk,
            },
        ))
    }
}

/// Body of `POST /stok` and `PUT /stok/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockBody {
    pub id_produk: ProductId,
    pub jumlah_barang: u64,
}

/// Body of `POST /kategori` and `PUT /kategori/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBody<'a> {
    pub nama_kategori: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRow {
    pub id_user: i64,
    #[serde(default)]
    pub nama_user: String,
    #[serde(default)]
    pub email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::new(row.id_user),
            name: row.nama_user,
            email: row.email,
        }
    }
}

/// Error payload; only `message` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Quantities arrive as numbers or numeric strings depending on the backend
/// driver (`"12"`, `12`, `12.0`).
fn quantity_from_number_or_text<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    fn whole(v: f64) -> Option<i64> {
        (v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64).then_some(v as i64)
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Float(v) => {
            whole(v).ok_or_else(|| de::Error::custom(format!("quantity {v} is not a whole number")))
        }
        Raw::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
                .ok_or_else(|| de::Error::custom(format!("quantity `{s}` is not a whole number")))
        }
    }
}

const SQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `created_at` is display-only, so an unreadable value becomes `None`
/// instead of failing the row. Accepts RFC 3339 and `YYYY-MM-DD HH:MM:SS`
/// (read as UTC).
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let serde_json::Value::String(text) = raw else {
        tracing::debug!(value = %raw, "ignoring non-text created_at");
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let parsed = DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(text, SQL_DATETIME_FORMAT).map(|dt| dt.and_utc()));
    match parsed {
        Ok(dt) => Ok(Some(dt)),
        Err(err) => {
            tracing::debug!(value = %text, error = %err, "unreadable created_at; leaving it empty");
            Ok(None)
        }
    }
}

/// Decode and validate a list of rows into domain values.
pub fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, DomainError>
where
    T: TryFrom<R, Error = DomainError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_row_converts() {
        let row: ProductRow = serde_json::from_value(json!({
            "id_produk": 1,
            "nama_produk": "Kopi Kapal Api",
            "id_kategori": 2,
            "nama_kategori": "Minuman",
            "kode_produk": "KKA",
            "foto_url": "",
            "created_at": "2025-01-05T10:00:00Z"
        }))
        .unwrap();
        let product = Product::try_from(row).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.category_name.as_deref(), Some("Minuman"));
        assert_eq!(product.photo_url, None);
        assert!(product.created_at.is_some());
    }

    #[test]
    fn sql_style_created_at_does_not_reject_the_list() {
        let rows: Vec<ProductRow> = serde_json::from_value(json!([
            {"id_produk": 1, "nama_produk": "Kopi", "id_kategori": 2,
             "created_at": "2025-01-05 10:00:00"},
            {"id_produk": 2, "nama_produk": "Teh", "id_kategori": 2,
             "created_at": "kemarin"},
            {"id_produk": 3, "nama_produk": "Gula", "id_kategori": 2,
             "created_at": null}
        ]))
        .unwrap();
        let products: Vec<Product> = convert_all(rows).unwrap();
        assert_eq!(products.len(), 3);

        let expected = NaiveDateTime::parse_from_str("2025-01-05 10:00:00", SQL_DATETIME_FORMAT)
            .unwrap()
            .and_utc();
        assert_eq!(products[0].created_at, Some(expected));
        assert_eq!(products[1].created_at, None);
        assert_eq!(products[2].created_at, None);
    }

    #[test]
    fn blank_product_name_is_rejected() {
        let row: ProductRow = serde_json::from_value(json!({
            "id_produk": 1, "nama_produk": " ", "id_kategori": 2
        }))
        .unwrap();
        assert!(matches!(Product::try_from(row), Err(DomainError::Validation(_))));
    }

    #[test]
    fn stock_quantity_accepts_text_and_numbers() {
        for raw in [json!(12), json!("12"), json!(" 12 "), json!(12.0), json!("12.00")] {
            let row: StockRow = serde_json::from_value(json!({
                "id_stok": 3, "id_produk": 7, "jumlah_barang": raw
            }))
            .unwrap();
            assert_eq!(row.jumlah_barang, 12);
        }
    }

    #[test]
    fn stock_quantity_rejects_garbage() {
        for raw in [json!("dua belas"), json!(1.5), json!(null)] {
            let res: Result<StockRow, _> = serde_json::from_value(json!({
                "id_stok": 3, "id_produk": 7, "jumlah_barang": raw.clone()
            }));
            assert!(res.is_err(), "{raw} should not decode");
        }
    }

    #[test]
    fn negative_stock_is_rejected_at_the_boundary() {
        let row: StockRow = serde_json::from_value(json!({
            "id_stok": 3, "id_produk": 7, "jumlah_barang": -4
        }))
        .unwrap();
        let res: Result<(StockRecord, StockRowDetails), _> = row.try_into();
        assert!(matches!(res, Err(DomainError::Validation(_))));
    }

    #[test]
    fn stock_body_uses_wire_names() {
        let body = StockBody {
            id_produk: ProductId::new(7),
            jumlah_barang: 15,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"id_produk": 7, "jumlah_barang": 15})
        );
    }
}
