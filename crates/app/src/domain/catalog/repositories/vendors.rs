//! Vendors Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::catalog::{
    data::NewVendor,
    records::{VendorRecord, VendorUuid},
};

const CREATE_VENDOR_SQL: &str = include_str!("../sql/create_vendor.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVendorsRepository;

impl PgVendorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: NewVendor,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(CREATE_VENDOR_SQL)
            .bind(vendor.uuid.into_uuid())
            .bind(vendor.name.trim())
            .bind(vendor.url)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for VendorRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VendorUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            url: row.try_get("url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
