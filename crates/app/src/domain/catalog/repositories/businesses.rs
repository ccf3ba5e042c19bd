//! Businesses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::catalog::{
    data::NewBusiness,
    records::{BusinessRecord, BusinessUuid, CategoryUuid},
};

const CREATE_BUSINESS_SQL: &str = include_str!("../sql/create_business.sql");
const GET_BUSINESS_SQL: &str = include_str!("../sql/get_business.sql");
const GET_BUSINESS_BY_SLUG_SQL: &str = include_str!("../sql/get_business_by_slug.sql");
const LIST_BUSINESSES_SQL: &str = include_str!("../sql/list_businesses.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBusinessesRepository;

impl PgBusinessesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_business(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        business: NewBusiness,
        slug: &str,
    ) -> Result<BusinessRecord, sqlx::Error> {
        query_as::<Postgres, BusinessRecord>(CREATE_BUSINESS_SQL)
            .bind(business.uuid.into_uuid())
            .bind(business.category_uuid.into_uuid())
            .bind(business.name.trim())
            .bind(slug)
            .bind(business.description)
            .bind(business.image)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_business(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        business: BusinessUuid,
    ) -> Result<BusinessRecord, sqlx::Error> {
        query_as::<Postgres, BusinessRecord>(GET_BUSINESS_SQL)
            .bind(business.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_business_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<BusinessRecord, sqlx::Error> {
        query_as::<Postgres, BusinessRecord>(GET_BUSINESS_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_businesses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Option<CategoryUuid>,
    ) -> Result<Vec<BusinessRecord>, sqlx::Error> {
        query_as::<Postgres, BusinessRecord>(LIST_BUSINESSES_SQL)
            .bind(category.map(CategoryUuid::into_uuid))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BusinessRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BusinessUuid::from_uuid(row.try_get("uuid")?),
            category_uuid: CategoryUuid::from_uuid(row.try_get::<Uuid, _>("category_uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            image: row.try_get("image")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
