//! Requirements Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_amount,
    domain::catalog::{
        data::NewRequirement,
        records::{
            BusinessUuid, Necessity, ProductUuid, RequirementProduct, RequirementRecord,
            RequirementUuid,
        },
    },
};

const CREATE_REQUIREMENT_SQL: &str = include_str!("../sql/create_requirement.sql");
const LIST_BUSINESS_REQUIREMENTS_SQL: &str = include_str!("../sql/list_business_requirements.sql");
const LIST_REQUIREMENT_PRODUCTS_SQL: &str = include_str!("../sql/list_requirement_products.sql");
const LINK_REQUIREMENT_PRODUCT_SQL: &str = include_str!("../sql/link_requirement_product.sql");

/// A product row tagged with the requirement it was mapped onto.
#[derive(Debug, Clone)]
pub(crate) struct LinkedProduct {
    pub requirement_uuid: RequirementUuid,
    pub product: RequirementProduct,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRequirementsRepository;

impl PgRequirementsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_requirement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requirement: NewRequirement,
    ) -> Result<RequirementRecord, sqlx::Error> {
        query_as::<Postgres, RequirementRecord>(CREATE_REQUIREMENT_SQL)
            .bind(requirement.uuid.into_uuid())
            .bind(requirement.business_uuid.into_uuid())
            .bind(requirement.name.trim())
            .bind(requirement.category.trim())
            .bind(requirement.necessity.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_business_requirements(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        business: BusinessUuid,
    ) -> Result<Vec<RequirementRecord>, sqlx::Error> {
        query_as::<Postgres, RequirementRecord>(LIST_BUSINESS_REQUIREMENTS_SQL)
            .bind(business.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Every product mapped onto any requirement of `business`.
    pub(crate) async fn list_requirement_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        business: BusinessUuid,
    ) -> Result<Vec<LinkedProduct>, sqlx::Error> {
        query_as::<Postgres, LinkedProduct>(LIST_REQUIREMENT_PRODUCTS_SQL)
            .bind(business.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Returns `false` when the link already existed.
    pub(crate) async fn link_requirement_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requirement: RequirementUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(LINK_REQUIREMENT_PRODUCT_SQL)
            .bind(requirement.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for RequirementRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let necessity: String = row.try_get("necessity")?;

        Ok(Self {
            uuid: RequirementUuid::from_uuid(row.try_get("uuid")?),
            business_uuid: BusinessUuid::from_uuid(row.try_get::<Uuid, _>("business_uuid")?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            necessity: necessity
                .parse::<Necessity>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "necessity".to_string(),
                    source: Box::new(e),
                })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for LinkedProduct {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            requirement_uuid: RequirementUuid::from_uuid(row.try_get("requirement_uuid")?),
            product: RequirementProduct {
                uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
                name: row.try_get("name")?,
                price: try_get_amount(row, "price")?,
                image: row.try_get("image")?,
                url: row.try_get("url")?,
                vendor_name: row.try_get("vendor_name")?,
            },
        })
    }
}
