//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    carts::records::{CartRecord, CartUuid},
    catalog::records::BusinessUuid,
    users::records::UserUuid,
};

const INSERT_CART_SQL: &str = include_str!("../sql/insert_cart.sql");
const FIND_CART_SQL: &str = include_str!("../sql/find_cart.sql");
const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const SAVE_CART_SQL: &str = include_str!("../sql/save_cart.sql");
const FINALIZE_CART_SQL: &str = include_str!("../sql/finalize_cart.sql");
const TOUCH_CART_SQL: &str = include_str!("../sql/touch_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Return the user's cart for `business`, inserting an empty one first if
    /// none exists. Concurrent callers converge on a single row.
    pub(crate) async fn get_or_create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        business: BusinessUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query(INSERT_CART_SQL)
            .bind(CartUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(business.into_uuid())
            .execute(&mut **tx)
            .await?;

        query_as::<Postgres, CartRecord>(FIND_CART_SQL)
            .bind(user.into_uuid())
            .bind(business.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        business: BusinessUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(FIND_CART_SQL)
            .bind(user.into_uuid())
            .bind(business.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(GET_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn save_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        name: &str,
        total_snapshot: i64,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(SAVE_CART_SQL)
            .bind(cart.into_uuid())
            .bind(name)
            .bind(total_snapshot)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn finalize_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        name: &str,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(FINALIZE_CART_SQL)
            .bind(cart.into_uuid())
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Bump `updated_at` after an item change.
    pub(crate) async fn touch_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let total_snapshot = row
            .try_get::<Option<i64>, _>("total_snapshot")?
            .map(u64::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "total_snapshot".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get::<Uuid, _>("user_uuid")?),
            business_uuid: BusinessUuid::from_uuid(row.try_get::<Uuid, _>("business_uuid")?),
            name: row.try_get("name")?,
            total_snapshot,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
