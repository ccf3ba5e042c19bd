//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use serde_json::json;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        audit::{
            data::{AuditAction, NewAuditEvent},
            repository::PgAuditRepository,
        },
        carts::{
            data::{FinalizeCart, NewCartItem, SaveCart},
            errors::CartsServiceError,
            pricing::{CartTotal, compute_total},
            records::{
                CartItemRecord, CartItemUuid, CartRecord, CartUuid, SharedCartItem,
                SharedCartRecord, resolve_cart_name,
            },
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        catalog::{
            records::{BusinessUuid, ProductUuid},
            repositories::{PgBusinessesRepository, PgProductsRepository},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
    businesses_repository: PgBusinessesRepository,
    audit_repository: PgAuditRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            businesses_repository: PgBusinessesRepository::new(),
            audit_repository: PgAuditRepository::new(),
        }
    }

    /// Load the user's cart for `business` with its items, requiring at least one.
    async fn non_empty_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        business: BusinessUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut cart = self
            .carts_repository
            .find_cart(tx, user, business)
            .await?
            .ok_or(CartsServiceError::EmptyCart)?;

        cart.items = self
            .items_repository
            .list_cart_items(tx, cart.uuid)
            .await?;

        if cart.items.is_empty() {
            return Err(CartsServiceError::EmptyCart);
        }

        Ok(cart)
    }

    async fn record(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        action: AuditAction,
        cart: CartUuid,
        details: serde_json::Value,
    ) -> Result<(), CartsServiceError> {
        self.audit_repository
            .record_event(
                tx,
                NewAuditEvent::new(user, action, cart.into_uuid(), details),
            )
            .await?;

        Ok(())
    }
}

fn checked_quantity(quantity: u32) -> Result<i32, CartsServiceError> {
    if quantity < 1 {
        return Err(CartsServiceError::invalid("quantity must be at least 1"));
    }

    i32::try_from(quantity).map_err(|_overflow| CartsServiceError::invalid("quantity is too large"))
}

fn checked_amount(amount: u64) -> Result<i64, CartsServiceError> {
    i64::try_from(amount).map_err(|_overflow| CartsServiceError::invalid("amount is too large"))
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(
        name = "carts.service.get_cart",
        skip(self),
        fields(user_uuid = %user, business_uuid = %business),
        err
    )]
    async fn get_cart(
        &self,
        user: UserUuid,
        business: BusinessUuid,
    ) -> Result<Option<CartRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(mut cart) = self
            .carts_repository
            .find_cart(&mut tx, user, business)
            .await?
        else {
            return Ok(None);
        };

        cart.items = self
            .items_repository
            .list_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(Some(cart))
    }

    #[tracing::instrument(
        name = "carts.service.get_or_create_cart",
        skip(self),
        fields(user_uuid = %user, business_uuid = %business, cart_uuid = tracing::field::Empty),
        err
    )]
    async fn get_or_create_cart(
        &self,
        user: UserUuid,
        business: BusinessUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, user, business)
            .await?;

        cart.items = self
            .items_repository
            .list_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            user_uuid = %user,
            business_uuid = %business,
            product_uuid = %item.product_uuid,
            quantity = item.quantity,
            cart_uuid = tracing::field::Empty,
            unit_price = tracing::field::Empty
        ),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        business: BusinessUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let quantity = checked_quantity(item.quantity)?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, user, business)
            .await?;

        let product = self
            .products_repository
            .get_product(&mut tx, item.product_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => CartsServiceError::ProductNotFound,
                other => other.into(),
            })?;

        let span = Span::current();

        span.record("cart_uuid", tracing::field::display(cart.uuid));
        span.record("unit_price", product.price);

        let created = self
            .items_repository
            .upsert_cart_item(
                &mut tx,
                cart.uuid,
                product.uuid,
                quantity,
                checked_amount(product.price)?,
            )
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        self.record(
            &mut tx,
            user,
            AuditAction::CartItemAdded,
            cart.uuid,
            json!({
                "item_uuid": created.uuid.into_uuid(),
                "product_uuid": created.product_uuid.into_uuid(),
                "quantity": created.quantity,
                "unit_price": created.unit_price,
            }),
        )
        .await?;

        tx.commit().await?;

        info!(item_uuid = %created.uuid, "upserted cart item");

        Ok(created)
    }

    #[tracing::instrument(
        name = "carts.service.update_item_quantity",
        skip(self),
        fields(user_uuid = %user, item_uuid = %item),
        err
    )]
    async fn update_item_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let quantity = checked_quantity(quantity)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .items_repository
            .update_cart_item_quantity(&mut tx, user, item, quantity)
            .await?;

        self.carts_repository
            .touch_cart(&mut tx, updated.cart_uuid)
            .await?;

        self.record(
            &mut tx,
            user,
            AuditAction::CartItemUpdated,
            updated.cart_uuid,
            json!({
                "item_uuid": updated.uuid.into_uuid(),
                "quantity": updated.quantity,
            }),
        )
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(user_uuid = %user, item_uuid = %item),
        err
    )]
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let removed = self
            .items_repository
            .delete_cart_item(&mut tx, user, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        self.carts_repository
            .touch_cart(&mut tx, removed.cart_uuid)
            .await?;

        self.record(
            &mut tx,
            user,
            AuditAction::CartItemRemoved,
            removed.cart_uuid,
            json!({
                "item_uuid": item.into_uuid(),
                "product_uuid": removed.product_uuid.into_uuid(),
            }),
        )
        .await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.remove_product",
        skip(self),
        fields(user_uuid = %user, business_uuid = %business, product_uuid = %product),
        err
    )]
    async fn remove_product(
        &self,
        user: UserUuid,
        business: BusinessUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_cart(&mut tx, user, business)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .delete_cart_product(&mut tx, cart.uuid, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        self.record(
            &mut tx,
            user,
            AuditAction::CartItemRemoved,
            cart.uuid,
            json!({ "product_uuid": product.into_uuid() }),
        )
        .await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.clear_cart",
        skip(self),
        fields(
            user_uuid = %user,
            business_uuid = %business,
            removed = tracing::field::Empty
        ),
        err
    )]
    async fn clear_cart(
        &self,
        user: UserUuid,
        business: BusinessUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self
            .carts_repository
            .find_cart(&mut tx, user, business)
            .await?
        else {
            return Ok(());
        };

        let removed = self
            .items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        Span::current().record("removed", removed);

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        self.record(
            &mut tx,
            user,
            AuditAction::CartCleared,
            cart.uuid,
            json!({ "removed": removed }),
        )
        .await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.save_cart",
        skip(self, save),
        fields(
            user_uuid = %user,
            business_uuid = %business,
            cart_uuid = tracing::field::Empty,
            total = tracing::field::Empty
        ),
        err
    )]
    async fn save_cart(
        &self,
        user: UserUuid,
        business: BusinessUuid,
        save: SaveCart,
    ) -> Result<CartUuid, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.non_empty_cart(&mut tx, user, business).await?;

        let business = self
            .businesses_repository
            .get_business(&mut tx, business)
            .await?;

        let name = resolve_cart_name(save.name.as_deref(), cart.name.as_deref(), &business.name);

        let total = match save.total {
            Some(total) => total,
            None => compute_total(cart.items.iter().map(|item| (item.unit_price, item.quantity)))?,
        };

        let span = Span::current();

        span.record("cart_uuid", tracing::field::display(cart.uuid));
        span.record("total", total);

        let saved = self
            .carts_repository
            .save_cart(&mut tx, cart.uuid, &name, checked_amount(total)?)
            .await?;

        self.record(
            &mut tx,
            user,
            AuditAction::CartSaved,
            saved.uuid,
            json!({ "name": name, "total": total }),
        )
        .await?;

        tx.commit().await?;

        info!(cart_uuid = %saved.uuid, total, "saved cart");

        Ok(saved.uuid)
    }

    #[tracing::instrument(
        name = "carts.service.finalize_cart",
        skip(self, finalize),
        fields(
            user_uuid = %user,
            business_uuid = %business,
            cart_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn finalize_cart(
        &self,
        user: UserUuid,
        business: BusinessUuid,
        finalize: FinalizeCart,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.non_empty_cart(&mut tx, user, business).await?;

        Span::current().record("cart_uuid", tracing::field::display(cart.uuid));

        let business = self
            .businesses_repository
            .get_business(&mut tx, business)
            .await?;

        let name = resolve_cart_name(
            finalize.name.as_deref(),
            cart.name.as_deref(),
            &business.name,
        );

        let mut finalized = self
            .carts_repository
            .finalize_cart(&mut tx, cart.uuid, &name)
            .await?;

        finalized.items = cart.items;

        self.record(
            &mut tx,
            user,
            AuditAction::CartFinalized,
            finalized.uuid,
            json!({ "name": name, "items": finalized.items.len() }),
        )
        .await?;

        tx.commit().await?;

        info!(cart_uuid = %finalized.uuid, "finalized cart");

        Ok(finalized)
    }

    #[tracing::instrument(
        name = "carts.service.shared_cart",
        skip(self),
        fields(cart_uuid = %cart),
        err
    )]
    async fn shared_cart(&self, cart: CartUuid) -> Result<SharedCartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.carts_repository.get_cart(&mut tx, cart).await?;

        let items = self
            .items_repository
            .list_cart_items(&mut tx, record.uuid)
            .await?;

        let business = self
            .businesses_repository
            .get_business(&mut tx, record.business_uuid)
            .await?;

        tx.commit().await?;

        let total = CartTotal::prefer_snapshot(record.total_snapshot, &items)?;

        Ok(SharedCartRecord {
            uuid: record.uuid,
            name: resolve_cart_name(None, record.name.as_deref(), &business.name),
            business_uuid: business.uuid,
            business_name: business.name,
            total,
            items: items.iter().map(SharedCartItem::from).collect(),
            updated_at: record.updated_at,
        })
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart for a business with its items, if one exists.
    async fn get_cart(
        &self,
        user: UserUuid,
        business: BusinessUuid,
    ) -> Result<Option<CartRecord>, CartsServiceError>;

    /// The user's cart for a business, created empty if it does not exist yet.
    async fn get_or_create_cart(
        &self,
        user: UserUuid,
        business: BusinessUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Add a product, or overwrite its quantity if already in the cart. The
    /// unit price is taken from the catalog's current price.
    async fn add_item(
        &self,
        user: UserUuid,
        business: BusinessUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Change the quantity of an item in one of the user's carts.
    async fn update_item_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove an item from one of the user's carts.
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError>;

    /// Remove a product from the user's cart for a business.
    async fn remove_product(
        &self,
        user: UserUuid,
        business: BusinessUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;

    /// Remove every item. Succeeds on empty or missing carts.
    async fn clear_cart(
        &self,
        user: UserUuid,
        business: BusinessUuid,
    ) -> Result<(), CartsServiceError>;

    /// Name the cart and store a total snapshot.
    async fn save_cart(
        &self,
        user: UserUuid,
        business: BusinessUuid,
        save: SaveCart,
    ) -> Result<CartUuid, CartsServiceError>;

    /// Name the cart and mark it as last touched now. Repeatable.
    async fn finalize_cart(
        &self,
        user: UserUuid,
        business: BusinessUuid,
        finalize: FinalizeCart,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Public read-only view of a cart.
    async fn shared_cart(&self, cart: CartUuid) -> Result<SharedCartRecord, CartsServiceError>;
}
