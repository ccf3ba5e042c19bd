//! Cart response models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foundry_app::domain::carts::{
    CartTotal, PricingError,
    records::{CartItemRecord, CartRecord, SharedCartItem, SharedCartRecord},
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The business this cart is for
    pub business_uuid: Uuid,

    /// The name given when the cart was saved or finalized
    pub name: Option<String>,

    /// The items in the cart, in insertion order
    pub items: Vec<CartItemResponse>,

    /// Sum of the current items in minor currency units
    pub total: u64,

    /// Always `live` for an active cart
    pub total_source: String,

    /// Total stored by the last save, shown on the shared view
    pub saved_total: Option<u64>,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl TryFrom<CartRecord> for CartResponse {
    type Error = PricingError;

    fn try_from(cart: CartRecord) -> Result<Self, Self::Error> {
        let total = cart.live_total()?;

        Ok(Self {
            uuid: cart.uuid.into_uuid(),
            business_uuid: cart.business_uuid.into_uuid(),
            name: cart.name,
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total: total.amount(),
            total_source: total.source().to_string(),
            saved_total: cart.total_snapshot,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        })
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The cart holding this item
    pub cart_uuid: Uuid,

    /// The unique identifier of the product in the cart item
    pub product_uuid: Uuid,

    /// Product name
    pub name: String,

    /// Product image URL
    pub image: Option<String>,

    /// Number of units
    pub quantity: u32,

    /// Price per unit captured when the item was last written
    pub unit_price: u64,

    /// The date and time the item was created
    pub created_at: String,

    /// The date and time the item was last updated
    pub updated_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            cart_uuid: item.cart_uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            name: item.product_name,
            image: item.product_image,
            quantity: item.quantity,
            unit_price: item.unit_price,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Shared Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SharedCartResponse {
    pub uuid: Uuid,
    pub name: String,
    pub business_uuid: Uuid,
    pub business_name: String,
    pub items: Vec<SharedCartItemResponse>,
    pub total: u64,
    pub total_source: String,
    pub updated_at: String,
}

impl From<SharedCartRecord> for SharedCartResponse {
    fn from(cart: SharedCartRecord) -> Self {
        let SharedCartRecord {
            uuid,
            name,
            business_uuid,
            business_name,
            total,
            items,
            updated_at,
        } = cart;

        Self {
            uuid: uuid.into_uuid(),
            name,
            business_uuid: business_uuid.into_uuid(),
            business_name,
            items: items.into_iter().map(Into::into).collect(),
            total: total.amount(),
            total_source: total.source().to_string(),
            updated_at: updated_at.to_string(),
        }
    }
}

/// Shared Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SharedCartItemResponse {
    pub product_uuid: Uuid,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub image: Option<String>,
}

impl From<SharedCartItem> for SharedCartItemResponse {
    fn from(item: SharedCartItem) -> Self {
        Self {
            product_uuid: item.product_uuid.into_uuid(),
            name: item.name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            image: item.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::test_helpers::{make_cart, make_item};

    use super::*;

    #[test]
    fn live_total_is_summed_from_items() -> Result<(), PricingError> {
        let cart = make_cart(vec![make_item(1000, 1), make_item(500, 3)], None);

        let response = CartResponse::try_from(cart)?;

        assert_eq!(response.total, 2500);
        assert_eq!(response.total_source, "live");
        assert_eq!(response.items.len(), 2);

        Ok(())
    }

    #[test]
    fn active_cart_total_ignores_saved_snapshot() -> Result<(), PricingError> {
        let cart = make_cart(
            vec![make_item(1000, 1), make_item(500, 3), make_item(4000, 1)],
            Some(2500),
        );

        let response = CartResponse::try_from(cart)?;

        assert_eq!(response.total, 6500);
        assert_eq!(response.total_source, "live");
        assert_eq!(response.saved_total, Some(2500));

        Ok(())
    }

    #[test]
    fn overflowing_items_are_rejected() {
        let cart = make_cart(vec![make_item(u64::MAX, 2)], None);

        assert_eq!(
            CartResponse::try_from(cart).err(),
            Some(PricingError::Overflow)
        );
    }

    #[test]
    fn shared_cart_reports_total_source() {
        let shared = SharedCartRecord {
            uuid: Uuid::nil().into(),
            name: "Coffee Cart".to_string(),
            business_uuid: Uuid::nil().into(),
            business_name: "Coffee".to_string(),
            total: CartTotal::Live(0),
            items: Vec::new(),
            updated_at: Timestamp::UNIX_EPOCH,
        };

        let response = SharedCartResponse::from(shared);

        assert_eq!(response.total_source, "live");
        assert!(response.items.is_empty());
    }
}
