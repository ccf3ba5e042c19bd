//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        carts::pricing::{CartTotal, PricingError, compute_total},
        catalog::records::{BusinessUuid, ProductUuid, default_cart_name},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub business_uuid: BusinessUuid,
    pub name: Option<String>,

    /// Total stored by the last save, in minor units.
    pub total_snapshot: Option<u64>,

    /// Items in insertion order.
    pub items: Vec<CartItemRecord>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    /// Sum of the current items. Active carts are always priced this way;
    /// the saved snapshot only backs the shared view.
    pub fn live_total(&self) -> Result<CartTotal, PricingError> {
        compute_total(self.items.iter().map(|item| (item.unit_price, item.quantity)))
            .map(CartTotal::Live)
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_image: Option<String>,
    pub quantity: u32,

    /// Product price captured when the item was last written.
    pub unit_price: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public view of a cart, reachable by anyone holding its UUID.
#[derive(Debug, Clone)]
pub struct SharedCartRecord {
    pub uuid: CartUuid,
    pub name: String,
    pub business_uuid: BusinessUuid,
    pub business_name: String,
    pub total: CartTotal,
    pub items: Vec<SharedCartItem>,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SharedCartItem {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub image: Option<String>,
}

impl From<&CartItemRecord> for SharedCartItem {
    fn from(item: &CartItemRecord) -> Self {
        Self {
            product_uuid: item.product_uuid,
            name: item.product_name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            image: item.product_image.clone(),
        }
    }
}

/// Pick a cart's display name: the supplied one, then the stored one, then
/// `"<business name> Cart"`. Blank names count as absent.
#[must_use]
pub fn resolve_cart_name(
    supplied: Option<&str>,
    existing: Option<&str>,
    business_name: &str,
) -> String {
    supplied
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .or_else(|| existing.map(str::trim).filter(|name| !name.is_empty()))
        .map_or_else(|| default_cart_name(business_name), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplied_name_wins() {
        assert_eq!(
            resolve_cart_name(Some("Launch kit"), Some("Old"), "Bakery"),
            "Launch kit"
        );
    }

    #[test]
    fn existing_name_used_when_none_supplied() {
        assert_eq!(resolve_cart_name(None, Some("Old"), "Bakery"), "Old");
    }

    #[test]
    fn blank_names_fall_back_to_business_name() {
        assert_eq!(
            resolve_cart_name(Some("   "), Some(""), "Bakery"),
            "Bakery Cart"
        );
        assert_eq!(resolve_cart_name(None, None, "Bakery"), "Bakery Cart");
    }
}
