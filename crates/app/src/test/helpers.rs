//! Test Helpers

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, data::NewCartItem, records::CartItemRecord},
        catalog::records::ProductUuid,
    },
    test::TestContext,
};

/// Add `product` to the context user's cart for the context business.
pub(crate) async fn add(
    ctx: &TestContext,
    product: ProductUuid,
    quantity: u32,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            ctx.user_uuid,
            ctx.business.uuid,
            NewCartItem {
                product_uuid: product,
                quantity,
            },
        )
        .await
}
