//! Test helpers.

use std::sync::Arc;

use foundry_app::{
    auth::{AuthenticatedUser, MockAuthService},
    context::AppContext,
    domain::{
        audit::MockAuditService,
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
        },
        catalog::{MockCatalogService, records::ProductUuid},
        users::records::UserUuid,
    },
};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_CART_UUID: CartUuid = CartUuid::from_uuid(Uuid::nil());

pub(crate) fn make_item(unit_price: u64, quantity: u32) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        cart_uuid: TEST_CART_UUID,
        product_uuid: ProductUuid::new(),
        product_name: "Espresso Machine".to_string(),
        product_image: None,
        quantity,
        unit_price,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(items: Vec<CartItemRecord>, total_snapshot: Option<u64>) -> CartRecord {
    CartRecord {
        uuid: TEST_CART_UUID,
        user_uuid: TEST_USER_UUID,
        business_uuid: Uuid::nil().into(),
        name: None,
        total_snapshot,
        items,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Mocks with no expectations; any call fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) carts: MockCartsService,
    pub(crate) catalog: MockCatalogService,
    pub(crate) audit: MockAuditService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            carts: Arc::new(self.carts),
            catalog: Arc::new(self.catalog),
            audit: Arc::new(self.audit),
            auth: Arc::new(self.auth),
        })
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user(AuthenticatedUser {
        uuid: TEST_USER_UUID,
        is_admin: false,
    });

    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user(AuthenticatedUser {
        uuid: TEST_USER_UUID,
        is_admin: true,
    });

    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}

/// A service for handlers behind the auth middleware, acting as a regular user.
pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(
                Mocks {
                    carts,
                    ..Mocks::default()
                }
                .into_state(),
            ))
            .hoop(inject_user)
            .push(route),
    )
}

/// A service for public handlers: no user is injected.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

pub(crate) fn audit_service(audit: MockAuditService, admin: bool, route: Router) -> Service {
    let state = Mocks {
        audit,
        ..Mocks::default()
    }
    .into_state();

    let router = Router::new().hoop(inject(state));

    let router = if admin {
        router.hoop(inject_admin)
    } else {
        router.hoop(inject_user)
    };

    Service::new(router.push(route))
}
