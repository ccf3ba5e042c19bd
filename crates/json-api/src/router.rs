//! App Router

use salvo::Router;

use crate::{admin, auth, carts, catalog, healthcheck, observability};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("categories").get(catalog::categories::handler))
        .push(
            Router::with_path("businesses")
                .get(catalog::businesses::handler)
                .push(
                    Router::with_path("{business}")
                        .get(catalog::business::handler)
                        .push(cart_router()),
                ),
        )
        .push(
            Router::with_path("cart-items/{item}")
                .hoop(auth::middleware::handler)
                .patch(carts::items::update::handler)
                .delete(carts::items::delete::handler),
        )
        .push(Router::with_path("shared-carts/{cart}").get(carts::shared::handler))
        .push(
            Router::with_path("admin")
                .hoop(auth::middleware::handler)
                .push(Router::with_path("audit-events").get(admin::audit_events::handler)),
        )
}

/// Routes under `/businesses/{business}/cart`.
fn cart_router() -> Router {
    Router::with_path("cart")
        .hoop(auth::middleware::handler)
        .get(carts::get::handler)
        .push(Router::with_path("items").post(carts::add_item::handler))
        .push(
            Router::with_path("products/{product}").delete(carts::remove_product::handler),
        )
        .push(Router::with_path("clear").post(carts::clear::handler))
        .push(Router::with_path("save").post(carts::save::handler))
        .push(Router::with_path("finalize").post(carts::finalize::handler))
}
