use clap::Args;
use foundry_app::domain::catalog::{CatalogService, PgCatalogService, records::ProductUuid};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct PriceArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    product_uuid: Uuid,

    /// New price in minor currency units
    #[arg(long)]
    price: u64,
}

pub(crate) async fn run(args: PriceArgs) -> Result<(), String> {
    let service = PgCatalogService::new(args.database.db().await?);

    let product = service
        .update_product_price(ProductUuid::from_uuid(args.product_uuid), args.price)
        .await
        .map_err(|error| format!("failed to update price: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_price: {}", product.price);

    Ok(())
}
