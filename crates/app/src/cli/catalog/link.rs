use clap::Args;
use foundry_app::domain::catalog::{
    CatalogService, PgCatalogService,
    records::{ProductUuid, RequirementUuid},
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct LinkArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    requirement_uuid: Uuid,

    #[arg(long)]
    product_uuid: Uuid,
}

pub(crate) async fn run(args: LinkArgs) -> Result<(), String> {
    let service = PgCatalogService::new(args.database.db().await?);

    let linked = service
        .link_requirement_product(
            RequirementUuid::from_uuid(args.requirement_uuid),
            ProductUuid::from_uuid(args.product_uuid),
        )
        .await
        .map_err(|error| format!("failed to link product: {error}"))?;

    if linked {
        println!(
            "linked product {} to requirement {}",
            args.product_uuid, args.requirement_uuid
        );
    } else {
        println!(
            "product {} was already linked to requirement {}",
            args.product_uuid, args.requirement_uuid
        );
    }

    Ok(())
}
