use clap::{Args, Subcommand};

mod create;
mod link;
mod price;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Create a business category
    Category(create::CreateCategoryArgs),

    /// Create a business; its slug is derived from the name
    Business(create::CreateBusinessArgs),

    /// Create a requirement on a business
    Requirement(create::CreateRequirementArgs),

    /// Create a vendor
    Vendor(create::CreateVendorArgs),

    /// Create a product sold by a vendor
    Product(create::CreateProductArgs),

    /// Map a product onto a requirement
    Link(link::LinkArgs),

    /// Change a product's live price
    Price(price::PriceArgs),
}

pub(crate) async fn run(command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::Category(args) => create::category(args).await,
        CatalogSubcommand::Business(args) => create::business(args).await,
        CatalogSubcommand::Requirement(args) => create::requirement(args).await,
        CatalogSubcommand::Vendor(args) => create::vendor(args).await,
        CatalogSubcommand::Product(args) => create::product(args).await,
        CatalogSubcommand::Link(args) => link::run(args).await,
        CatalogSubcommand::Price(args) => price::run(args).await,
    }
}
