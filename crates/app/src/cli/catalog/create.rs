use clap::Args;
use foundry_app::domain::catalog::{
    CatalogService, PgCatalogService,
    data::{NewBusiness, NewCategory, NewProduct, NewRequirement, NewVendor},
    records::{BusinessUuid, CategoryUuid, Necessity, ProductUuid, RequirementUuid, VendorUuid},
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    name: String,
}

#[derive(Debug, Args)]
pub(crate) struct CreateBusinessArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    category_uuid: Uuid,

    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Image URL
    #[arg(long)]
    image: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct CreateRequirementArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    business_uuid: Uuid,

    #[arg(long)]
    name: String,

    /// Free-form grouping label, e.g. "Equipment"
    #[arg(long)]
    category: String,

    /// One of required, recommended or optional
    #[arg(long, default_value = "required")]
    necessity: Necessity,
}

#[derive(Debug, Args)]
pub(crate) struct CreateVendorArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    name: String,

    #[arg(long)]
    url: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    vendor_uuid: Uuid,

    #[arg(long)]
    name: String,

    /// Price in minor currency units
    #[arg(long)]
    price: u64,

    #[arg(long)]
    image: Option<String>,

    #[arg(long)]
    url: Option<String>,
}

async fn service(database: &DatabaseArgs) -> Result<PgCatalogService, String> {
    database.db().await.map(PgCatalogService::new)
}

pub(crate) async fn category(args: CreateCategoryArgs) -> Result<(), String> {
    let category = service(&args.database)
        .await?
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_name: {}", category.name);

    Ok(())
}

pub(crate) async fn business(args: CreateBusinessArgs) -> Result<(), String> {
    let business = service(&args.database)
        .await?
        .create_business(NewBusiness {
            uuid: BusinessUuid::new(),
            category_uuid: CategoryUuid::from_uuid(args.category_uuid),
            name: args.name,
            description: args.description,
            image: args.image,
        })
        .await
        .map_err(|error| format!("failed to create business: {error}"))?;

    println!("business_uuid: {}", business.uuid);
    println!("business_name: {}", business.name);
    println!("business_slug: {}", business.slug);

    Ok(())
}

pub(crate) async fn requirement(args: CreateRequirementArgs) -> Result<(), String> {
    let requirement = service(&args.database)
        .await?
        .create_requirement(NewRequirement {
            uuid: RequirementUuid::new(),
            business_uuid: BusinessUuid::from_uuid(args.business_uuid),
            name: args.name,
            category: args.category,
            necessity: args.necessity,
        })
        .await
        .map_err(|error| format!("failed to create requirement: {error}"))?;

    println!("requirement_uuid: {}", requirement.uuid);
    println!("requirement_name: {}", requirement.name);
    println!("requirement_necessity: {}", requirement.necessity);

    Ok(())
}

pub(crate) async fn vendor(args: CreateVendorArgs) -> Result<(), String> {
    let vendor = service(&args.database)
        .await?
        .create_vendor(NewVendor {
            uuid: VendorUuid::new(),
            name: args.name,
            url: args.url,
        })
        .await
        .map_err(|error| format!("failed to create vendor: {error}"))?;

    println!("vendor_uuid: {}", vendor.uuid);
    println!("vendor_name: {}", vendor.name);

    Ok(())
}

pub(crate) async fn product(args: CreateProductArgs) -> Result<(), String> {
    let product = service(&args.database)
        .await?
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            vendor_uuid: VendorUuid::from_uuid(args.vendor_uuid),
            name: args.name,
            price: args.price,
            image: args.image,
            url: args.url,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_name: {}", product.name);
    println!("product_price: {}", product.price);

    Ok(())
}
