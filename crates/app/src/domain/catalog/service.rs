//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewBusiness, NewCategory, NewProduct, NewRequirement, NewVendor},
        errors::CatalogServiceError,
        records::{
            BusinessDetail, BusinessRecord, CategoryRecord, CategoryUuid, ProductRecord,
            ProductUuid, RequirementDetail, RequirementProducts, RequirementRecord,
            RequirementUuid, VendorRecord,
        },
        repositories::{
            PgBusinessesRepository, PgCategoriesRepository, PgProductsRepository,
            PgRequirementsRepository, PgVendorsRepository,
        },
        slug::slugify,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    categories: PgCategoriesRepository,
    businesses: PgBusinessesRepository,
    requirements: PgRequirementsRepository,
    vendors: PgVendorsRepository,
    products: PgProductsRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            categories: PgCategoriesRepository::new(),
            businesses: PgBusinessesRepository::new(),
            requirements: PgRequirementsRepository::new(),
            vendors: PgVendorsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.categories.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn list_businesses(
        &self,
        category: Option<CategoryUuid>,
    ) -> Result<Vec<BusinessRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let businesses = self.businesses.list_businesses(&mut tx, category).await?;

        tx.commit().await?;

        Ok(businesses)
    }

    #[tracing::instrument(
        name = "catalog.service.get_business_by_slug",
        skip(self),
        fields(
            business_uuid = tracing::field::Empty,
            requirement_count = tracing::field::Empty
        ),
        err
    )]
    async fn get_business_by_slug(
        &self,
        slug: &str,
    ) -> Result<BusinessDetail, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let business = self.businesses.get_business_by_slug(&mut tx, slug).await?;

        let requirements = self
            .requirements
            .list_business_requirements(&mut tx, business.uuid)
            .await?;

        let linked = self
            .requirements
            .list_requirement_products(&mut tx, business.uuid)
            .await?;

        tx.commit().await?;

        let span = tracing::Span::current();

        span.record("business_uuid", tracing::field::display(business.uuid));
        span.record(
            "requirement_count",
            tracing::field::display(requirements.len()),
        );

        let mut products: FxHashMap<RequirementUuid, RequirementProducts> = FxHashMap::default();

        for link in linked {
            products
                .entry(link.requirement_uuid)
                .or_default()
                .push(link.product);
        }

        let requirements = requirements
            .into_iter()
            .map(|requirement| RequirementDetail {
                products: products.remove(&requirement.uuid).unwrap_or_default(),
                requirement,
            })
            .collect();

        Ok(BusinessDetail {
            business,
            requirements,
        })
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError> {
        if category.name.trim().is_empty() {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let record = self.categories.create_category(&mut tx, category).await?;

        tx.commit().await?;

        info!(category_uuid = %record.uuid, "created category");

        Ok(record)
    }

    #[tracing::instrument(
        name = "catalog.service.create_business",
        skip(self, business),
        fields(business_uuid = %business.uuid, slug = tracing::field::Empty),
        err
    )]
    async fn create_business(
        &self,
        business: NewBusiness,
    ) -> Result<BusinessRecord, CatalogServiceError> {
        let slug = slugify(&business.name);

        if slug.is_empty() {
            return Err(CatalogServiceError::InvalidData);
        }

        tracing::Span::current().record("slug", tracing::field::display(&slug));

        let mut tx = self.db.begin().await?;

        let record = self
            .businesses
            .create_business(&mut tx, business, &slug)
            .await?;

        tx.commit().await?;

        info!(business_uuid = %record.uuid, slug = %record.slug, "created business");

        Ok(record)
    }

    async fn create_requirement(
        &self,
        requirement: NewRequirement,
    ) -> Result<RequirementRecord, CatalogServiceError> {
        if requirement.name.trim().is_empty() {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let record = self
            .requirements
            .create_requirement(&mut tx, requirement)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_vendor(&self, vendor: NewVendor) -> Result<VendorRecord, CatalogServiceError> {
        if vendor.name.trim().is_empty() {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let record = self.vendors.create_vendor(&mut tx, vendor).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let price = i64::try_from(product.price)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .products
            .create_product(&mut tx, product, price)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "catalog.service.update_product_price",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn update_product_price(
        &self,
        product: ProductUuid,
        price: u64,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let price = i64::try_from(price)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .products
            .update_product_price(&mut tx, product, price)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn link_requirement_product(
        &self,
        requirement: RequirementUuid,
        product: ProductUuid,
    ) -> Result<bool, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let linked = self
            .requirements
            .link_requirement_product(&mut tx, requirement, product)
            .await?;

        tx.commit().await?;

        Ok(linked)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// All categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError>;

    /// Businesses ordered by name, optionally narrowed to one category.
    async fn list_businesses(
        &self,
        category: Option<CategoryUuid>,
    ) -> Result<Vec<BusinessRecord>, CatalogServiceError>;

    /// A business with its requirements and the products mapped onto each.
    async fn get_business_by_slug(
        &self,
        slug: &str,
    ) -> Result<BusinessDetail, CatalogServiceError>;

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError>;

    /// Creates a business, deriving its slug from the name.
    async fn create_business(
        &self,
        business: NewBusiness,
    ) -> Result<BusinessRecord, CatalogServiceError>;

    async fn create_requirement(
        &self,
        requirement: NewRequirement,
    ) -> Result<RequirementRecord, CatalogServiceError>;

    async fn create_vendor(&self, vendor: NewVendor) -> Result<VendorRecord, CatalogServiceError>;

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Changes the live price. Prices already captured on cart items keep
    /// their old value.
    async fn update_product_price(
        &self,
        product: ProductUuid,
        price: u64,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Maps a product onto a requirement. Returns `false` if it was already mapped.
    async fn link_requirement_product(
        &self,
        requirement: RequirementUuid,
        product: ProductUuid,
    ) -> Result<bool, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::catalog::records::{BusinessUuid, Necessity, VendorUuid},
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn create_business_derives_slug() -> TestResult {
        let ctx = TestContext::new().await;

        let business = ctx
            .catalog
            .create_business(NewBusiness {
                uuid: BusinessUuid::new(),
                category_uuid: ctx.category_uuid,
                name: "Mobile Coffee Cart!".to_string(),
                description: String::new(),
                image: None,
            })
            .await?;

        assert_eq!(business.slug, "mobile-coffee-cart");

        Ok(())
    }

    #[tokio::test]
    async fn create_business_duplicate_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .create_business(NewBusiness {
                uuid: BusinessUuid::new(),
                category_uuid: ctx.category_uuid,
                name: ctx.business.name.to_uppercase(),
                description: String::new(),
                image: None,
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_business_without_alphanumerics_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .create_business(NewBusiness {
                uuid: BusinessUuid::new(),
                category_uuid: ctx.category_uuid,
                name: "???".to_string(),
                description: String::new(),
                image: None,
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_business_unknown_category_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .create_business(NewBusiness {
                uuid: BusinessUuid::new(),
                category_uuid: CategoryUuid::new(),
                name: "Orphan".to_string(),
                description: String::new(),
                image: None,
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_businesses_filters_by_category() -> TestResult {
        let ctx = TestContext::new().await;

        let other = ctx
            .catalog
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "Services".to_string(),
            })
            .await?;

        ctx.catalog
            .create_business(NewBusiness {
                uuid: BusinessUuid::new(),
                category_uuid: other.uuid,
                name: "Dog Walking".to_string(),
                description: String::new(),
                image: None,
            })
            .await?;

        let all = ctx.catalog.list_businesses(None).await?;
        let filtered = ctx.catalog.list_businesses(Some(other.uuid)).await?;

        assert_eq!(all.len(), 2);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.iter().all(|b| b.category_uuid == other.uuid));

        let names: Vec<_> = all.iter().map(|b| b.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();

        assert_eq!(names, sorted, "businesses should be ordered by name");

        Ok(())
    }

    #[tokio::test]
    async fn get_business_by_slug_groups_products_per_requirement() -> TestResult {
        let ctx = TestContext::new().await;

        let espresso = ctx
            .catalog
            .create_requirement(NewRequirement {
                uuid: RequirementUuid::new(),
                business_uuid: ctx.business.uuid,
                name: "Espresso machine".to_string(),
                category: "Equipment".to_string(),
                necessity: Necessity::Required,
            })
            .await?;

        let permit = ctx
            .catalog
            .create_requirement(NewRequirement {
                uuid: RequirementUuid::new(),
                business_uuid: ctx.business.uuid,
                name: "Vendor permit".to_string(),
                category: "Legal".to_string(),
                necessity: Necessity::Recommended,
            })
            .await?;

        let cheap = ctx.create_product("Single group", 1000).await;
        let pricey = ctx.create_product("Double group", 2500).await;

        assert!(
            ctx.catalog
                .link_requirement_product(espresso.uuid, pricey)
                .await?
        );
        assert!(
            ctx.catalog
                .link_requirement_product(espresso.uuid, cheap)
                .await?
        );
        assert!(
            !ctx.catalog
                .link_requirement_product(espresso.uuid, cheap)
                .await?,
            "relinking should report an existing mapping"
        );

        let detail = ctx.catalog.get_business_by_slug(&ctx.business.slug).await?;

        assert_eq!(detail.business.uuid, ctx.business.uuid);
        assert_eq!(detail.requirements.len(), 2);

        let espresso_detail = detail
            .requirements
            .iter()
            .find(|r| r.requirement.uuid == espresso.uuid)
            .ok_or("espresso requirement missing")?;

        let prices: Vec<_> = espresso_detail.products.iter().map(|p| p.price).collect();

        assert_eq!(prices, vec![1000, 2500]);
        assert!(
            espresso_detail
                .products
                .iter()
                .all(|p| p.vendor_name == "Test Vendor")
        );

        let permit_detail = detail
            .requirements
            .iter()
            .find(|r| r.requirement.uuid == permit.uuid)
            .ok_or("permit requirement missing")?;

        assert!(permit_detail.products.is_empty());
        assert_eq!(permit_detail.requirement.necessity, Necessity::Recommended);

        Ok(())
    }

    #[tokio::test]
    async fn get_business_by_unknown_slug_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_business_by_slug("nowhere").await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_product_price_changes_live_price() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Grinder", 4500).await;

        let updated = ctx.catalog.update_product_price(product, 4999).await?;

        assert_eq!(updated.price, 4999);

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_product_price_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .update_product_price(ProductUuid::new(), 100)
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_unknown_vendor_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                vendor_uuid: VendorUuid::new(),
                name: "Ghost".to_string(),
                price: 100,
                image: None,
                url: None,
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }
}
