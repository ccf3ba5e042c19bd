//! Catalog response models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foundry_app::domain::catalog::records::{
    BusinessDetail, BusinessRecord, CategoryRecord, RequirementDetail, RequirementProduct,
};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            name: category.name,
        }
    }
}

/// Business Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BusinessResponse {
    pub uuid: Uuid,
    pub category_uuid: Uuid,
    pub name: String,

    /// URL key, derived from the name
    pub slug: String,

    pub description: String,
    pub image: Option<String>,
}

impl From<BusinessRecord> for BusinessResponse {
    fn from(business: BusinessRecord) -> Self {
        Self {
            uuid: business.uuid.into_uuid(),
            category_uuid: business.category_uuid.into_uuid(),
            name: business.name,
            slug: business.slug,
            description: business.description,
            image: business.image,
        }
    }
}

/// Business Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BusinessDetailResponse {
    #[serde(flatten)]
    pub business: BusinessResponse,

    pub requirements: Vec<RequirementResponse>,
}

impl From<BusinessDetail> for BusinessDetailResponse {
    fn from(detail: BusinessDetail) -> Self {
        Self {
            business: detail.business.into(),
            requirements: detail.requirements.into_iter().map(Into::into).collect(),
        }
    }
}

/// Requirement Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RequirementResponse {
    pub uuid: Uuid,
    pub name: String,
    pub category: String,

    /// `required`, `recommended` or `optional`
    pub necessity: String,

    pub products: Vec<RequirementProductResponse>,
}

impl From<RequirementDetail> for RequirementResponse {
    fn from(detail: RequirementDetail) -> Self {
        let RequirementDetail {
            requirement,
            products,
        } = detail;

        Self {
            uuid: requirement.uuid.into_uuid(),
            name: requirement.name,
            category: requirement.category,
            necessity: requirement.necessity.to_string(),
            products: products.into_iter().map(Into::into).collect(),
        }
    }
}

/// Requirement Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RequirementProductResponse {
    pub uuid: Uuid,
    pub name: String,

    /// Current price in minor currency units
    pub price: u64,

    pub image: Option<String>,
    pub url: Option<String>,
    pub vendor_name: String,
}

impl From<RequirementProduct> for RequirementProductResponse {
    fn from(product: RequirementProduct) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            price: product.price,
            image: product.image,
            url: product.url,
            vendor_name: product.vendor_name,
        }
    }
}
