//! Catalog Data

use crate::domain::catalog::records::{
    BusinessUuid, CategoryUuid, Necessity, ProductUuid, RequirementUuid, VendorUuid,
};

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
}

/// New Business Data
///
/// The slug is derived from `name` when the business is created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBusiness {
    pub uuid: BusinessUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

/// New Requirement Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequirement {
    pub uuid: RequirementUuid,
    pub business_uuid: BusinessUuid,
    pub name: String,
    pub category: String,
    pub necessity: Necessity,
}

/// New Vendor Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewVendor {
    pub uuid: VendorUuid,
    pub name: String,
    pub url: Option<String>,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub vendor_uuid: VendorUuid,
    pub name: String,
    pub price: u64,
    pub image: Option<String>,
    pub url: Option<String>,
}
