//! Catalog Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use smallvec::SmallVec;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Business UUID
pub type BusinessUuid = TypedUuid<BusinessRecord>;

/// Requirement UUID
pub type RequirementUuid = TypedUuid<RequirementRecord>;

/// Vendor UUID
pub type VendorUuid = TypedUuid<VendorRecord>;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub created_at: Timestamp,
}

/// Business Record
#[derive(Debug, Clone)]
pub struct BusinessRecord {
    pub uuid: BusinessUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,

    /// URL-safe identifier derived from the name at creation. Never changes.
    pub slug: String,

    pub description: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BusinessRecord {
    /// Name used for carts that were never given one.
    #[must_use]
    pub fn default_cart_name(&self) -> String {
        default_cart_name(&self.name)
    }
}

/// `"<business name> Cart"`
#[must_use]
pub fn default_cart_name(business_name: &str) -> String {
    format!("{business_name} Cart")
}

/// How strongly a business needs a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Necessity {
    Required,
    Recommended,
    Optional,
}

impl Necessity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Recommended => "recommended",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for Necessity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown necessity: {0}")]
pub struct UnknownNecessity(String);

impl FromStr for Necessity {
    type Err = UnknownNecessity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "required" => Ok(Self::Required),
            "recommended" => Ok(Self::Recommended),
            "optional" => Ok(Self::Optional),
            other => Err(UnknownNecessity(other.to_string())),
        }
    }
}

/// Requirement Record
#[derive(Debug, Clone)]
pub struct RequirementRecord {
    pub uuid: RequirementUuid,
    pub business_uuid: BusinessUuid,
    pub name: String,

    /// Free-text grouping label, e.g. "Equipment".
    pub category: String,

    pub necessity: Necessity,
    pub created_at: Timestamp,
}

/// Vendor Record
#[derive(Debug, Clone)]
pub struct VendorRecord {
    pub uuid: VendorUuid,
    pub name: String,
    pub url: Option<String>,
    pub created_at: Timestamp,
}

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub vendor_uuid: VendorUuid,
    pub name: String,

    /// Current price in minor units.
    pub price: u64,

    pub image: Option<String>,
    pub url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product offered against a requirement, with its vendor's name.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub image: Option<String>,
    pub url: Option<String>,
    pub vendor_name: String,
}

/// Products mapped onto a requirement. Most requirements list a handful.
pub type RequirementProducts = SmallVec<[RequirementProduct; 4]>;

#[derive(Debug, Clone)]
pub struct RequirementDetail {
    pub requirement: RequirementRecord,
    pub products: RequirementProducts,
}

/// A business with everything needed to start it.
#[derive(Debug, Clone)]
pub struct BusinessDetail {
    pub business: BusinessRecord,
    pub requirements: Vec<RequirementDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn necessity_parses_known_values() {
        for necessity in [
            Necessity::Required,
            Necessity::Recommended,
            Necessity::Optional,
        ] {
            let parsed: Result<Necessity, _> = necessity.as_str().parse();

            assert!(matches!(parsed, Ok(value) if value == necessity));
        }
    }

    #[test]
    fn necessity_rejects_unknown_value() {
        assert!("mandatory".parse::<Necessity>().is_err());
    }

    #[test]
    fn default_cart_name_appends_cart() {
        assert_eq!(default_cart_name("Food Truck"), "Food Truck Cart");
    }
}
