//! Cart Data

use crate::domain::catalog::records::ProductUuid;

/// Item to add to (or overwrite in) a cart. The unit price is captured
/// from the catalog at write time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Save Cart Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveCart {
    pub name: Option<String>,

    /// Total to store as the snapshot. Recomputed from the items when absent.
    pub total: Option<u64>,
}

/// Finalize Cart Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinalizeCart {
    pub name: Option<String>,
}
