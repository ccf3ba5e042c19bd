//! Catalog Repositories

mod businesses;
mod categories;
mod products;
mod requirements;
mod vendors;

pub(crate) use businesses::PgBusinessesRepository;
pub(crate) use categories::PgCategoriesRepository;
pub(crate) use products::PgProductsRepository;
pub(crate) use requirements::PgRequirementsRepository;
pub(crate) use vendors::PgVendorsRepository;
