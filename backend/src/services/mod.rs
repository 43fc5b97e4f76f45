//! Service layer.
//!
//! Pure functions over the synthetic catalogs: generation, classification,
//! aggregation, export projection, plot synthesis and chat answers. Nothing in
//! here holds state; callers pass the data and the reference date in.

pub mod catalog;
pub mod classifier;
pub mod export;
pub mod plots;
pub mod responder;
pub mod seed;
pub mod summary;

pub use catalog::{build_filtered_dataset, generate_catalog, generate_catalog_at, generate_region_catalog};
pub use classifier::{classify, classify_for};
pub use export::project_for_export;
pub use responder::respond;
pub use seed::{derive_seed, rng_for};
pub use summary::summarize;
