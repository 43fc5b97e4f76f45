//! Record filtering.
//!
//! # Example
//!
//! ```
//! use floatchat::models::{FilterSpec, FloatStatus};
//! use floatchat::services::catalog::generate_region_catalog;
//! use floatchat::transformations::apply_filters;
//!
//! let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let catalog = generate_region_catalog("arabian_sea", today);
//! let spec = FilterSpec::new()
//!     .with_statuses([FloatStatus::Active])
//!     .with_depth_range(0.0, 500.0);
//! let active_shallow = apply_filters(&catalog, &spec);
//! assert!(active_shallow.iter().all(|r| r.depth <= 500.0));
//! ```

pub mod filtering;

pub use filtering::{apply_filters, count_by_status, Filterable};
