pub mod filter;
pub mod float;
pub mod macros;
pub mod region;

pub use filter::*;
pub use float::*;
pub use region::{
    default_region, find_region, find_region_by_label, get_region_config, region_ids, GeoPoint,
    RegionConfig, DEFAULT_REGION, REGION_CONFIGS,
};
