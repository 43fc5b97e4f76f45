//! Public API surface for the FloatChat backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize (and, where they are read back, Deserialize).

pub use crate::routes::catalog::FloatCatalogData;
pub use crate::routes::catalog::RegionSummary;
pub use crate::routes::catalog::StatusCount;
pub use crate::routes::chat::ChatResponse;
pub use crate::routes::chat::ChatTurn;
pub use crate::routes::chat::ConversationSummary;
pub use crate::routes::chat::QuickQuery;
pub use crate::routes::chat::SidebarPayload;
pub use crate::routes::classify::AnalysisType;
pub use crate::routes::classify::ClassifyRequest;
pub use crate::routes::classify::PlotKind;
pub use crate::routes::classify::QueryClassification;
pub use crate::routes::export::ExportTable;
pub use crate::routes::export::ExportValue;
pub use crate::routes::export::EXPORT_FILE_NAME;
pub use crate::routes::plots::DepthTimeProfile;
pub use crate::routes::plots::HovmollerGrid;
pub use crate::routes::plots::PlotData;
pub use crate::routes::plots::PlotTrace;
pub use crate::routes::summary::ParameterSnapshot;
pub use crate::routes::summary::ParameterStats;

pub use crate::chat::store::{ConversationId, MessageId};
pub use crate::models::{
    AggregationMethod, FilterSpec, FloatLocation, FloatRecord, FloatStatus, FloatType, Parameter,
};
