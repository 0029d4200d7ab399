use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One link's metrics as sent to the external analysis service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct AnalysisItemDto {
    pub channel_id: i32,
    pub views: Option<i64>,
    pub repost_level: Option<i32>,
    pub subscribers: Option<i64>,
}

/// Payload posted to the external analysis service after a request completes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct AnalysisJobDto {
    pub request_id: i32,
    pub items: Vec<AnalysisItemDto>,
}

/// Result body the external analysis service sends back.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct AnalysisResultDto {
    pub request_id: i32,
    pub coverage: f64,
    pub coefficient: f64,
}
