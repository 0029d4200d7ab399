//! Analysis inputs and outputs.

use crate::{
    model::analysis::{AnalysisItemDto, AnalysisJobDto},
    server::model::link::LinkedChannel,
};

/// Metrics of one linked channel fed to the calculator and the external service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisItem {
    pub channel_id: i32,
    pub views: Option<i64>,
    pub repost_level: Option<i32>,
    pub subscribers: Option<i64>,
}

impl AnalysisItem {
    pub fn from_linked(linked: &LinkedChannel) -> Self {
        Self {
            channel_id: linked.channel_id,
            views: linked.views,
            repost_level: linked.repost_level,
            subscribers: linked.subscribers,
        }
    }
}

/// Calculator output persisted on a completed request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOutcome {
    /// Percentage of the audience reached.
    pub coverage: f64,
    /// Ratio of repost views to original-post views.
    pub coefficient: f64,
}

/// Work item handed to the external analysis service after a request completes.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisJob {
    pub request_id: i32,
    pub items: Vec<AnalysisItem>,
}

impl AnalysisJob {
    pub fn into_dto(self) -> AnalysisJobDto {
        AnalysisJobDto {
            request_id: self.request_id,
            items: self
                .items
                .into_iter()
                .map(|item| AnalysisItemDto {
                    channel_id: item.channel_id,
                    views: item.views,
                    repost_level: item.repost_level,
                    subscribers: item.subscribers,
                })
                .collect(),
        }
    }
}
