//! Searching request domain models, lifecycle helpers and parameters.

use chrono::{DateTime, NaiveDate, Utc};
use entity::sea_orm_active_enums::RequestStatus;
use sea_orm::ActiveEnum;
use std::str::FromStr;

use crate::{
    model::request::{DraftBadgeDto, RequestDetailDto, RequestDto},
    server::{error::AppError, model::link::LinkedChannel},
};

/// Integer code of a status as stored and exposed on the wire.
pub fn status_code(status: RequestStatus) -> i32 {
    status.to_value()
}

/// Parses a wire status code.
///
/// # Returns
/// - `Some(RequestStatus)` - Code is one of 1..=5
/// - `None` - Unknown code
pub fn status_from_code(code: i32) -> Option<RequestStatus> {
    RequestStatus::try_from_value(&code).ok()
}

pub fn status_name(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Draft => "draft",
        RequestStatus::Formed => "formed",
        RequestStatus::Completed => "completed",
        RequestStatus::Rejected => "rejected",
        RequestStatus::Deleted => "deleted",
    }
}

/// Whether a moderator has already completed or rejected the request.
pub fn is_resolved(status: RequestStatus) -> bool {
    matches!(status, RequestStatus::Completed | RequestStatus::Rejected)
}

/// Searching request header without its links.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchingRequest {
    pub id: i32,
    pub status: RequestStatus,
    pub creation_date: DateTime<Utc>,
    pub creator_id: i32,
    pub moderator_id: Option<i32>,
    pub forming_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub coverage: Option<f64>,
    pub coefficient: Option<f64>,
}

impl SearchingRequest {
    /// Converts an entity model to a request domain model at the repository boundary.
    pub fn from_entity(entity: entity::searching_request::Model) -> Self {
        Self {
            id: entity.id,
            status: entity.status,
            creation_date: entity.creation_date,
            creator_id: entity.creator_id,
            moderator_id: entity.moderator_id,
            forming_date: entity.forming_date,
            completion_date: entity.completion_date,
            description: entity.description,
            coverage: entity.coverage,
            coefficient: entity.coefficient,
        }
    }

    pub fn into_dto(self) -> RequestDto {
        RequestDto {
            id: self.id,
            status: status_code(self.status),
            status_name: status_name(self.status).to_string(),
            creation_date: self.creation_date,
            creator_id: self.creator_id,
            moderator_id: self.moderator_id,
            forming_date: self.forming_date,
            completion_date: self.completion_date,
            description: self.description,
            coverage: self.coverage,
            coefficient: self.coefficient,
        }
    }
}

/// Request together with its links and the linked channels' details.
#[derive(Debug, Clone)]
pub struct RequestDetail {
    pub request: SearchingRequest,
    pub channels: Vec<LinkedChannel>,
}

impl RequestDetail {
    pub fn into_dto(self) -> RequestDetailDto {
        RequestDetailDto {
            request: self.request.into_dto(),
            channels: self
                .channels
                .into_iter()
                .map(LinkedChannel::into_dto)
                .collect(),
        }
    }
}

/// Cart badge: the caller's draft id and how many channels it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftBadge {
    pub request_id: Option<i32>,
    pub count: u64,
}

impl DraftBadge {
    pub fn into_dto(self) -> DraftBadgeDto {
        DraftBadgeDto {
            request_id: self.request_id,
            count: self.count,
        }
    }
}

/// Moderator decision on a formed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAction {
    Complete,
    Reject,
}

impl ResolveAction {
    /// Terminal status the action moves a formed request into.
    pub fn target_status(self) -> RequestStatus {
        match self {
            Self::Complete => RequestStatus::Completed,
            Self::Reject => RequestStatus::Rejected,
        }
    }
}

impl FromStr for ResolveAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "complete" => Ok(Self::Complete),
            "reject" => Ok(Self::Reject),
            other => Err(AppError::Validation(format!(
                "Unknown action '{}', expected 'complete' or 'reject'",
                other
            ))),
        }
    }
}

/// Filters for listing non-draft requests.
#[derive(Debug, Clone, Default)]
pub struct RequestListFilter {
    pub status: Option<RequestStatus>,
    /// Inclusive lower bound on the forming date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the forming date.
    pub to: Option<NaiveDate>,
}

impl RequestListFilter {
    /// Parses raw query values.
    ///
    /// # Arguments
    /// - `status` - Wire status code
    /// - `from` - Date in `YYYY-MM-DD` form
    /// - `to` - Date in `YYYY-MM-DD` form
    ///
    /// # Returns
    /// - `Ok(RequestListFilter)` - All present values parsed
    /// - `Err(AppError::Validation)` - Unknown status code or malformed date
    pub fn parse(
        status: Option<i32>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self, AppError> {
        let status = status
            .map(|code| {
                status_from_code(code)
                    .ok_or_else(|| AppError::Validation(format!("Unknown status code {}", code)))
            })
            .transpose()?;

        Ok(Self {
            status,
            from: from.map(|raw| parse_date("from", raw)).transpose()?,
            to: to.map(|raw| parse_date("to", raw)).transpose()?,
        })
    }
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!("'{}' must be a date in YYYY-MM-DD form", field))
    })
}

/// Parameters for editing a draft's description.
#[derive(Debug, Clone)]
pub struct UpdateDescriptionParams {
    pub id: i32,
    /// Outer Option indicates field presence, inner for nullable value.
    pub description: Option<Option<String>>,
}
