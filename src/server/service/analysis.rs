//! Post-resolution reach analysis.
//!
//! Coverage is the share of the combined audience of the linked channels that actually
//! saw the post. The coefficient compares views gained through reposts to views of the
//! original post.

use std::collections::HashSet;

use crate::server::model::analysis::{AnalysisItem, AnalysisOutcome};

/// Computes coverage and repost coefficient for a request's links.
///
/// - Unknown views count as 0; unknown repost level counts as the original post (0).
/// - Effective views are capped at the channel's subscribers when those are known.
/// - Subscribers are summed once per distinct channel and only when known.
/// - A zero denominator yields 0 for the corresponding output.
///
/// # Arguments
/// - `items` - One entry per link
///
/// # Returns
/// - `AnalysisOutcome` - Coverage in percent and the repost/original ratio
pub fn compute(items: &[AnalysisItem]) -> AnalysisOutcome {
    let mut total_effective = 0.0_f64;
    let mut total_subscribers = 0.0_f64;
    let mut original_views = 0.0_f64;
    let mut repost_views = 0.0_f64;
    let mut seen = HashSet::new();

    for item in items {
        let views = item.views.unwrap_or(0) as f64;
        let effective = match item.subscribers {
            Some(subscribers) => views.min(subscribers as f64),
            None => views,
        };

        total_effective += effective;

        if seen.insert(item.channel_id) {
            if let Some(subscribers) = item.subscribers {
                total_subscribers += subscribers as f64;
            }
        }

        if item.repost_level.unwrap_or(0) > 0 {
            repost_views += effective;
        } else {
            original_views += effective;
        }
    }

    let coverage = if total_subscribers > 0.0 {
        total_effective / total_subscribers * 100.0
    } else {
        0.0
    };
    let coefficient = if original_views > 0.0 {
        repost_views / original_views
    } else {
        0.0
    };

    AnalysisOutcome {
        coverage,
        coefficient,
    }
}
