use serde::{Deserialize, Serialize};

use crate::types::AnalyticsOverview;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsState {
    pub overview: AnalyticsOverview,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsAction {
    FetchPending,
    FetchFulfilled(AnalyticsOverview),
    FetchRejected(String),
}

pub fn reduce(state: &mut AnalyticsState, action: AnalyticsAction) {
    match action {
        AnalyticsAction::FetchPending => {
            state.loading = true;
            state.error = None;
        }
        AnalyticsAction::FetchFulfilled(overview) => {
            state.loading = false;
            state.overview = overview;
        }
        AnalyticsAction::FetchRejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn fetch_lifecycle() {
        let mut state = AnalyticsState::default();
        reduce(&mut state, AnalyticsAction::FetchPending);
        assert!(state.loading);
        assert!(state.error.is_none());

        reduce(&mut state, AnalyticsAction::FetchFulfilled(seed::analytics()));
        assert!(!state.loading);
        assert_eq!(state.overview.sales.len(), 6);
        assert_eq!(state.overview.total_orders, 1_035);
    }

    #[test]
    fn rejection_keeps_previous_overview() {
        let mut state = AnalyticsState {
            overview: seed::analytics(),
            ..Default::default()
        };
        reduce(&mut state, AnalyticsAction::FetchPending);
        reduce(&mut state, AnalyticsAction::FetchRejected("offline".into()));

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("offline"));
        assert_eq!(state.overview, seed::analytics());

        reduce(&mut state, AnalyticsAction::FetchPending);
        assert!(state.error.is_none());
    }
}
