use serde::{Deserialize, Serialize};

use crate::routes::Route;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    pub sidebar_open: bool,
    pub active_route: Route,
    pub modal: Option<String>,
    pub global_loading: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            active_route: Route::Dashboard,
            modal: None,
            global_loading: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    ToggleSidebar,
    SetSidebar(bool),
    Navigate(Route),
    OpenModal(String),
    CloseModal,
    SetGlobalLoading(bool),
}

pub fn reduce(state: &mut UiState, action: UiAction) {
    match action {
        UiAction::ToggleSidebar => state.sidebar_open = !state.sidebar_open,
        UiAction::SetSidebar(open) => state.sidebar_open = open,
        UiAction::Navigate(route) => {
            state.active_route = route;
            // a page change dismisses whatever dialog was open
            state.modal = None;
        }
        UiAction::OpenModal(name) => state.modal = Some(name),
        UiAction::CloseModal => state.modal = None,
        UiAction::SetGlobalLoading(loading) => state.global_loading = loading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PanelId;

    #[test]
    fn navigate_closes_modal() {
        let mut state = UiState::default();
        reduce(&mut state, UiAction::OpenModal("edit-user".into()));
        reduce(&mut state, UiAction::Navigate(Route::Panel(PanelId::QuantumLab)));

        assert_eq!(state.active_route, Route::Panel(PanelId::QuantumLab));
        assert!(state.modal.is_none());
    }

    #[test]
    fn sidebar_toggles() {
        let mut state = UiState::default();
        reduce(&mut state, UiAction::ToggleSidebar);
        assert!(!state.sidebar_open);
        reduce(&mut state, UiAction::SetSidebar(true));
        assert!(state.sidebar_open);
    }

    #[test]
    fn global_loading_flag() {
        let mut state = UiState::default();
        reduce(&mut state, UiAction::SetGlobalLoading(true));
        assert!(state.global_loading);
        assert!(state.sidebar_open);
        reduce(&mut state, UiAction::SetGlobalLoading(false));
        assert!(!state.global_loading);
    }
}
