// adminkit/src/routes.rs
//
// Fixed admin route table. Every simulated panel gets its own route under
// /admin alongside the commerce pages.
//

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::AdminError;
use crate::sim::PanelId;

pub const ADMIN_PREFIX: &str = "/admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Route {
    #[default]
    Dashboard,
    Users,
    Products,
    Orders,
    Analytics,
    Settings,
    Profile,
    VideoEditor,
    Panel(PanelId),
}

impl Route {
    const PAGES: [Route; 8] = [
        Route::Dashboard,
        Route::Users,
        Route::Products,
        Route::Orders,
        Route::Analytics,
        Route::Settings,
        Route::Profile,
        Route::VideoEditor,
    ];

    /// Every route, commerce pages first, then one per panel.
    pub fn all() -> Vec<Route> {
        Self::PAGES
            .into_iter()
            .chain(PanelId::ALL.into_iter().map(Route::Panel))
            .collect()
    }

    fn segment(self) -> &'static str {
        match self {
            Route::Dashboard => "dashboard",
            Route::Users => "users",
            Route::Products => "products",
            Route::Orders => "orders",
            Route::Analytics => "analytics",
            Route::Settings => "settings",
            Route::Profile => "profile",
            Route::VideoEditor => "video-editor",
            Route::Panel(id) => id.slug(),
        }
    }

    pub fn path(self) -> String {
        format!("{}/{}", ADMIN_PREFIX, self.segment())
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Users => "Users",
            Route::Products => "Products",
            Route::Orders => "Orders",
            Route::Analytics => "Analytics",
            Route::Settings => "Settings",
            Route::Profile => "Profile",
            Route::VideoEditor => "Video Editor",
            Route::Panel(id) => id.title(),
        }
    }

    /// Accepts `/admin/<segment>`; a bare `/admin` or `/` is the dashboard.
    pub fn from_path(path: &str) -> Result<Route, AdminError> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() || trimmed == ADMIN_PREFIX {
            return Ok(Route::Dashboard);
        }
        let segment = trimmed
            .strip_prefix(ADMIN_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| AdminError::NotFound(format!("route `{}`", path)))?;

        if let Some(page) = Self::PAGES.into_iter().find(|r| r.segment() == segment) {
            return Ok(page);
        }
        segment
            .parse::<PanelId>()
            .map(Route::Panel)
            .map_err(|_| AdminError::NotFound(format!("route `{}`", path)))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.path()
    }
}

impl TryFrom<String> for Route {
    type Error = AdminError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Route::from_path(&value)
    }
}
