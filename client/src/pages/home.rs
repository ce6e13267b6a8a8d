//! Home view: profile panels for the logged-in user.
//!
//! ARCHITECTURE
//! ============
//! User info, permissions and profile are fetched concurrently and settle
//! independently. Each panel exists only if its own fetch succeeded on the
//! latest load; one failure never hides the others.
//!
//! Logout always ends logged out locally, whatever the server answered.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use super::panel::{Panel, join_or_none, yes_no};
use crate::app::Route;
use crate::net::error::ApiError;
use crate::net::session::SessionService;
use crate::net::types::{UserInfo, UserPermissions, UserProfile};
use crate::state::auth::SessionContext;
use crate::state::ui::{Notice, Notices};
use crate::util::auth::format_display_name;

const REFRESHED: &str = "Data refreshed";
const LOGGED_OUT: &str = "Logged out";
const LOGOUT_DEGRADED: &str = "Logout request failed, but local login state was cleared";

#[derive(Debug)]
pub struct HomePage {
    user_info: Option<UserInfo>,
    permissions: Option<UserPermissions>,
    profile: Option<UserProfile>,
    loading: bool,
    refreshing: bool,
    error: Option<String>,
    pub notices: Notices,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            user_info: None,
            permissions: None,
            profile: None,
            loading: true,
            refreshing: false,
            error: None,
            notices: Notices::default(),
        }
    }
}

impl HomePage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Redirect to login when no session exists.
    #[must_use]
    pub fn mount(session: &SessionContext) -> Option<Route> {
        Route::Home.guard(session)
    }

    #[must_use]
    pub fn user_info(&self) -> Option<&UserInfo> {
        self.user_info.as_ref()
    }

    #[must_use]
    pub fn permissions(&self) -> Option<&UserPermissions> {
        self.permissions.as_ref()
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn refreshing(&self) -> bool {
        self.refreshing
    }

    /// Set when nothing could be loaded.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch all three panels. Returns a redirect when the session was rejected.
    pub async fn load(&mut self, service: &SessionService) -> Option<Route> {
        let (info, permissions, profile) =
            tokio::join!(service.current_user(), service.user_permissions(), service.user_profile());

        let mut redirect = None;
        let mut first_error = None;
        self.user_info = self.settle("user_info", info, &mut redirect, &mut first_error);
        self.permissions = self.settle("permissions", permissions, &mut redirect, &mut first_error);
        self.profile = self.settle("profile", profile, &mut redirect, &mut first_error);

        let nothing_loaded = self.user_info.is_none() && self.permissions.is_none() && self.profile.is_none();
        self.error = if nothing_loaded { first_error } else { None };
        self.loading = false;
        self.refreshing = false;
        redirect
    }

    fn settle<T>(
        &mut self,
        panel: &'static str,
        result: Result<T, ApiError>,
        redirect: &mut Option<Route>,
        first_error: &mut Option<String>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(panel, error = %e, "panel fetch failed");
                self.notices.push_once(e.notice());
                if redirect.is_none() {
                    *redirect = e.redirect_from(Route::Home);
                }
                first_error.get_or_insert_with(|| e.to_string());
                None
            }
        }
    }

    /// Re-fetch everything. Also serves as the retry action.
    pub async fn refresh(&mut self, service: &SessionService) -> Option<Route> {
        self.refreshing = true;
        let redirect = self.load(service).await;
        if redirect.is_none() {
            self.notices.push(Notice::success(REFRESHED));
        }
        redirect
    }

    /// Log out server-side, then clear local credentials regardless of the
    /// outcome. Always lands on the login view.
    pub async fn logout(&mut self, service: &SessionService) -> Route {
        match service.logout().await {
            Ok(_) => self.notices.push(Notice::success(LOGGED_OUT)),
            Err(e) => {
                tracing::warn!(error = %e, "logout request failed; clearing local session anyway");
                self.notices.push(Notice::warning(LOGOUT_DEGRADED));
            }
        }
        service.session().clear_auth();
        Route::Login
    }

    /// Panels for whatever loaded, in display order.
    #[must_use]
    pub fn panels(&self) -> Vec<Panel> {
        let mut panels = Vec::new();

        if let Some(info) = &self.user_info {
            panels.push(
                Panel::new("Basic Info")
                    .row("User ID", info.user_id.clone())
                    .row("Username", info.username.clone())
                    .row("Display name", format_display_name(&info.username, Some(&info.display_name)))
                    .row("Email", if info.email.is_empty() { "Not set" } else { info.email.as_str() })
                    .row("Department", info.department.clone())
                    .row("Roles", join_or_none(&info.roles))
                    .row("Login time", info.login_time.clone())
                    .row("Last access", info.last_access_time.clone()),
            );
        }

        if let Some(perms) = &self.permissions {
            panels.push(
                Panel::new("Permissions")
                    .row("Admin", yes_no(perms.is_admin))
                    .row("Manager", yes_no(perms.is_manager))
                    .row("Read", yes_no(perms.can_read))
                    .row("Write", yes_no(perms.can_write))
                    .row("Delete", yes_no(perms.can_delete))
                    .row("Manage", yes_no(perms.can_manage))
                    .row("Roles", join_or_none(&perms.all_roles))
                    .row("Permissions", join_or_none(&perms.all_permissions)),
            );
        }

        if let Some(profile) = &self.profile {
            panels.push(
                Panel::new("Profile")
                    .row("Display name", format_display_name(&profile.username, Some(&profile.display_name)))
                    .row("Email", if profile.email.is_empty() { "Not set" } else { profile.email.as_str() })
                    .row("Department", profile.department.clone())
                    .row("Session", if profile.is_logged_in { "active" } else { "inactive" }),
            );
        }

        panels
    }

    /// Text rendering of the whole view.
    #[must_use]
    pub fn render(&self) -> String {
        if self.loading {
            return "Loading...\n".to_owned();
        }
        if let (Some(error), None) = (&self.error, &self.user_info) {
            return format!("Load failed: {error}\n(retry with refresh)\n");
        }
        self.panels().iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }
}
