//! Render-or-redirect decisions for role-gated views.
//!
//! Pure function of the session role and the requested view's allowed-role
//! set. Callers must re-evaluate on every navigation; nothing here is
//! cached and nothing here mutates state.

use derive_more::Display;
use strum_macros::EnumIter;

use crate::models::Role;

/// The navigable views of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum View {
    #[display("Dashboard")]
    Dashboard,
    #[display("Analytics")]
    Analytics,
    #[display("Alerts")]
    Alerts,
    #[display("Case Entry")]
    CaseEntry,
    #[display("Admin Dashboard")]
    AdminDashboard,
    #[display("Admin Panel")]
    AdminPanel,
    #[display("Community Portal")]
    CommunityPortal,
    #[display("Health Checkup")]
    Checkup,
    #[display("Login")]
    Login,
}

impl View {
    /// The roles allowed to open this view, or `None` for public views.
    pub fn allowed_roles(self) -> Option<&'static [Role]> {
        use Role::*;
        match self {
            View::Dashboard => Some(&[Admin, HealthWorker, Community]),
            View::Analytics => Some(&[Admin, HealthWorker]),
            View::Alerts => Some(&[Admin, HealthWorker, Community]),
            View::CaseEntry => Some(&[Admin, HealthWorker]),
            View::AdminDashboard | View::AdminPanel => Some(&[Admin]),
            View::CommunityPortal => Some(&[Admin, Community]),
            View::Checkup => Some(&[People]),
            View::Login => None,
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Render,
    Redirect(View),
}

/// The view a role lands on when denied access elsewhere.
fn home_view(role: Role) -> View {
    match role {
        Role::People => View::Checkup,
        Role::Community => View::CommunityPortal,
        Role::Admin => View::AdminDashboard,
        Role::HealthWorker => View::Dashboard,
    }
}

/// Decides whether `view` may render for the given session role.
///
/// Unauthenticated requests to any gated view go to the login view; an
/// authenticated session whose role is not in the view's allowed set goes
/// to its role's home view.
pub fn evaluate(session_role: Option<Role>, view: View) -> Decision {
    let Some(allowed) = view.allowed_roles() else {
        return Decision::Render;
    };
    let Some(role) = session_role else {
        return Decision::Redirect(View::Login);
    };
    if allowed.contains(&role) {
        Decision::Render
    } else {
        Decision::Redirect(home_view(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn unauthenticated_requests_redirect_to_login() {
        for view in View::iter().filter(|v| v.allowed_roles().is_some()) {
            assert_eq!(
                evaluate(None, view),
                Decision::Redirect(View::Login),
                "view {view} should be gated"
            );
        }
    }

    #[test]
    fn public_views_render_without_a_session() {
        assert_eq!(evaluate(None, View::Login), Decision::Render);
    }

    #[test]
    fn allowed_roles_render() {
        assert_eq!(
            evaluate(Some(Role::HealthWorker), View::CaseEntry),
            Decision::Render
        );
        assert_eq!(
            evaluate(Some(Role::Community), View::CommunityPortal),
            Decision::Render
        );
        assert_eq!(
            evaluate(Some(Role::People), View::Checkup),
            Decision::Render
        );
        assert_eq!(
            evaluate(Some(Role::Admin), View::AdminPanel),
            Decision::Render
        );
    }

    #[test]
    fn denied_people_role_goes_to_checkup_not_dashboard() {
        assert_eq!(
            evaluate(Some(Role::People), View::AdminDashboard),
            Decision::Redirect(View::Checkup)
        );
    }

    #[test]
    fn denied_roles_land_on_their_home_view() {
        assert_eq!(
            evaluate(Some(Role::Community), View::CaseEntry),
            Decision::Redirect(View::CommunityPortal)
        );
        assert_eq!(
            evaluate(Some(Role::Admin), View::Checkup),
            Decision::Redirect(View::AdminDashboard)
        );
        assert_eq!(
            evaluate(Some(Role::HealthWorker), View::AdminPanel),
            Decision::Redirect(View::Dashboard)
        );
    }
}
