//! Access control: role-scoped credential registries and the active session.
//!
//! Each role has its own provisioning path, so each role keeps its own
//! registry: the administrator entry is fixed, the health-worker list is
//! fixed, community entries are added by an administrator, and people
//! entries grow through self-registration. The lookup logic itself is
//! shared; the role tag only selects which registry gets scanned.

use log::info;

use crate::models::{Account, Role, UserId};

/// Password assigned to an admin-provisioned community account when the
/// administrator does not choose one.
pub const DEFAULT_COMMUNITY_PASSWORD: &str = "community123";

/// A registry entry pairing an account's public fields with its opaque
/// credential. Passwords never leave this module.
#[derive(Debug, Clone)]
struct CredentialEntry {
    account: Account,
    password: String,
}

/// Profile supplied on the people signup path of [`AuthStore::login`].
#[derive(Debug, Clone)]
pub struct SignupProfile {
    pub name: String,
    pub phone: Option<String>,
    pub village: Option<String>,
}

/// Profile for an administrator-provisioned community account.
#[derive(Debug, Clone)]
pub struct NewCommunityUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub village: Option<String>,
    /// Falls back to [`DEFAULT_COMMUNITY_PASSWORD`] when absent.
    pub password: Option<String>,
}

/// Owns the current session and the four role-scoped account registries.
pub struct AuthStore {
    session: Option<Account>,
    admin: CredentialEntry,
    health_workers: Vec<CredentialEntry>,
    community: Vec<CredentialEntry>,
    people: Vec<CredentialEntry>,
}

fn fixed_entry(name: &str, email: &str, role: Role, password: &str) -> CredentialEntry {
    CredentialEntry {
        account: Account {
            id: UserId::new(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            phone: None,
            village: None,
        },
        password: password.to_string(),
    }
}

/// Linear credential scan, first match wins. Emails compare trimmed and
/// case-insensitively; passwords compare exactly.
fn scan(entries: &[CredentialEntry], email: &str, password: &str) -> Option<Account> {
    let email = email.trim().to_lowercase();
    entries
        .iter()
        .find(|e| e.account.email.to_lowercase() == email && e.password == password)
        .map(|e| e.account.clone())
}

impl AuthStore {
    /// A store with the fixed administrator and health-worker registries
    /// provisioned, empty community and people registries, and no session.
    pub fn new() -> Self {
        Self {
            session: None,
            admin: fixed_entry(
                "Program Administrator",
                "admin@healthguard.org",
                Role::Admin,
                "adminpass@123",
            ),
            health_workers: vec![
                fixed_entry(
                    "Dr. Priya Sharma",
                    "priya@healthguard.org",
                    Role::HealthWorker,
                    "health123",
                ),
                fixed_entry(
                    "Dr. Rahul Das",
                    "rahul@healthguard.org",
                    Role::HealthWorker,
                    "health123",
                ),
            ],
            community: Vec::new(),
            people: Vec::new(),
        }
    }

    /// Authenticates against the registry selected by `role` and, on
    /// success, replaces the session with the matched account. Failure
    /// leaves the session untouched.
    ///
    /// With `role == People` and a signup profile, registration-on-login
    /// applies: a fresh people account is always created from the profile
    /// and becomes the session, with no uniqueness check against accounts
    /// already holding that email. Repeating the signup therefore
    /// duplicates the account; that matches the shipped behavior and is
    /// deliberately left as-is.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        role: Role,
        signup: Option<SignupProfile>,
    ) -> bool {
        if role == Role::People {
            if let Some(profile) = signup {
                let account = Account {
                    id: UserId::new(),
                    name: profile.name,
                    email: email.trim().to_string(),
                    role: Role::People,
                    phone: profile.phone,
                    village: profile.village,
                };
                info!("people account {} registered via signup", account.id);
                self.people.push(CredentialEntry {
                    account: account.clone(),
                    password: password.to_string(),
                });
                self.session = Some(account);
                return true;
            }
        }

        let matched = match role {
            Role::Admin => scan(std::slice::from_ref(&self.admin), email, password),
            Role::HealthWorker => scan(&self.health_workers, email, password),
            Role::Community => scan(&self.community, email, password),
            Role::People => scan(&self.people, email, password),
        };

        match matched {
            Some(account) => {
                info!("login succeeded for {} as {}", account.email, role);
                self.session = Some(account);
                true
            }
            None => {
                info!("login failed for role {role}");
                false
            }
        }
    }

    /// Clears the session unconditionally.
    pub fn logout(&mut self) {
        self.session = None;
    }

    /// Appends an administrator-provisioned community account. Email
    /// uniqueness is not enforced; field validation is the caller's job.
    pub fn add_community_user(&mut self, profile: NewCommunityUser) -> UserId {
        let account = Account {
            id: UserId::new(),
            name: profile.name,
            email: profile.email,
            role: Role::Community,
            phone: profile.phone,
            village: profile.village,
        };
        let id = account.id;
        info!("community account {id} provisioned");
        self.community.push(CredentialEntry {
            account,
            password: profile
                .password
                .unwrap_or_else(|| DEFAULT_COMMUNITY_PASSWORD.to_string()),
        });
        id
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The currently authenticated account, if any.
    pub fn user(&self) -> Option<&Account> {
        self.session.as_ref()
    }

    /// True iff a session exists and its role is in `roles`.
    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.session
            .as_ref()
            .is_some_and(|account| roles.contains(&account.role))
    }

    /// Community accounts, credentials stripped.
    pub fn community_users(&self) -> impl Iterator<Item = &Account> + '_ {
        self.community.iter().map(|e| &e.account)
    }

    /// The fixed health-worker accounts, credentials stripped.
    pub fn health_workers(&self) -> impl Iterator<Item = &Account> + '_ {
        self.health_workers.iter().map(|e| &e.account)
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_EMAIL: &str = "admin@healthguard.org";
    const ADMIN_PASSWORD: &str = "adminpass@123";

    #[test]
    fn admin_login_with_exact_credentials() {
        let mut auth = AuthStore::new();
        assert!(auth.login(ADMIN_EMAIL, ADMIN_PASSWORD, Role::Admin, None));
        assert!(auth.is_authenticated());
        assert_eq!(auth.user().map(|u| u.role), Some(Role::Admin));
    }

    #[test]
    fn admin_login_rejects_wrong_password_and_keeps_session() {
        let mut auth = AuthStore::new();
        assert!(!auth.login(ADMIN_EMAIL, "wrong", Role::Admin, None));
        assert!(!auth.is_authenticated());

        // A bad attempt must not clobber an existing session either.
        assert!(auth.login(ADMIN_EMAIL, ADMIN_PASSWORD, Role::Admin, None));
        assert!(!auth.login(ADMIN_EMAIL, "wrong", Role::Admin, None));
        assert_eq!(auth.user().map(|u| u.role), Some(Role::Admin));
    }

    #[test]
    fn email_is_case_insensitive_and_trimmed_but_password_is_exact() {
        let mut auth = AuthStore::new();
        assert!(auth.login("  Admin@HealthGuard.ORG ", ADMIN_PASSWORD, Role::Admin, None));
        auth.logout();
        assert!(!auth.login(ADMIN_EMAIL, "ADMINPASS@123", Role::Admin, None));
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn role_selects_the_registry() {
        let mut auth = AuthStore::new();
        // Valid health-worker credentials do not open an admin session.
        assert!(!auth.login("priya@healthguard.org", "health123", Role::Admin, None));
        assert!(auth.login("priya@healthguard.org", "health123", Role::HealthWorker, None));
        assert_eq!(auth.user().map(|u| u.role), Some(Role::HealthWorker));
    }

    #[test]
    fn community_login_requires_provisioned_account() {
        let mut auth = AuthStore::new();
        assert!(!auth.login("asha@example.com", DEFAULT_COMMUNITY_PASSWORD, Role::Community, None));

        auth.add_community_user(NewCommunityUser {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: Some("9000000001".into()),
            village: Some("Tura".into()),
            password: None,
        });
        assert!(auth.login("asha@example.com", DEFAULT_COMMUNITY_PASSWORD, Role::Community, None));
        assert_eq!(auth.user().map(|u| u.role), Some(Role::Community));
    }

    #[test]
    fn people_signup_registers_and_logs_in() {
        let mut auth = AuthStore::new();
        let signup = SignupProfile {
            name: "Asha".into(),
            phone: Some("9000000000".into()),
            village: Some("Tura".into()),
        };
        assert!(auth.login("P@Example.com", "pw123456", Role::People, Some(signup)));

        let user = auth.user().expect("session set by signup");
        assert_eq!(user.role, Role::People);
        assert_eq!(user.name, "Asha");
        assert_eq!(user.village.as_deref(), Some("Tura"));

        // Plain credential login afterwards finds the registered account.
        auth.logout();
        assert!(auth.login("p@example.com", "pw123456", Role::People, None));
    }

    #[test]
    fn repeated_people_signup_duplicates_the_account() {
        let mut auth = AuthStore::new();
        let signup = || {
            Some(SignupProfile {
                name: "Asha".into(),
                phone: None,
                village: None,
            })
        };
        assert!(auth.login("p@example.com", "pw123456", Role::People, signup()));
        let first = auth.user().map(|u| u.id).expect("first signup session");

        // Same email again: still succeeds, still creates a new account.
        assert!(auth.login("p@example.com", "other-pw", Role::People, signup()));
        let second = auth.user().map(|u| u.id).expect("second signup session");
        assert_ne!(first, second);
    }

    #[test]
    fn people_login_without_profile_is_a_plain_credential_check() {
        let mut auth = AuthStore::new();
        assert!(!auth.login("nobody@example.com", "pw123456", Role::People, None));
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn logout_clears_the_session() {
        let mut auth = AuthStore::new();
        assert!(auth.login(ADMIN_EMAIL, ADMIN_PASSWORD, Role::Admin, None));
        auth.logout();
        assert!(!auth.is_authenticated());
        assert!(auth.user().is_none());
        // Idempotent.
        auth.logout();
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn has_role_checks_membership() {
        let mut auth = AuthStore::new();
        assert!(!auth.has_role(&[Role::Admin]));

        assert!(auth.login("rahul@healthguard.org", "health123", Role::HealthWorker, None));
        assert!(auth.has_role(&[Role::Admin, Role::HealthWorker]));
        assert!(!auth.has_role(&[Role::Admin, Role::Community]));
    }

    #[test]
    fn registry_accessors_expose_public_fields() {
        let mut auth = AuthStore::new();
        assert_eq!(auth.health_workers().count(), 2);
        assert_eq!(auth.community_users().count(), 0);

        auth.add_community_user(NewCommunityUser {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: None,
            village: None,
            password: Some("secret".into()),
        });
        let accounts: Vec<_> = auth.community_users().collect();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].email, "asha@example.com");
        assert_eq!(accounts[0].role, Role::Community);
    }
}
