//! Credential verification
//!
//! The shell never compares credentials itself; it asks an injected
//! `CredentialVerifier`.

/// Capability that decides whether a username/password pair is valid
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single configured username/password pair
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new("admin", "admin")
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        // Both comparisons always run
        let user_ok = self.username == username;
        let pass_ok = self.password == password;
        user_ok & pass_ok
    }
}
