use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";

/// The signed-in user as seen by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub email: String,
    pub role: String, // e.g., "admin", "user"
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin() {
        let admin = CurrentUser { email: "admin@example.com".to_string(), role: "admin".to_string() };
        let user = CurrentUser { email: "user@example.com".to_string(), role: "user".to_string() };
        assert!(admin.is_admin());
        assert!(!user.is_admin());
    }

    #[test]
    fn test_role_is_case_sensitive() {
        let user = CurrentUser { email: "a@example.com".to_string(), role: "Admin".to_string() };
        assert!(!user.is_admin());
    }
}
