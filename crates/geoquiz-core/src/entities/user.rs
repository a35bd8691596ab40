//! User entity - a registered quiz player

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    /// Stored lowercase; uniqueness is case-insensitive
    pub email: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    /// Identity provider, "local" for password accounts
    pub provider: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new local-provider user
    pub fn new(id: Snowflake, email: String, name: Option<String>) -> Self {
        Self {
            id,
            email: email.to_lowercase(),
            name,
            avatar: None,
            provider: "local".to_string(),
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    /// Display name, falling back to the local part of the email
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_stored_lowercase() {
        let user = User::new(Snowflake::new(1), "Alice@Example.COM".to_string(), None);
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_display_name_prefers_profile_name() {
        let user = User::new(
            Snowflake::new(1),
            "alice@example.com".to_string(),
            Some("Alice".to_string()),
        );
        assert_eq!(user.display_name(), "Alice");
    }

    #[test]
    fn test_display_name_falls_back_to_email_local_part() {
        let anonymous = User::new(Snowflake::new(1), "globetrotter@example.com".to_string(), None);
        assert_eq!(anonymous.display_name(), "globetrotter");

        let blank = User::new(
            Snowflake::new(2),
            "quizzer@example.com".to_string(),
            Some("   ".to_string()),
        );
        assert_eq!(blank.display_name(), "quizzer");
    }
}
