use crate::model::{id::UserId, matching::MatchingProfile, role::Role};
pub mod event;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: Role,
    pub matching_enabled: bool,
    pub profile: MatchingProfile,
}

impl User {
    // 通知先として使えるメールアドレスがあれば返す
    pub fn contact_address(&self) -> Option<&str> {
        let email = self.email.trim();
        (!email.is_empty() && email.contains('@')).then_some(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_email(email: &str) -> User {
        User {
            user_id: UserId::new(),
            user_name: "tester".into(),
            email: email.into(),
            role: Role::User,
            matching_enabled: true,
            profile: MatchingProfile::default(),
        }
    }

    #[test]
    fn blank_email_is_not_reachable() {
        assert_eq!(user_with_email("  ").contact_address(), None);
        assert_eq!(user_with_email("nobody").contact_address(), None);
        assert_eq!(
            user_with_email(" a@example.com ").contact_address(),
            Some("a@example.com")
        );
    }
}
