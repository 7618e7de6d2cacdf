use crate::model::{id::UserId, matching::MatchingProfile, role::Role};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,
    pub role: Role,
    pub profile: MatchingProfile,
}

#[derive(Debug, new)]
pub struct UpdateMatchingEnabled {
    pub user_id: UserId,
    pub enabled: bool,
}
