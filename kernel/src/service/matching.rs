use crate::{
    model::{
        id::UserId,
        matching::{compatibility_score, RankedCandidate},
        role::Capability,
        user::event::UpdateMatchingEnabled,
    },
    repository::user::UserRepository,
};
use derive_new::new;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(Clone, new)]
pub struct RoommateMatcher {
    user_repository: Arc<dyn UserRepository>,
}

impl RoommateMatcher {
    /// Ranks every eligible candidate for `subject_id` by compatibility score,
    /// highest first. Equal scores are ordered by candidate id.
    pub async fn rank_candidates(&self, subject_id: UserId) -> AppResult<Vec<RankedCandidate>> {
        let subject = self
            .user_repository
            .find_by_id(subject_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("user {subject_id} not found")))?;

        if !subject.matching_enabled {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<RankedCandidate> = self
            .user_repository
            .find_matching_enabled(subject_id)
            .await?
            .into_iter()
            .filter(|c| {
                c.matching_enabled
                    && c.user_id != subject_id
                    && !c.role.has(Capability::Administer)
            })
            .map(|user| RankedCandidate {
                score: compatibility_score(&subject.profile, &user.profile),
                user,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.user.user_id.cmp(&b.user.user_id))
        });
        Ok(ranked)
    }

    pub async fn set_matching_enabled(&self, user_id: UserId, enabled: bool) -> AppResult<()> {
        self.user_repository
            .update_matching_enabled(UpdateMatchingEnabled::new(user_id, enabled))
            .await
    }

    pub async fn matching_enabled(&self, user_id: UserId) -> AppResult<bool> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .map(|u| u.matching_enabled)
            .ok_or_else(|| AppError::EntityNotFound(format!("user {user_id} not found")))
    }
}
