use crate::model::user::{GenderName, RoleName};
use kernel::model::{id::UserId, matching::RankedCandidate};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: RoleName,
    pub gender: Option<GenderName>,
    pub age: Option<i32>,
    pub budget: Option<i64>,
    pub cleanliness: Option<i32>,
    pub is_smoker: Option<bool>,
    pub is_pet_friendly: Option<bool>,
    pub hobbies: Vec<String>,
    pub match_score: u8,
}

impl From<RankedCandidate> for MatchResponse {
    fn from(value: RankedCandidate) -> Self {
        let RankedCandidate { user, score } = value;
        let profile = user.profile;
        Self {
            user_id: user.user_id,
            name: user.user_name,
            email: user.email,
            role: user.role.into(),
            gender: profile.gender.map(GenderName::from),
            age: profile.age,
            budget: profile.budget,
            cleanliness: profile.cleanliness,
            is_smoker: profile.is_smoker,
            is_pet_friendly: profile.is_pet_friendly,
            hobbies: profile.hobbies.into_iter().collect(),
            match_score: score,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub items: Vec<MatchResponse>,
}

impl From<Vec<RankedCandidate>> for MatchesResponse {
    fn from(value: Vec<RankedCandidate>) -> Self {
        Self {
            items: value.into_iter().map(MatchResponse::from).collect(),
        }
    }
}
