use crate::model::user::User;
use std::collections::BTreeSet;
use strum::{AsRefStr, EnumString};

mod score;
pub use score::compatibility_score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum PreferredGender {
    Male,
    Female,
    #[default]
    Any,
}

impl PreferredGender {
    pub fn accepts(self, gender: Gender) -> bool {
        match self {
            PreferredGender::Any => true,
            PreferredGender::Male => gender == Gender::Male,
            PreferredGender::Female => gender == Gender::Female,
        }
    }
}

/// Attributes a user fills in for roommate matching. Every attribute is
/// optional except hobbies; factors whose inputs are missing are left out of
/// the score, while the hobby set always counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchingProfile {
    pub gender: Option<Gender>,
    pub preferred_roommate_gender: PreferredGender,
    pub age: Option<i32>,
    pub budget: Option<i64>,
    pub cleanliness: Option<i32>,
    pub is_smoker: Option<bool>,
    pub is_pet_friendly: Option<bool>,
    pub hobbies: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub user: User,
    pub score: u8,
}
