use garde::Validate;
use kernel::model::{
    id::UserId,
    matching::{Gender, MatchingProfile, PreferredGender},
    role::Role,
    user::{event::CreateUser, User},
};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoleName {
    Admin,
    #[default]
    User,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::User => Self::User,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Admin => Self::Admin,
            RoleName::User => Self::User,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderName {
    Male,
    Female,
    Other,
}

impl From<Gender> for GenderName {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Male => Self::Male,
            Gender::Female => Self::Female,
            Gender::Other => Self::Other,
        }
    }
}

impl From<GenderName> for Gender {
    fn from(value: GenderName) -> Self {
        match value {
            GenderName::Male => Self::Male,
            GenderName::Female => Self::Female,
            GenderName::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredGenderName {
    Male,
    Female,
    #[default]
    Any,
}

impl From<PreferredGender> for PreferredGenderName {
    fn from(value: PreferredGender) -> Self {
        match value {
            PreferredGender::Male => Self::Male,
            PreferredGender::Female => Self::Female,
            PreferredGender::Any => Self::Any,
        }
    }
}

impl From<PreferredGenderName> for PreferredGender {
    fn from(value: PreferredGenderName) -> Self {
        match value {
            PreferredGenderName::Male => Self::Male,
            PreferredGenderName::Female => Self::Female,
            PreferredGenderName::Any => Self::Any,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[garde(length(min = 1))]
    user_name: String,
    #[garde(email)]
    email: String,
    #[garde(skip)]
    #[serde(default)]
    role: RoleName,
    #[garde(skip)]
    gender: Option<GenderName>,
    #[garde(skip)]
    #[serde(default)]
    preferred_roommate_gender: PreferredGenderName,
    #[garde(range(min = 18, max = 100))]
    age: Option<i32>,
    #[garde(range(min = 0))]
    budget: Option<i64>,
    #[garde(range(min = 1, max = 10))]
    cleanliness: Option<i32>,
    #[garde(skip)]
    is_smoker: Option<bool>,
    #[garde(skip)]
    is_pet_friendly: Option<bool>,
    #[garde(skip)]
    #[serde(default)]
    hobbies: Vec<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest {
            user_name,
            email,
            role,
            gender,
            preferred_roommate_gender,
            age,
            budget,
            cleanliness,
            is_smoker,
            is_pet_friendly,
            hobbies,
        } = value;
        let profile = MatchingProfile {
            gender: gender.map(Gender::from),
            preferred_roommate_gender: preferred_roommate_gender.into(),
            age,
            budget,
            cleanliness,
            is_smoker,
            is_pet_friendly,
            hobbies: hobbies
                .into_iter()
                .map(|h| h.trim().to_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        };
        CreateUser::new(user_name, email, role.into(), profile)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub gender: Option<GenderName>,
    pub preferred_roommate_gender: PreferredGenderName,
    pub age: Option<i32>,
    pub budget: Option<i64>,
    pub cleanliness: Option<i32>,
    pub is_smoker: Option<bool>,
    pub is_pet_friendly: Option<bool>,
    pub hobbies: Vec<String>,
}

impl From<MatchingProfile> for ProfileResponse {
    fn from(value: MatchingProfile) -> Self {
        let MatchingProfile {
            gender,
            preferred_roommate_gender,
            age,
            budget,
            cleanliness,
            is_smoker,
            is_pet_friendly,
            hobbies,
        } = value;
        Self {
            gender: gender.map(GenderName::from),
            preferred_roommate_gender: preferred_roommate_gender.into(),
            age,
            budget,
            cleanliness,
            is_smoker,
            is_pet_friendly,
            hobbies: hobbies.into_iter().collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: RoleName,
    pub matching_enabled: bool,
    pub profile: ProfileResponse,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            user_name,
            email,
            role,
            matching_enabled,
            profile,
        } = value;
        Self {
            user_id,
            user_name,
            email,
            role: RoleName::from(role),
            matching_enabled,
            profile: profile.into(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUserResponse {
    pub user_id: UserId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchingEnabledRequest {
    pub enabled: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingEnabledResponse {
    pub matching_enabled: bool,
}
