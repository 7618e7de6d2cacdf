use kernel::model::{
    id::UserId,
    matching::{Gender, MatchingProfile},
    user::User,
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: String,
    pub matching_enabled: bool,
    pub gender: Option<String>,
    pub preferred_roommate_gender: String,
    pub age: Option<i32>,
    pub budget: Option<i64>,
    pub cleanliness: Option<i32>,
    pub is_smoker: Option<bool>,
    pub is_pet_friendly: Option<bool>,
    pub hobbies: Vec<String>,
}

fn conversion_error(field: &str, value: &str) -> AppError {
    AppError::ConversionEntityError(format!("unknown {field}: {value}"))
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            user_name,
            email,
            role,
            matching_enabled,
            gender,
            preferred_roommate_gender,
            age,
            budget,
            cleanliness,
            is_smoker,
            is_pet_friendly,
            hobbies,
        } = value;
        let gender: Option<Gender> = gender
            .map(|g| g.parse().map_err(|_| conversion_error("gender", &g)))
            .transpose()?;
        Ok(User {
            user_id,
            user_name,
            email,
            role: role.parse().map_err(|_| conversion_error("role", &role))?,
            matching_enabled,
            profile: MatchingProfile {
                gender,
                preferred_roommate_gender: preferred_roommate_gender.parse().map_err(|_| {
                    conversion_error("preferred roommate gender", &preferred_roommate_gender)
                })?,
                age,
                budget,
                cleanliness,
                is_smoker,
                is_pet_friendly,
                hobbies: hobbies.into_iter().collect(),
            },
        })
    }
}
