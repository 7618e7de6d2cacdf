use crate::database::{self, model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateUser, UpdateMatchingEnabled},
        User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

const SELECT_USERS: &str = r#"
    SELECT
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
        hobbies
    FROM users
"#;

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<UserId> {
        let user_id = UserId::new();
        let CreateUser {
            user_name,
            email,
            role,
            profile,
        } = event;
        let hobbies: Vec<String> = profile.hobbies.into_iter().collect();

        let res = sqlx::query(
            r#"
                INSERT INTO users
                (user_id, user_name, email, role, gender, preferred_roommate_gender,
                age, budget, cleanliness, is_smoker, is_pet_friendly, hobbies)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user_id)
        .bind(&user_name)
        .bind(&email)
        .bind(role.as_ref())
        .bind(profile.gender.map(|g| g.as_ref().to_string()))
        .bind(profile.preferred_roommate_gender.as_ref())
        .bind(profile.age)
        .bind(profile.budget)
        .bind(profile.cleanliness)
        .bind(profile.is_smoker)
        .bind(profile.is_pet_friendly)
        .bind(hobbies)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| {
            if database::is_unique_violation(&e) {
                AppError::UnprocessableEntity(format!(
                    "user {user_name} or email {email} is already registered"
                ))
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user record has been created".into(),
            ));
        }
        Ok(user_id)
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let sql = format!("{SELECT_USERS} WHERE user_id = $1");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        row.map(User::try_from).transpose()
    }

    async fn find_matching_enabled(&self, exclude: UserId) -> AppResult<Vec<User>> {
        let sql = format!(
            "{SELECT_USERS} WHERE matching_enabled = TRUE AND user_id <> $1 ORDER BY created_at ASC"
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(exclude)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn update_matching_enabled(&self, event: UpdateMatchingEnabled) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE users
                SET matching_enabled = $2
                WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .bind(event.enabled)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "user {} not found",
                event.user_id
            )));
        }
        Ok(())
    }
}
