//! Writes to `rooms.available` / `rooms.booked_by`.
//!
//! Both functions take an open transaction: they are only called from the
//! booking payment transaction and the owner release transaction.

use kernel::model::id::{RoomId, UserId};
use shared::error::{AppError, AppResult};

pub async fn occupy(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    room_id: RoomId,
    user_id: UserId,
) -> AppResult<()> {
    let res = sqlx::query(
        r#"
            UPDATE rooms
            SET available = FALSE, booked_by = $2
            WHERE room_id = $1
        "#,
    )
    .bind(room_id)
    .bind(user_id)
    .execute(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    if res.rows_affected() < 1 {
        return Err(AppError::EntityNotFound(format!("room {room_id} not found")));
    }
    Ok(())
}

pub async fn release(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    room_id: RoomId,
) -> AppResult<()> {
    let res = sqlx::query(
        r#"
            UPDATE rooms
            SET available = TRUE, booked_by = NULL
            WHERE room_id = $1
        "#,
    )
    .bind(room_id)
    .execute(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    if res.rows_affected() < 1 {
        return Err(AppError::EntityNotFound(format!("room {room_id} not found")));
    }
    Ok(())
}
