use crate::database::{self, ledger, model::room::RoomRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, ReleaseRoom},
        Room, RoomAvailability, RoomStatus,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

const SELECT_ROOMS: &str = r#"
    SELECT
        room_id,
        name,
        owner_id,
        price,
        location,
        category,
        status,
        available,
        booked_by,
        created_at
    FROM rooms
"#;

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId> {
        let room_id = RoomId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO rooms (room_id, name, owner_id, price, location, category, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(room_id)
        .bind(event.name)
        .bind(event.owner)
        .bind(event.price)
        .bind(event.location)
        .bind(event.category.as_ref())
        .bind(RoomStatus::default().as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No room record has been created".into(),
            ));
        }
        Ok(room_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Room>> {
        let sql = format!("{SELECT_ROOMS} ORDER BY created_at DESC");
        let rows: Vec<RoomRow> = sqlx::query_as(&sql)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        rows.into_iter().map(Room::try_from).collect()
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let sql = format!("{SELECT_ROOMS} WHERE room_id = $1");
        let row: Option<RoomRow> = sqlx::query_as(&sql)
            .bind(room_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        row.map(Room::try_from).transpose()
    }

    async fn release(&self, event: ReleaseRoom) -> AppResult<Room> {
        let mut tx = self.db.begin().await?;
        database::set_transaction_serializable(&mut tx).await?;

        let sql = format!("{SELECT_ROOMS} WHERE room_id = $1 FOR UPDATE");
        let row: Option<RoomRow> = sqlx::query_as(&sql)
            .bind(event.room_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        let mut room = row
            .map(Room::try_from)
            .transpose()?
            .ok_or_else(|| AppError::EntityNotFound(format!("room {} not found", event.room_id)))?;

        if room.owner != event.requested_user {
            return Err(AppError::Unauthorized(format!(
                "user {} does not own room {}",
                event.requested_user, event.room_id
            )));
        }

        ledger::release(&mut tx, room.room_id).await?;
        tx.commit().await.map_err(AppError::TransactionError)?;

        room.availability = RoomAvailability::vacant();
        Ok(room)
    }
}
