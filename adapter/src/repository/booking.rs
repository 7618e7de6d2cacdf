use crate::database::{
    self, ledger,
    model::booking::{into_bookings, BookingRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        ensure_no_duplicate, ensure_no_other_active,
        event::{CreateBooking, MarkBookingPaid, UpdateBookingStatus},
        Booking, BookingRequestError, DecisionOutcome,
    },
    id::{BookingId, RoomId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

const SELECT_BOOKINGS: &str = r#"
    SELECT
        booking_id,
        room_id,
        user_id,
        owner_id,
        status,
        payment_status,
        created_at,
        updated_at
    FROM bookings
"#;

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> Result<Booking, BookingRequestError> {
        let mut tx = self.db.begin().await?;
        database::set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定の部屋が存在するか
        // - 同じ (room, user) に有効な予約・未回答のリクエストがないか
        let owner_id = {
            let owner_id: Option<UserId> =
                sqlx::query_scalar("SELECT owner_id FROM rooms WHERE room_id = $1")
                    .bind(event.room_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;
            let Some(owner_id) = owner_id else {
                return Err(AppError::EntityNotFound(format!(
                    "room {} not found",
                    event.room_id
                ))
                .into());
            };

            let sql = format!(
                "{SELECT_BOOKINGS} WHERE room_id = $1 AND user_id = $2 ORDER BY created_at ASC"
            );
            let rows: Vec<BookingRow> = sqlx::query_as(&sql)
                .bind(event.room_id)
                .bind(event.user_id)
                .fetch_all(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
            ensure_no_duplicate(&into_bookings(rows)?)?;
            owner_id
        };

        let booking = Booking::new_request(event.room_id, event.user_id, owner_id);
        let inserted = sqlx::query(
            r#"
                INSERT INTO bookings
                (booking_id, room_id, user_id, owner_id, status, payment_status,
                created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking.booking_id)
        .bind(booking.room_id)
        .bind(booking.user_id)
        .bind(booking.owner_id)
        .bind(booking.status.as_ref())
        .bind(booking.payment_status.as_ref())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await;

        // 同時に作成された場合は一意制約違反かシリアライズ失敗になる
        if let Err(e) = inserted {
            drop(tx);
            return Err(self.resolve_conflict(event.room_id, event.user_id, e).await);
        }
        if let Err(e) = tx.commit().await {
            return Err(self.resolve_conflict(event.room_id, event.user_id, e).await);
        }

        Ok(booking)
    }

    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<DecisionOutcome> {
        let mut tx = self.db.begin().await?;
        database::set_transaction_serializable(&mut tx).await?;

        let sql = format!("{SELECT_BOOKINGS} WHERE booking_id = $1 FOR UPDATE");
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(event.booking_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        let mut booking = row.map(Booking::try_from).transpose()?.ok_or_else(|| {
            AppError::EntityNotFound(format!("booking {} not found", event.booking_id))
        })?;

        booking.authorize_owner(event.requested_user)?;
        let changed = booking.apply(event.decision)?;
        if !changed {
            return Ok(DecisionOutcome {
                booking,
                changed,
            });
        }

        let siblings = self
            .find_by_pair(&mut tx, booking.room_id, booking.user_id)
            .await?;
        ensure_no_other_active(&booking, &siblings)?;

        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET status = $2, payment_status = $3, updated_at = $4
                WHERE booking_id = $1
            "#,
        )
        .bind(booking.booking_id)
        .bind(booking.status.as_ref())
        .bind(booking.payment_status.as_ref())
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(DecisionOutcome { booking, changed })
    }

    async fn mark_paid(&self, event: MarkBookingPaid) -> AppResult<Booking> {
        // 同時に支払われた場合、負けた側はシリアライズ失敗になる。
        // その時点で支払い待ちの予約はもうないので NotFound として扱う
        match self.pay_awaiting(&event).await {
            Err(AppError::SpecificOperationError(e) | AppError::TransactionError(e))
                if database::is_serialization_failure(&e) =>
            {
                Err(not_awaiting_payment(&event))
            }
            other => other,
        }
    }

    async fn delete(&self, booking_id: BookingId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(booking_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "booking {booking_id} not found"
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let sql = format!("{SELECT_BOOKINGS} WHERE booking_id = $1");
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(booking_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        row.map(Booking::try_from).transpose()
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        self.fetch_where("user_id = $1", user_id).await
    }

    async fn find_pending_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Booking>> {
        self.fetch_where(
            "owner_id = $1 AND status = 'pending' AND payment_status = 'pending'",
            owner_id,
        )
        .await
    }

    async fn find_accepted_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Booking>> {
        self.fetch_where("owner_id = $1 AND status = 'accepted'", owner_id)
            .await
    }
}

impl BookingRepositoryImpl {
    async fn pay_awaiting(&self, event: &MarkBookingPaid) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;
        database::set_transaction_serializable(&mut tx).await?;

        let sql = format!(
            "{SELECT_BOOKINGS} WHERE room_id = $1 AND user_id = $2 AND payment_status = 'pending' \
             ORDER BY created_at ASC LIMIT 1 FOR UPDATE"
        );
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(event.room_id)
            .bind(event.user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        let mut booking = row
            .map(Booking::try_from)
            .transpose()?
            .ok_or_else(|| not_awaiting_payment(event))?;

        booking.mark_paid()?;

        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET payment_status = $2, updated_at = $3
                WHERE booking_id = $1
            "#,
        )
        .bind(booking.booking_id)
        .bind(booking.payment_status.as_ref())
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        }

        // 予約の支払いと部屋の空き状況は同じトランザクションで確定させる
        ledger::occupy(&mut tx, booking.room_id, booking.user_id).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(booking)
    }

    async fn fetch_where(&self, condition: &str, id: UserId) -> AppResult<Vec<Booking>> {
        let sql = format!("{SELECT_BOOKINGS} WHERE {condition} ORDER BY created_at ASC");
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        into_bookings(rows)
    }

    async fn find_by_pair(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        room_id: RoomId,
        user_id: UserId,
    ) -> AppResult<Vec<Booking>> {
        let sql = format!("{SELECT_BOOKINGS} WHERE room_id = $1 AND user_id = $2");
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .bind(room_id)
            .bind(user_id)
            .fetch_all(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        into_bookings(rows)
    }

    // 競合した相手の予約を読み直し、重複エラーとして返す
    async fn resolve_conflict(
        &self,
        room_id: RoomId,
        user_id: UserId,
        error: sqlx::Error,
    ) -> BookingRequestError {
        if !database::is_unique_violation(&error) && !database::is_serialization_failure(&error) {
            return AppError::SpecificOperationError(error).into();
        }

        let sql = format!(
            "{SELECT_BOOKINGS} WHERE room_id = $1 AND user_id = $2 ORDER BY created_at ASC"
        );
        let existing = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(room_id)
            .bind(user_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
            .and_then(into_bookings);
        match existing {
            Ok(existing) => match ensure_no_duplicate(&existing) {
                Err(duplicate) => duplicate,
                Ok(()) => AppError::TransactionError(error).into(),
            },
            Err(e) => e.into(),
        }
    }
}

fn not_awaiting_payment(event: &MarkBookingPaid) -> AppError {
    AppError::EntityNotFound(format!(
        "no booking awaiting payment for room {} and user {}",
        event.room_id, event.user_id
    ))
}
