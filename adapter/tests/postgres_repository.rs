//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use adapter::database::ConnectionPool;
use adapter::repository::{
    booking::BookingRepositoryImpl, room::RoomRepositoryImpl, user::UserRepositoryImpl,
};
use kernel::model::{
    booking::{
        event::{CreateBooking, MarkBookingPaid, UpdateBookingStatus},
        BookingRequestError, BookingStatus, OwnerDecision, PaymentStatus,
    },
    matching::MatchingProfile,
    role::Role,
    room::{event::CreateRoom, event::ReleaseRoom, RoomCategory},
    user::event::CreateUser,
};
use kernel::repository::{
    booking::BookingRepository, room::RoomRepository, user::UserRepository,
};
use shared::error::AppError;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn booking_rows_follow_the_lifecycle(pool: PgPool) -> anyhow::Result<()> {
    let pool = ConnectionPool::new(pool);
    let users = UserRepositoryImpl::new(pool.clone());
    let rooms = RoomRepositoryImpl::new(pool.clone());
    let bookings = BookingRepositoryImpl::new(pool);

    let owner = users
        .create(CreateUser::new(
            "owner".into(),
            "owner@example.com".into(),
            Role::User,
            MatchingProfile::default(),
        ))
        .await?;
    let tenant = users
        .create(CreateUser::new(
            "tenant".into(),
            "tenant@example.com".into(),
            Role::User,
            MatchingProfile::default(),
        ))
        .await?;
    let room = rooms
        .create(CreateRoom::new(
            "attic".into(),
            owner,
            Some(9000),
            None,
            RoomCategory::SingleRoom,
        ))
        .await?;

    let booking = bookings
        .create(CreateBooking::new(room, tenant))
        .await?;
    assert_eq!(booking.owner_id, owner);

    let duplicate = bookings.create(CreateBooking::new(room, tenant)).await;
    assert!(matches!(
        duplicate,
        Err(BookingRequestError::DuplicatePending(ref existing))
            if existing.booking_id == booking.booking_id
    ));

    let outcome = bookings
        .update_status(UpdateBookingStatus::new(
            booking.booking_id,
            owner,
            OwnerDecision::Accept,
        ))
        .await?;
    assert!(outcome.changed);
    assert_eq!(outcome.booking.status, BookingStatus::Accepted);

    let paid = bookings.mark_paid(MarkBookingPaid::new(room, tenant)).await?;
    assert_eq!(paid.payment_status, PaymentStatus::Paid);

    let occupied = rooms.find_by_id(room).await?.expect("room exists");
    assert!(!occupied.availability.available);
    assert_eq!(occupied.availability.booked_by, Some(tenant));

    let released = rooms.release(ReleaseRoom::new(room, owner)).await?;
    assert!(released.availability.available);
    assert_eq!(released.availability.booked_by, None);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn duplicate_user_registration_is_unprocessable(pool: PgPool) -> anyhow::Result<()> {
    let users = UserRepositoryImpl::new(ConnectionPool::new(pool));
    let event = || {
        CreateUser::new(
            "mina".into(),
            "mina@example.com".into(),
            Role::User,
            MatchingProfile::default(),
        )
    };

    users.create(event()).await?;
    let res = users.create(event()).await;
    assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn concurrent_payments_settle_once(pool: PgPool) -> anyhow::Result<()> {
    let pool = ConnectionPool::new(pool);
    let users = UserRepositoryImpl::new(pool.clone());
    let rooms = RoomRepositoryImpl::new(pool.clone());
    let bookings = BookingRepositoryImpl::new(pool);

    let owner = users
        .create(CreateUser::new(
            "owner".into(),
            "owner@example.com".into(),
            Role::User,
            MatchingProfile::default(),
        ))
        .await?;
    let tenant = users
        .create(CreateUser::new(
            "tenant".into(),
            "tenant@example.com".into(),
            Role::User,
            MatchingProfile::default(),
        ))
        .await?;
    let room = rooms
        .create(CreateRoom::new(
            "loft".into(),
            owner,
            None,
            None,
            RoomCategory::Flat,
        ))
        .await?;
    bookings.create(CreateBooking::new(room, tenant)).await?;

    let (first, second) = tokio::join!(
        bookings.mark_paid(MarkBookingPaid::new(room, tenant)),
        bookings.mark_paid(MarkBookingPaid::new(room, tenant)),
    );
    let results = [first, second];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(AppError::EntityNotFound(_)))));
    Ok(())
}
