use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::memory::InMemoryStore;
use adapter::notifier::{LogNotifier, MailApiNotifier};
use adapter::repository::{
    booking::BookingRepositoryImpl, room::RoomRepositoryImpl, user::UserRepositoryImpl,
};
use kernel::notification::{NotificationDispatcher, Notifier};
use kernel::repository::{
    booking::BookingRepository, room::RoomRepository, user::UserRepository,
};
use kernel::service::{booking::BookingLifecycle, matching::RoommateMatcher};
use shared::config::MailConfig;

#[derive(Clone)]
pub struct AppRegistry {
    user_repository: Arc<dyn UserRepository>,
    room_repository: Arc<dyn RoomRepository>,
    booking_lifecycle: BookingLifecycle,
    roommate_matcher: RoommateMatcher,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, mail: Option<MailConfig>) -> Self {
        Self::with_parts(
            Arc::new(UserRepositoryImpl::new(pool.clone())),
            Arc::new(RoomRepositoryImpl::new(pool.clone())),
            Arc::new(BookingRepositoryImpl::new(pool.clone())),
            notifier_from(mail),
        )
    }

    pub fn in_memory(store: InMemoryStore, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_parts(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            notifier,
        )
    }

    pub fn with_parts(
        user_repository: Arc<dyn UserRepository>,
        room_repository: Arc<dyn RoomRepository>,
        booking_repository: Arc<dyn BookingRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let booking_lifecycle = BookingLifecycle::new(
            booking_repository,
            room_repository.clone(),
            user_repository.clone(),
            NotificationDispatcher::new(notifier),
        );
        let roommate_matcher = RoommateMatcher::new(user_repository.clone());
        Self {
            user_repository,
            room_repository,
            booking_lifecycle,
            roommate_matcher,
        }
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn room_repository(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn booking_lifecycle(&self) -> &BookingLifecycle {
        &self.booking_lifecycle
    }

    pub fn roommate_matcher(&self) -> &RoommateMatcher {
        &self.roommate_matcher
    }
}

pub fn notifier_from(mail: Option<MailConfig>) -> Arc<dyn Notifier> {
    match mail {
        Some(config) => Arc::new(MailApiNotifier::new(config)),
        None => Arc::new(LogNotifier),
    }
}
