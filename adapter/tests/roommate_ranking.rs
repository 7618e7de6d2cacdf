use adapter::memory::InMemoryStore;
use kernel::model::{
    id::UserId,
    matching::{Gender, MatchingProfile, PreferredGender},
    role::Role,
    user::event::CreateUser,
};
use kernel::repository::user::UserRepository;
use kernel::service::matching::RoommateMatcher;
use shared::error::AppError;
use std::sync::Arc;

fn profile(budget: i64, cleanliness: i32, hobbies: &[&str]) -> MatchingProfile {
    MatchingProfile {
        gender: Some(Gender::Female),
        preferred_roommate_gender: PreferredGender::Any,
        age: Some(25),
        budget: Some(budget),
        cleanliness: Some(cleanliness),
        is_smoker: Some(false),
        is_pet_friendly: Some(true),
        hobbies: hobbies.iter().map(|h| h.to_string()).collect(),
    }
}

async fn register(
    users: &Arc<dyn UserRepository>,
    name: &str,
    role: Role,
    profile: MatchingProfile,
) -> UserId {
    users
        .create(CreateUser::new(
            name.into(),
            format!("{name}@example.com"),
            role,
            profile,
        ))
        .await
        .unwrap()
}

fn setup() -> (Arc<dyn UserRepository>, RoommateMatcher) {
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryStore::new());
    let matcher = RoommateMatcher::new(users.clone());
    (users, matcher)
}

#[tokio::test]
async fn ranks_eligible_candidates_by_descending_score() {
    let (users, matcher) = setup();
    let subject = register(&users, "subject", Role::User, profile(10000, 7, &["hiking"])).await;
    // 予算も清潔度も外れる
    let far = register(&users, "far", Role::User, profile(30000, 1, &["chess"])).await;
    let close = register(&users, "close", Role::User, profile(11000, 7, &["hiking"])).await;
    let middle = register(&users, "middle", Role::User, profile(12000, 3, &["hiking"])).await;
    let admin = register(&users, "admin", Role::Admin, profile(10000, 7, &["hiking"])).await;
    let hidden = register(&users, "hidden", Role::User, profile(10000, 7, &["hiking"])).await;
    matcher.set_matching_enabled(hidden, false).await.unwrap();

    let ranked = matcher.rank_candidates(subject).await.unwrap();
    let ids: Vec<UserId> = ranked.iter().map(|c| c.user.user_id).collect();

    assert_eq!(ids, vec![close, middle, far]);
    assert!(!ids.contains(&subject));
    assert!(!ids.contains(&admin));
    assert!(!ids.contains(&hidden));
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(ranked[0].score, 90);
}

#[tokio::test]
async fn disabled_subject_gets_empty_ranking() {
    let (users, matcher) = setup();
    let subject = register(&users, "subject", Role::User, profile(10000, 7, &[])).await;
    register(&users, "candidate", Role::User, profile(10000, 7, &[])).await;
    matcher.set_matching_enabled(subject, false).await.unwrap();

    assert!(matcher.rank_candidates(subject).await.unwrap().is_empty());
    assert!(!matcher.matching_enabled(subject).await.unwrap());
}

#[tokio::test]
async fn unknown_subject_is_not_found() {
    let (_users, matcher) = setup();

    assert!(matches!(
        matcher.rank_candidates(UserId::new()).await,
        Err(AppError::EntityNotFound(_))
    ));
    assert!(matches!(
        matcher.set_matching_enabled(UserId::new(), true).await,
        Err(AppError::EntityNotFound(_))
    ));
}

#[tokio::test]
async fn equal_scores_are_ordered_by_candidate_id() {
    let (users, matcher) = setup();
    let subject = register(&users, "subject", Role::User, profile(10000, 7, &[])).await;
    let mut twins = Vec::new();
    for name in ["twin-a", "twin-b", "twin-c", "twin-d"] {
        twins.push(register(&users, name, Role::User, profile(10000, 7, &[])).await);
    }
    twins.sort();

    let ranked = matcher.rank_candidates(subject).await.unwrap();
    let ids: Vec<UserId> = ranked.iter().map(|c| c.user.user_id).collect();
    assert_eq!(ids, twins);
}

#[tokio::test]
async fn re_enabled_user_returns_to_the_pool() {
    let (users, matcher) = setup();
    let subject = register(&users, "subject", Role::User, profile(10000, 7, &[])).await;
    let candidate = register(&users, "candidate", Role::User, profile(10000, 7, &[])).await;

    matcher.set_matching_enabled(candidate, false).await.unwrap();
    assert!(matcher.rank_candidates(subject).await.unwrap().is_empty());

    matcher.set_matching_enabled(candidate, true).await.unwrap();
    let ranked = matcher.rank_candidates(subject).await.unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].user.user_id, candidate);
}

#[tokio::test]
async fn candidate_without_hobbies_ranks_below_a_shared_hobby() {
    let (users, matcher) = setup();
    let subject = register(
        &users,
        "subject",
        Role::User,
        profile(10000, 7, &["reading", "hiking"]),
    )
    .await;
    let blank = register(&users, "blank", Role::User, profile(10000, 7, &[])).await;
    let shared = register(&users, "shared", Role::User, profile(10000, 7, &["hiking", "gaming"])).await;

    let ranked = matcher.rank_candidates(subject).await.unwrap();
    let scores: Vec<(UserId, u8)> = ranked.iter().map(|c| (c.user.user_id, c.score)).collect();
    assert_eq!(scores, vec![(shared, 90), (blank, 85)]);
}
