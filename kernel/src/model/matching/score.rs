use super::{Gender, MatchingProfile, PreferredGender};

const GENDER_WEIGHT: u32 = 20;
const BUDGET_WEIGHT: u32 = 20;
const CLEANLINESS_WEIGHT: u32 = 15;
const AGE_WEIGHT: u32 = 10;
const PET_WEIGHT: u32 = 10;
const SMOKER_WEIGHT: u32 = 10;
const HOBBY_POINTS: u32 = 5;
const HOBBY_CAP: u32 = 3;

const BUDGET_TOLERANCE: i64 = 5000;
const CLEANLINESS_TOLERANCE: i64 = 1;
const AGE_TOLERANCE: i64 = 3;

#[derive(Default)]
struct Tally {
    achieved: u32,
    attainable: u32,
}

impl Tally {
    // None は入力が欠けている要素。分母にも分子にも加えない
    fn factor(&mut self, weight: u32, matched: Option<bool>) {
        self.partial(weight, matched.map(|m| if m { weight } else { 0 }));
    }

    fn partial(&mut self, weight: u32, points: Option<u32>) {
        if let Some(points) = points {
            self.attainable += weight;
            self.achieved += points.min(weight);
        }
    }

    fn normalized(&self) -> u8 {
        if self.attainable == 0 {
            return 0;
        }
        let ratio = f64::from(self.achieved * 100) / f64::from(self.attainable);
        ratio.round() as u8
    }
}

fn within(a: Option<i64>, b: Option<i64>, tolerance: i64) -> Option<bool> {
    Some((a? - b?).abs() <= tolerance)
}

fn both_equal(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    Some(a? == b?)
}

fn gender_preference(preference: PreferredGender, gender: Option<Gender>) -> Option<bool> {
    match preference {
        PreferredGender::Any => Some(true),
        specific => gender.map(|g| specific.accepts(g)),
    }
}

// 趣味は空でも常に採点対象にする
fn hobby_overlap(a: &MatchingProfile, b: &MatchingProfile) -> u32 {
    let common = a.hobbies.intersection(&b.hobbies).count() as u32;
    common.min(HOBBY_CAP) * HOBBY_POINTS
}

/// Scores how well `candidate` suits `subject` as a roommate, in `0..=100`.
///
/// Only the subject's gender preference is checked, so the score is not
/// symmetric in general.
pub fn compatibility_score(subject: &MatchingProfile, candidate: &MatchingProfile) -> u8 {
    let mut tally = Tally::default();

    tally.factor(
        GENDER_WEIGHT,
        gender_preference(subject.preferred_roommate_gender, candidate.gender),
    );
    tally.factor(
        BUDGET_WEIGHT,
        within(subject.budget, candidate.budget, BUDGET_TOLERANCE),
    );
    tally.factor(
        CLEANLINESS_WEIGHT,
        within(
            subject.cleanliness.map(i64::from),
            candidate.cleanliness.map(i64::from),
            CLEANLINESS_TOLERANCE,
        ),
    );
    tally.factor(
        AGE_WEIGHT,
        within(
            subject.age.map(i64::from),
            candidate.age.map(i64::from),
            AGE_TOLERANCE,
        ),
    );
    tally.factor(
        PET_WEIGHT,
        both_equal(subject.is_pet_friendly, candidate.is_pet_friendly),
    );
    tally.factor(
        SMOKER_WEIGHT,
        both_equal(subject.is_smoker, candidate.is_smoker),
    );
    tally.partial(
        HOBBY_POINTS * HOBBY_CAP,
        Some(hobby_overlap(subject, candidate)),
    );

    tally.normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hobbies(items: &[&str]) -> std::collections::BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn subject() -> MatchingProfile {
        MatchingProfile {
            gender: Some(Gender::Male),
            preferred_roommate_gender: PreferredGender::Any,
            age: Some(25),
            budget: Some(10000),
            cleanliness: Some(7),
            is_smoker: Some(false),
            is_pet_friendly: Some(true),
            hobbies: hobbies(&["reading", "hiking"]),
        }
    }

    fn candidate() -> MatchingProfile {
        MatchingProfile {
            gender: Some(Gender::Female),
            preferred_roommate_gender: PreferredGender::Male,
            age: Some(27),
            budget: Some(12000),
            cleanliness: Some(8),
            is_smoker: Some(false),
            is_pet_friendly: Some(true),
            hobbies: hobbies(&["hiking", "gaming"]),
        }
    }

    #[test]
    fn full_profiles_score_as_weighted_sum() {
        // 20 + 20 + 15 + 10 + 10 + 10 + 5 = 90 / 100
        assert_eq!(compatibility_score(&subject(), &candidate()), 90);
    }

    #[test]
    fn gender_preference_is_checked_from_the_subject_side() {
        let mut s = subject();
        s.preferred_roommate_gender = PreferredGender::Male;
        // 性別の 20 点を失う: 70 / 100
        assert_eq!(compatibility_score(&s, &candidate()), 70);
        // 逆方向では candidate の好み(male)が subject(male) に合う
        assert_eq!(compatibility_score(&candidate(), &s), 70 + 20);
    }

    #[test]
    fn missing_inputs_are_excluded_from_normalization() {
        let s = MatchingProfile {
            budget: Some(10000),
            ..Default::default()
        };
        let c = MatchingProfile {
            budget: Some(20000),
            ..Default::default()
        };
        // gender (any) 20/20, budget 0/20, hobbies 0/15 -> 36
        assert_eq!(compatibility_score(&s, &c), 36);
    }

    #[test]
    fn hobby_points_are_capped() {
        let mut s = subject();
        let mut c = candidate();
        s.hobbies = hobbies(&["a", "b", "c", "d", "e"]);
        c.hobbies = hobbies(&["a", "b", "c", "d", "e"]);
        assert_eq!(compatibility_score(&s, &c), 100);
    }

    #[test]
    fn empty_hobbies_still_count_toward_the_total() {
        let mut no_hobbies = candidate();
        no_hobbies.hobbies.clear();
        // 20 + 20 + 15 + 10 + 10 + 10 + 0 = 85 / 100
        assert_eq!(compatibility_score(&subject(), &no_hobbies), 85);
        assert_eq!(compatibility_score(&subject(), &candidate()), 90);
        assert!(
            compatibility_score(&subject(), &candidate())
                > compatibility_score(&subject(), &no_hobbies)
        );
    }

    #[test]
    fn specific_preference_without_candidate_gender_is_skipped() {
        let s = MatchingProfile {
            preferred_roommate_gender: PreferredGender::Female,
            ..Default::default()
        };
        assert_eq!(compatibility_score(&s, &MatchingProfile::default()), 0);
    }

    #[test]
    fn rounds_to_nearest_integer() {
        let s = MatchingProfile {
            preferred_roommate_gender: PreferredGender::Female,
            gender: None,
            cleanliness: Some(5),
            is_smoker: Some(true),
            is_pet_friendly: Some(true),
            ..Default::default()
        };
        let c = MatchingProfile {
            gender: Some(Gender::Male),
            cleanliness: Some(5),
            is_smoker: Some(false),
            is_pet_friendly: Some(true),
            ..Default::default()
        };
        // 25 / (20 + 15 + 10 + 10 + 15) = 35.71..
        assert_eq!(compatibility_score(&s, &c), 36);
    }

    #[test]
    fn score_stays_in_bounds_and_is_deterministic() {
        let profiles = [subject(), candidate(), MatchingProfile::default()];
        for a in &profiles {
            for b in &profiles {
                let first = compatibility_score(a, b);
                assert!(first <= 100);
                assert_eq!(first, compatibility_score(a, b));
            }
        }
    }
}
