//! Flashcard and quiz sessions over the hanja catalog
//!
//! This module provides:
//! - Random flashcard draws with a clamped cursor and reveal flag
//! - Multiple-choice quizzes with shuffled distractor meanings
//! - A seedable RNG so draws are reproducible in tests

pub mod flashcard;
pub mod quiz;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::catalog::{CatalogError, CatalogStore, CharacterRecord, GradeFilter};

pub use flashcard::FlashcardSession;
pub use quiz::{build_options, AnswerOutcome, QuizSession};

pub const DEFAULT_FLASHCARD_COUNT: usize = 20;
pub const DEFAULT_QUIZ_COUNT: usize = 10;
pub const DEFAULT_OPTION_COUNT: usize = 4;

/// Where sessions draw their characters and distractors from
pub trait CharacterSource {
    fn random_sample(
        &self,
        filter: GradeFilter,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<CharacterRecord>, CatalogError>;

    fn distinct_other_meanings(
        &self,
        exclude: &str,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<String>, CatalogError>;
}

impl CharacterSource for CatalogStore {
    fn random_sample(
        &self,
        filter: GradeFilter,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<CharacterRecord>, CatalogError> {
        CatalogStore::random_sample(self, filter, count, rng)
    }

    fn distinct_other_meanings(
        &self,
        exclude: &str,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<String>, CatalogError> {
        CatalogStore::distinct_other_meanings(self, exclude, count, rng)
    }
}

/// RNG for study sessions: fixed when a seed is given, system entropy otherwise
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::catalog::Grade;
    use rand::seq::index;

    /// In-memory source for session tests
    pub struct VecSource {
        pub records: Vec<CharacterRecord>,
    }

    impl VecSource {
        pub fn numbered(n: usize) -> Self {
            let records = (0..n)
                .map(|i| CharacterRecord {
                    id: i as i64 + 1,
                    hanja: format!("字{}", i),
                    main_sound: format!("음{}", i),
                    meaning: format!("뜻{}", i),
                    grade: Grade::Eighth,
                    level_order: Grade::Eighth.rank(),
                    radical: None,
                    strokes: None,
                    total_strokes: None,
                })
                .collect();
            Self { records }
        }
    }

    impl CharacterSource for VecSource {
        fn random_sample(
            &self,
            filter: GradeFilter,
            count: usize,
            rng: &mut dyn RngCore,
        ) -> Result<Vec<CharacterRecord>, CatalogError> {
            let matching: Vec<&CharacterRecord> = self
                .records
                .iter()
                .filter(|r| filter.grade().map_or(true, |g| r.grade == g))
                .collect();
            let amount = count.min(matching.len());
            Ok(index::sample(rng, matching.len(), amount)
                .into_iter()
                .map(|i| matching[i].clone())
                .collect())
        }

        fn distinct_other_meanings(
            &self,
            exclude: &str,
            count: usize,
            rng: &mut dyn RngCore,
        ) -> Result<Vec<String>, CatalogError> {
            let mut meanings: Vec<String> = self
                .records
                .iter()
                .map(|r| r.meaning.clone())
                .filter(|m| m != exclude)
                .collect();
            meanings.sort();
            meanings.dedup();
            let amount = count.min(meanings.len());
            Ok(index::sample(rng, meanings.len(), amount)
                .into_iter()
                .map(|i| meanings[i].clone())
                .collect())
        }
    }
}
