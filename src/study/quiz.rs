//! Multiple-choice meaning quiz
//!
//! Each question shows a glyph and asks for its meaning. The option set holds
//! the correct meaning plus up to `option_count - 1` distinct distractors,
//! shuffled so the answer position is not predictable.

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, CharacterRecord, GradeFilter};

use super::CharacterSource;

/// Result of answering one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnswerOutcome {
    Correct,
    Incorrect { expected: String },
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct)
    }

    pub fn message(&self) -> String {
        match self {
            AnswerOutcome::Correct => "정답입니다!".to_string(),
            AnswerOutcome::Incorrect { expected } => format!("오답입니다. 정답: {}", expected),
        }
    }
}

/// Combine the correct answer with distractors and shuffle.
///
/// Distractors equal to the answer or to each other are dropped, so the
/// correct meaning appears exactly once.
pub fn build_options(correct: &str, distractors: Vec<String>, rng: &mut dyn RngCore) -> Vec<String> {
    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct.to_string());
    for d in distractors {
        if !options.contains(&d) {
            options.push(d);
        }
    }
    options.shuffle(rng);
    options
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    filter: GradeFilter,
    count: usize,
    option_count: usize,
    questions: Vec<CharacterRecord>,
    index: usize,
    score: usize,
    options: Vec<String>,
    outcome: Option<AnswerOutcome>,
}

impl QuizSession {
    /// Draw `count` questions and prepare the first option set
    pub fn start<S: CharacterSource + ?Sized>(
        source: &S,
        filter: GradeFilter,
        count: usize,
        option_count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Self, CatalogError> {
        let questions = source.random_sample(filter, count, rng)?;
        let mut session = Self {
            filter,
            count,
            option_count: option_count.max(1),
            questions,
            index: 0,
            score: 0,
            options: Vec::new(),
            outcome: None,
        };
        session.load_options(source, rng)?;
        log::debug!("Started quiz with {} questions ({})", session.questions.len(), filter);
        Ok(session)
    }

    fn load_options<S: CharacterSource + ?Sized>(
        &mut self,
        source: &S,
        rng: &mut dyn RngCore,
    ) -> Result<(), CatalogError> {
        self.options = match self.questions.get(self.index) {
            Some(question) => {
                let distractors =
                    source.distinct_other_meanings(&question.meaning, self.option_count - 1, rng)?;
                build_options(&question.meaning, distractors, rng)
            }
            None => Vec::new(),
        };
        Ok(())
    }

    pub fn filter(&self) -> GradeFilter {
        self.filter
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn current(&self) -> Option<&CharacterRecord> {
        self.questions.get(self.index)
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn outcome(&self) -> Option<&AnswerOutcome> {
        self.outcome.as_ref()
    }

    /// Whether the current question has been answered
    pub fn is_locked(&self) -> bool {
        self.outcome.is_some()
    }

    /// True once every question has been moved past
    pub fn is_finished(&self) -> bool {
        !self.questions.is_empty() && self.index >= self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    /// (score, total)
    pub fn final_score(&self) -> (usize, usize) {
        (self.score, self.questions.len())
    }

    /// Answer the current question. Returns `None` when the question is already
    /// answered or the quiz is over.
    pub fn submit(&mut self, answer: &str) -> Option<AnswerOutcome> {
        if self.outcome.is_some() {
            return None;
        }
        let question = self.questions.get(self.index)?;

        let outcome = if answer == question.meaning {
            self.score += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect {
                expected: question.meaning.clone(),
            }
        };
        self.outcome = Some(outcome.clone());
        Some(outcome)
    }

    /// Answer with the option at `choice` (0-based)
    pub fn submit_choice(&mut self, choice: usize) -> Option<AnswerOutcome> {
        let answer = self.options.get(choice)?.clone();
        self.submit(&answer)
    }

    /// Advance to the next question and unlock answering
    pub fn next<S: CharacterSource + ?Sized>(
        &mut self,
        source: &S,
        rng: &mut dyn RngCore,
    ) -> Result<(), CatalogError> {
        if self.index >= self.questions.len() {
            return Ok(());
        }
        self.index += 1;
        self.outcome = None;
        self.load_options(source, rng)
    }

    /// Start over with a fresh draw using the same filter and sizes
    pub fn restart<S: CharacterSource + ?Sized>(
        &mut self,
        source: &S,
        rng: &mut dyn RngCore,
    ) -> Result<(), CatalogError> {
        *self = Self::start(source, self.filter, self.count, self.option_count, rng)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::session_rng;
    use crate::study::test_support::VecSource;
    use std::collections::HashSet;

    #[test]
    fn test_build_options_contains_correct_once() {
        let mut rng = session_rng(Some(1));
        let options = build_options(
            "물",
            vec!["불".to_string(), "물".to_string(), "불".to_string(), "나무".to_string()],
            &mut rng,
        );
        assert_eq!(options.len(), 3);
        assert_eq!(options.iter().filter(|o| o.as_str() == "물").count(), 1);
    }

    #[test]
    fn test_correct_position_is_not_biased() {
        let mut rng = session_rng(Some(2024));
        let mut positions = [0usize; 4];
        let trials = 4000;
        for _ in 0..trials {
            let options = build_options(
                "정답",
                vec!["a".to_string(), "b".to_string(), "c".to_string()],
                &mut rng,
            );
            let pos = options.iter().position(|o| o == "정답").unwrap();
            positions[pos] += 1;
        }
        for count in positions {
            // Expected 1000 per slot
            assert!(count > 850 && count < 1150, "skewed distribution: {:?}", positions);
        }
    }

    #[test]
    fn test_option_count_limited_by_available_meanings() {
        let source = VecSource::numbered(3);
        let mut rng = session_rng(Some(3));
        let quiz = QuizSession::start(&source, GradeFilter::All, 10, 4, &mut rng).unwrap();

        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz.options().len(), 3);
        let correct = &quiz.current().unwrap().meaning;
        assert_eq!(quiz.options().iter().filter(|o| *o == correct).count(), 1);
    }

    #[test]
    fn test_full_option_set() {
        let source = VecSource::numbered(20);
        let mut rng = session_rng(Some(4));
        let quiz = QuizSession::start(&source, GradeFilter::All, 10, 4, &mut rng).unwrap();

        assert_eq!(quiz.len(), 10);
        assert_eq!(quiz.options().len(), 4);
        let unique: HashSet<&String> = quiz.options().iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_submit_scores_and_locks() {
        let source = VecSource::numbered(10);
        let mut rng = session_rng(Some(5));
        let mut quiz = QuizSession::start(&source, GradeFilter::All, 2, 4, &mut rng).unwrap();

        let correct = quiz.current().unwrap().meaning.clone();
        assert_eq!(quiz.submit(&correct), Some(AnswerOutcome::Correct));
        assert_eq!(quiz.score(), 1);
        assert!(quiz.is_locked());

        // Locked until next
        assert_eq!(quiz.submit(&correct), None);
        assert_eq!(quiz.score(), 1);

        quiz.next(&source, &mut rng).unwrap();
        assert!(!quiz.is_locked());
        let expected = quiz.current().unwrap().meaning.clone();
        let outcome = quiz.submit("틀린 답").unwrap();
        assert_eq!(outcome, AnswerOutcome::Incorrect { expected: expected.clone() });
        assert_eq!(outcome.message(), format!("오답입니다. 정답: {}", expected));
        assert_eq!(quiz.score(), 1);

        assert!(quiz.is_last_question());
        quiz.next(&source, &mut rng).unwrap();
        assert!(quiz.is_finished());
        assert_eq!(quiz.final_score(), (1, 2));
        assert!(quiz.submit(&expected).is_none());
        assert!(quiz.options().is_empty());
    }

    #[test]
    fn test_submit_choice_uses_option_index() {
        let source = VecSource::numbered(10);
        let mut rng = session_rng(Some(6));
        let mut quiz = QuizSession::start(&source, GradeFilter::All, 1, 4, &mut rng).unwrap();

        let correct = quiz.current().unwrap().meaning.clone();
        let pos = quiz.options().iter().position(|o| *o == correct).unwrap();
        assert_eq!(quiz.submit_choice(pos), Some(AnswerOutcome::Correct));
        assert!(quiz.submit_choice(99).is_none());
    }

    #[test]
    fn test_restart_draws_fresh_sample() {
        let source = VecSource::numbered(200);
        let mut rng = session_rng(Some(7));
        let mut quiz = QuizSession::start(&source, GradeFilter::All, 10, 4, &mut rng).unwrap();
        let first: Vec<i64> = (0..quiz.len()).map(|i| quiz.questions[i].id).collect();

        let correct = quiz.current().unwrap().meaning.clone();
        quiz.submit(&correct);
        quiz.restart(&source, &mut rng).unwrap();

        let second: Vec<i64> = quiz.questions.iter().map(|q| q.id).collect();
        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.index(), 0);
        assert!(!quiz.is_locked());
        assert_eq!(second.len(), 10);
        assert_ne!(first, second);
    }

    #[test]
    fn test_empty_quiz() {
        let source = VecSource::numbered(0);
        let mut rng = session_rng(Some(8));
        let mut quiz = QuizSession::start(&source, GradeFilter::All, 10, 4, &mut rng).unwrap();
        assert!(quiz.is_empty());
        assert!(!quiz.is_finished());
        assert!(quiz.options().is_empty());
        assert!(quiz.submit("x").is_none());
    }
}
