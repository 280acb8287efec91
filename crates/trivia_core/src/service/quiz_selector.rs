//! Random next-question selection for quiz rounds.
//!
//! # Responsibility
//! - Pick one unseen question uniformly from a candidate pool.
//! - Report exhaustion when every pool question was already asked.
//!
//! # Invariants
//! - Never returns a question whose id is in `previous_ids`.
//! - Candidates are computed before sampling: one draw, no retry loop.

use crate::model::question::{Question, QuestionId};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;

/// Outcome of one selector draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizDraw {
    Question(Question),
    /// Every question in the pool appears in `previous_ids`.
    Exhausted,
}

/// Draws one question from `pool` that is absent from `previous_ids`.
pub fn select_next<G: Rng + ?Sized>(
    pool: &[Question],
    previous_ids: &HashSet<QuestionId>,
    rng: &mut G,
) -> QuizDraw {
    let candidates = pool
        .iter()
        .filter(|question| !previous_ids.contains(&question.id))
        .collect::<Vec<_>>();

    match candidates.choose(rng) {
        Some(question) => QuizDraw::Question((*question).clone()),
        None => QuizDraw::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::{select_next, QuizDraw};
    use crate::model::question::{NewQuestion, Question};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn pool(ids: &[i64]) -> Vec<Question> {
        ids.iter()
            .map(|id| NewQuestion::new(format!("q{id}"), "a", 1, 1).into_question(*id))
            .collect()
    }

    #[test]
    fn single_remaining_candidate_is_returned() {
        let mut rng = StdRng::seed_from_u64(1);
        let previous = HashSet::from([10, 11]);
        for _ in 0..50 {
            match select_next(&pool(&[10, 11, 12]), &previous, &mut rng) {
                QuizDraw::Question(question) => assert_eq!(question.id, 12),
                QuizDraw::Exhausted => panic!("pool still has question 12"),
            }
        }
    }

    #[test]
    fn fully_excluded_pool_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(2);
        let previous = HashSet::from([10, 11, 12]);
        assert_eq!(
            select_next(&pool(&[10, 11, 12]), &previous, &mut rng),
            QuizDraw::Exhausted
        );
    }

    #[test]
    fn empty_pool_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            select_next(&[], &HashSet::new(), &mut rng),
            QuizDraw::Exhausted
        );
    }

    #[test]
    fn never_returns_excluded_ids() {
        let mut rng = StdRng::seed_from_u64(4);
        let questions = pool(&(1..=20).collect::<Vec<_>>());
        let previous = (1..=20).filter(|id| id % 3 != 0).collect::<HashSet<_>>();
        for _ in 0..200 {
            match select_next(&questions, &previous, &mut rng) {
                QuizDraw::Question(question) => {
                    assert!(!previous.contains(&question.id));
                    assert_eq!(question.id % 3, 0);
                }
                QuizDraw::Exhausted => panic!("candidates remain"),
            }
        }
    }

    #[test]
    fn every_candidate_can_be_drawn() {
        let mut rng = StdRng::seed_from_u64(5);
        let questions = pool(&[1, 2, 3]);
        let drawn = (0..300)
            .filter_map(|_| match select_next(&questions, &HashSet::new(), &mut rng) {
                QuizDraw::Question(question) => Some(question.id),
                QuizDraw::Exhausted => None,
            })
            .collect::<HashSet<_>>();
        assert_eq!(drawn, HashSet::from([1, 2, 3]));
    }
}
