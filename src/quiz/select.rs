use crate::types::quiz::{QuizChoice, QuizQuestion};
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks `target` ids from `pool` in random order.
///
/// A pool smaller than the target is sampled with replacement so the quiz
/// still reaches its length; otherwise ids are drawn without replacement.
pub fn select_questions<R: Rng>(pool: &[u32], target: usize, rng: &mut R) -> Vec<u32> {
    if pool.is_empty() || target == 0 {
        return Vec::new();
    }

    let mut selected = if pool.len() < target {
        tracing::debug!(pool = pool.len(), target, "sampling with replacement");
        (0..target)
            .map(|_| pool[rng.gen_range(0..pool.len())])
            .collect::<Vec<_>>()
    } else {
        tracing::debug!(pool = pool.len(), target, "sampling without replacement");
        pool.choose_multiple(rng, target).copied().collect::<Vec<_>>()
    };
    selected.shuffle(rng);
    selected
}

pub fn shuffled_choices<'q, R: Rng>(
    question: &'q QuizQuestion,
    rng: &mut R,
) -> Vec<&'q QuizChoice> {
    let mut choices = question.choices.iter().collect::<Vec<_>>();
    choices.shuffle(rng);
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn empty_pool_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_questions(&[], 10, &mut rng).is_empty());
    }

    #[test]
    fn large_pool_is_sampled_without_replacement() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = (1..=30).collect::<Vec<u32>>();
        let selected = select_questions(&pool, 10, &mut rng);
        assert_eq!(selected.len(), 10);
        let unique = selected.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), 10);
        assert!(selected.iter().all(|id| pool.contains(id)));
    }

    #[test]
    fn pool_equal_to_target_uses_every_question_once() {
        let mut rng = StdRng::seed_from_u64(11);
        let pool = (1..=5).collect::<Vec<u32>>();
        let mut selected = select_questions(&pool, 5, &mut rng);
        selected.sort_unstable();
        assert_eq!(selected, pool);
    }

    #[test]
    fn small_pool_repeats_questions_to_reach_target() {
        let mut rng = StdRng::seed_from_u64(3);
        let selected = select_questions(&[4, 8], 10, &mut rng);
        assert_eq!(selected.len(), 10);
        assert!(selected.iter().all(|id| *id == 4 || *id == 8));
    }

    #[test]
    fn same_seed_gives_same_selection() {
        let pool = (1..=20).collect::<Vec<u32>>();
        let first = select_questions(&pool, 8, &mut StdRng::seed_from_u64(42));
        let second = select_questions(&pool, 8, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn shuffled_choices_keep_every_choice() {
        let question = QuizQuestion {
            id: 1,
            category: 1,
            text: "q".to_string(),
            explanation: String::new(),
            active: true,
            choices: (1..=4)
                .map(|id| QuizChoice {
                    id,
                    text: format!("choice {id}"),
                    correct: id == 2,
                })
                .collect(),
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut ids = shuffled_choices(&question, &mut rng)
            .iter()
            .map(|choice| choice.id)
            .collect::<Vec<_>>();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
