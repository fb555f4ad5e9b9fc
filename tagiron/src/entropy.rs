use std::collections::BTreeMap;

use tracing::debug;

use crate::{AnswerValue, GameState, Hand, Question};

/// How a question would split the current candidates.
#[derive(Clone, Debug)]
pub struct QuestionScore {
    pub question: Question,
    /// Expected information in bits.
    pub entropy: f64,
    /// The number of candidates in the largest group, i.e. the worst case after asking.
    pub largest_group: usize,
}

/// Shannon entropy in bits of a distribution given by integer weights.
///
/// Zero weights are ignored.
pub fn weighted_entropy(weights: &[u32]) -> f64 {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = f64::from(total);
    weights
        .iter()
        .filter(|&&w| w > 0)
        .map(|&w| {
            let w = f64::from(w);
            (total / w).log2() * w
        })
        .sum::<f64>()
        / total
}

impl GameState {
    /// Partitions the candidates by the answer they give to `question`.
    ///
    /// Every candidate is in exactly one group.
    pub fn groups(&self, question: &Question) -> BTreeMap<AnswerValue, Vec<Hand>> {
        let mut groups: BTreeMap<AnswerValue, Vec<Hand>> = BTreeMap::new();
        for &candidate in self.candidates() {
            groups
                .entry(question.evaluate(&candidate))
                .or_default()
                .push(candidate);
        }
        groups
    }

    /// How many real deals a candidate stands for.
    ///
    /// The two green fives are indistinguishable. If the player holds neither of them and
    /// the candidate holds exactly one, either physical five could be the one drawn.
    pub fn case_weight(&self, candidate: &Hand) -> u32 {
        if self.hand().count_fives() == 0 && candidate.count_fives() == 1 {
            2
        } else {
            1
        }
    }

    // The total case weight of each group.
    fn group_weights(&self, groups: &BTreeMap<AnswerValue, Vec<Hand>>) -> Vec<u32> {
        groups
            .values()
            .map(|group| group.iter().map(|hand| self.case_weight(hand)).sum())
            .collect()
    }

    /// Expected information in bits that asking `question` would reveal.
    pub fn entropy(&self, question: &Question) -> f64 {
        weighted_entropy(&self.group_weights(&self.groups(question)))
    }

    /// Every question that can be asked with the cards in the field, in field order.
    pub fn possible_questions(&self) -> Vec<Question> {
        self.field()
            .iter()
            .flat_map(|card| card.to_questions())
            .collect()
    }

    /// Scores every possible question, in field order.
    pub fn question_scores(&self) -> Vec<QuestionScore> {
        self.possible_questions()
            .into_iter()
            .map(|question| {
                let groups = self.groups(&question);
                let largest_group = groups.values().map(Vec::len).max().unwrap_or(0);
                let entropy = weighted_entropy(&self.group_weights(&groups));
                debug!(question = %question, entropy, largest_group, "Scored question");
                QuestionScore {
                    question,
                    entropy,
                    largest_group,
                }
            })
            .collect()
    }

    /// The first question with the highest entropy, if any card is in the field.
    pub fn best_question(&self) -> Option<QuestionScore> {
        self.question_scores()
            .into_iter()
            .fold(None, |best: Option<QuestionScore>, score| match best {
                Some(best) if best.entropy >= score.entropy => Some(best),
                _ => Some(score),
            })
    }
}
