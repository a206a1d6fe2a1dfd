//! The critic's weekly trivia question

use crate::config::Config;
use crate::models::{Critic, QuizQuestion};
use crate::rng::{Prng, Stream};

/// (prompt, correct answer, three distractors)
const QUESTION_BANK: [(&str, &str, [&str; 3]); 10] = [
    (
        "Which movement is Claude Monet most associated with?",
        "Impressionism",
        ["Cubism", "Baroque", "Futurism"],
    ),
    (
        "Who painted the ceiling of the Sistine Chapel?",
        "Michelangelo",
        ["Raphael", "Caravaggio", "Titian"],
    ),
    (
        "Which artist is known for soup can screen prints?",
        "Andy Warhol",
        ["Roy Lichtenstein", "Jasper Johns", "Keith Haring"],
    ),
    (
        "In which city is the Prado Museum?",
        "Madrid",
        ["Lisbon", "Barcelona", "Seville"],
    ),
    (
        "Chiaroscuro describes the use of what?",
        "Strong contrast of light and dark",
        ["Thick impasto", "Gold leaf", "Perspective grids"],
    ),
    (
        "Which medium mixes pigment with egg yolk?",
        "Tempera",
        ["Gouache", "Fresco", "Encaustic"],
    ),
    (
        "Who sculpted 'The Thinker'?",
        "Auguste Rodin",
        ["Donatello", "Bernini", "Constantin Brancusi"],
    ),
    (
        "Which painter cut off part of his own ear?",
        "Vincent van Gogh",
        ["Paul Gauguin", "Edvard Munch", "Egon Schiele"],
    ),
    (
        "What does a provenance record document?",
        "An artwork's ownership history",
        ["Its insured value", "Its pigment chemistry", "Its frame maker"],
    ),
    (
        "Which movement did Piet Mondrian help found?",
        "De Stijl",
        ["Bauhaus", "Dada", "Fauvism"],
    ),
];

/// Generate the trivia question for `week`, or `None` when disabled
pub fn generate_quiz(config: &Config, seed: u32, week: u32) -> Option<QuizQuestion> {
    if !config.quiz.enabled {
        return None;
    }

    let mut rng = Prng::for_week(seed, week, Stream::Quiz);
    let pick = rng.uniform_int(0, QUESTION_BANK.len() as i64 - 1) as usize;
    let (prompt, answer, distractors) = QUESTION_BANK[pick];

    let mut options = vec![answer];
    options.extend(distractors);
    let choices: Vec<String> = rng
        .pick(&options, options.len())
        .into_iter()
        .map(str::to_string)
        .collect();
    let answer_index = choices.iter().position(|c| c == answer)?;

    Some(QuizQuestion {
        week,
        prompt: prompt.to_string(),
        choices,
        answer_index,
        critic: Critic {
            expertise_reward: config.quiz.expertise_reward,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_answer_index_points_at_answer() {
        let config = Config::default();
        for week in 0..30 {
            let quiz = generate_quiz(&config, 11, week).unwrap();
            assert_eq!(quiz.choices.len(), 4);
            let (_, answer, _) = QUESTION_BANK
                .iter()
                .find(|(p, _, _)| *p == quiz.prompt)
                .unwrap();
            assert_eq!(quiz.choices[quiz.answer_index], *answer);
        }
    }

    #[test]
    fn test_disabled_quiz() {
        let mut config = Config::default();
        config.quiz.enabled = false;
        assert!(generate_quiz(&config, 11, 3).is_none());
    }
}
