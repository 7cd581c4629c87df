//! Lexicon-and-rule polarity scoring over raw titles.
//!
//! Scores operate on the raw text, not the normalised text, because the
//! rules rely on casing and punctuation cues the normaliser strips.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Three-way discretisation of the compound score. The ±0.05 thresholds
/// are a fixed contract, inclusive on the polar side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

/// Discretise a compound score into its label.
pub fn label_for(score: f64) -> SentimentLabel {
    if score >= 0.05 {
        SentimentLabel::Positive
    } else if score <= -0.05 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

// Word valences on a [-4, 4] scale.
const LEXICON: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("breakthrough", 2.3),
    ("brilliant", 2.8),
    ("celebrate", 2.7),
    ("delight", 2.9),
    ("delighted", 3.1),
    ("excellent", 3.2),
    ("exciting", 2.4),
    ("fantastic", 2.6),
    ("free", 1.2),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("grateful", 2.4),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("hope", 1.9),
    ("impressive", 2.3),
    ("improve", 1.7),
    ("improved", 1.9),
    ("innovative", 1.8),
    ("inspiring", 2.6),
    ("joy", 2.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("nice", 1.8),
    ("optimistic", 1.6),
    ("perfect", 3.0),
    ("positive", 2.4),
    ("promising", 1.7),
    ("proud", 2.2),
    ("smart", 1.7),
    ("strong", 1.5),
    ("succeed", 2.2),
    ("success", 2.7),
    ("successful", 2.8),
    ("super", 2.9),
    ("thrilled", 3.0),
    ("valuable", 1.8),
    ("wonderful", 2.7),
    ("abuse", -3.2),
    ("afraid", -2.2),
    ("angry", -2.3),
    ("attack", -2.1),
    ("awful", -2.0),
    ("bad", -2.5),
    ("catastrophe", -3.4),
    ("collapse", -1.9),
    ("crash", -1.7),
    ("crisis", -1.8),
    ("cruel", -2.8),
    ("damage", -1.8),
    ("danger", -2.4),
    ("dangerous", -2.4),
    ("dead", -3.3),
    ("decline", -1.5),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("dreadful", -2.8),
    ("fail", -2.5),
    ("failed", -2.3),
    ("fails", -2.5),
    ("failure", -2.4),
    ("fear", -2.2),
    ("fraud", -2.8),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("hurt", -2.0),
    ("kill", -3.4),
    ("lawsuit", -1.4),
    ("lose", -1.9),
    ("loss", -1.3),
    ("mess", -1.9),
    ("negative", -2.4),
    ("painful", -2.4),
    ("panic", -2.4),
    ("poor", -2.1),
    ("problem", -1.7),
    ("risk", -1.1),
    ("sad", -2.1),
    ("scam", -2.6),
    ("scandal", -2.0),
    ("terrible", -3.1),
    ("threat", -2.4),
    ("toxic", -2.5),
    ("ugly", -2.4),
    ("warning", -1.4),
    ("worst", -3.1),
    ("wrong", -2.1),
];

// Degree modifiers. Positive entries intensify, negative ones dampen.
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.293),
    ("completely", 0.293),
    ("extremely", 0.293),
    ("hugely", 0.293),
    ("incredibly", 0.293),
    ("really", 0.293),
    ("remarkably", 0.293),
    ("totally", 0.293),
    ("utterly", 0.293),
    ("very", 0.293),
    ("barely", -0.293),
    ("hardly", -0.293),
    ("marginally", -0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
];

const NEGATIONS: &[&str] = &[
    "no", "not", "never", "neither", "nor", "nothing", "without", "cannot", "cant", "can't",
    "dont", "don't", "doesnt", "doesn't", "didnt", "didn't", "isnt", "isn't", "wasnt", "wasn't",
    "wont", "won't", "couldnt", "couldn't", "shouldnt", "shouldn't", "wouldnt", "wouldn't",
];

const NEGATION_SCALAR: f64 = -0.74;
const CAPS_EMPHASIS: f64 = 0.733;
const EXCLAMATION_EMPHASIS: f64 = 0.292;
const NORMALISATION_ALPHA: f64 = 15.0;

static VALENCES: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| LEXICON.iter().copied().collect());
static BOOSTER_MAP: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| BOOSTERS.iter().copied().collect());

/// Read-only sentiment intensity model, constructed once per process and
/// shared across pipeline runs.
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer;

impl SentimentScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compound polarity score in [-1, 1].
    pub fn score(&self, text: &str) -> f64 {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mixed_case = has_mixed_case(&tokens);

        let mut total = 0.0;
        for (idx, token) in tokens.iter().enumerate() {
            let stripped = strip_token(token);
            let Some(&valence) = VALENCES.get(stripped.as_str()) else {
                continue;
            };
            let mut valence = valence;

            if mixed_case && is_caps_emphasis(token) {
                valence += CAPS_EMPHASIS * valence.signum();
            }

            // Up to three preceding tokens modify intensity or flip polarity.
            for (distance, decay) in [(1usize, 1.0), (2, 0.95), (3, 0.9)] {
                let Some(prior) = idx.checked_sub(distance).map(|i| tokens[i]) else {
                    break;
                };
                let prior = strip_token(prior);
                if let Some(&boost) = BOOSTER_MAP.get(prior.as_str()) {
                    valence += boost * decay * valence.signum();
                }
                if NEGATIONS.contains(&prior.as_str()) {
                    valence *= NEGATION_SCALAR;
                }
            }

            total += valence;
        }

        total += punctuation_emphasis(text, total);
        normalise(total)
    }

    /// Score and discretise in one step.
    pub fn score_with_label(&self, text: &str) -> (f64, SentimentLabel) {
        let score = self.score(text);
        (score, label_for(score))
    }
}

/// Lowercase a token and trim surrounding punctuation, keeping internal
/// apostrophes so contractions survive the negation lookup.
fn strip_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .trim_matches('\'')
        .to_lowercase()
}

fn is_caps_emphasis(token: &str) -> bool {
    let letters: Vec<char> = token.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

/// Caps emphasis only means something when the title is not shouted wholesale.
fn has_mixed_case(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_caps_emphasis(t)).count();
    caps > 0 && caps < tokens.iter().filter(|t| t.chars().any(char::is_alphabetic)).count()
}

fn punctuation_emphasis(text: &str, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    let bangs = text.chars().filter(|&c| c == '!').count().min(4);
    bangs as f64 * EXCLAMATION_EMPHASIS * total.signum()
}

fn normalise(total: f64) -> f64 {
    let compound = total / (total * total + NORMALISATION_ALPHA).sqrt();
    compound.clamp(-1.0, 1.0)
}
