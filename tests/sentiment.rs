use trendscope::nlp::sentiment::{label_for, SentimentLabel, SentimentScorer};

#[test]
fn thresholds_are_inclusive_on_the_polar_side() {
    assert_eq!(label_for(0.05), SentimentLabel::Positive);
    assert_eq!(label_for(-0.05), SentimentLabel::Negative);
    assert_eq!(label_for(0.049), SentimentLabel::Neutral);
    assert_eq!(label_for(-0.049), SentimentLabel::Neutral);
    assert_eq!(label_for(0.0), SentimentLabel::Neutral);
}

#[test]
fn factual_title_scores_neutral() {
    let scorer = SentimentScorer::new();
    let (score, label) = scorer.score_with_label("Quarterly report released Tuesday");
    assert_eq!(score, 0.0);
    assert_eq!(label, SentimentLabel::Neutral);
}

#[test]
fn polarity_words_move_the_compound_score() {
    let scorer = SentimentScorer::new();
    let (positive, label) = scorer.score_with_label("Great results for the startup");
    assert_eq!(label, SentimentLabel::Positive);
    let (negative, label) = scorer.score_with_label("Terrible results for the startup");
    assert_eq!(label, SentimentLabel::Negative);
    assert!(positive > 0.0 && negative < 0.0);
}

#[test]
fn negation_flips_polarity() {
    let scorer = SentimentScorer::new();
    let plain = scorer.score("The launch was good");
    let negated = scorer.score("The launch was not good");
    assert!(plain > 0.0);
    assert!(negated < 0.0);
}

#[test]
fn intensifiers_and_dampeners_adjust_magnitude() {
    let scorer = SentimentScorer::new();
    let plain = scorer.score("A good launch");
    let boosted = scorer.score("A very good launch");
    let dampened = scorer.score("A slightly good launch");
    assert!(boosted > plain);
    assert!(dampened < plain);
    assert!(dampened > 0.0);
}

#[test]
fn punctuation_and_caps_add_emphasis() {
    let scorer = SentimentScorer::new();
    let plain = scorer.score("Good news for investors");
    let shouted = scorer.score("GOOD news for investors");
    let excited = scorer.score("Good news for investors!!!");
    assert!(shouted > plain);
    assert!(excited > plain);
}

#[test]
fn compound_score_stays_in_range() {
    let scorer = SentimentScorer::new();
    let score = scorer.score("amazing wonderful excellent fantastic great best brilliant");
    assert!(score > 0.9 && score <= 1.0);
}
