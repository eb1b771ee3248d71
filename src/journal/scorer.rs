//! Generic-content scorer — the heuristic gate of the admission pipeline.
//!
//! Classifies entry text as generic/cliché vs. specific using a weighted
//! phrase table and a set of additive specificity signals, with graduated
//! decision thresholds by length band. Pure function of the text: no I/O,
//! no randomness. All thresholds are fixed constants pinned by the tests
//! below — this is a heuristic classifier, not ML inference.

use once_cell::sync::Lazy;
use regex::Regex;

/// Clichéd motivational phrases. Each match adds 2 to the generic score.
const PLATITUDES: &[&str] = &[
    "never give up",
    "hard work pays off",
    "believe in yourself",
    "stay positive",
    "everything happens for a reason",
    "follow your dreams",
    "success is",
    "what doesn't kill you",
    "anything is possible",
];

/// Vague filler statements. Each match adds 1 to the generic score.
const VAGUE_STATEMENTS: &[&str] = &[
    "learned a lot",
    "life lesson",
    "it was interesting",
    "it is what it is",
    "lots of things",
    "so much to do",
];

/// Surface-level day summaries. Each match adds 1 to the generic score.
const SURFACE_OBSERVATIONS: &[&str] = &[
    "good day",
    "bad day",
    "work hard",
    "busy day",
    "long day",
    "another day",
    "did some work",
    "worked on stuff",
];

/// Capitalized tokens matching these (case-insensitively) are not counted
/// as proper nouns.
const PROPER_NOUN_STOPWORDS: &[&str] = &[
    "i", "the", "a", "an", "it", "this", "that", "these", "those",
];

/// Concrete past-tense action verbs. Each occurrence adds 2 to specificity.
const ACTION_VERBS: &[&str] = &[
    "implemented",
    "debugged",
    "tested",
    "wrote",
    "noticed",
    "fixed",
    "built",
    "refactored",
    "deployed",
    "configured",
    "installed",
    "upgraded",
    "measured",
    "profiled",
    "benchmarked",
    "reviewed",
    "merged",
    "drafted",
    "sketched",
    "practiced",
    "cooked",
    "repaired",
    "visited",
    "interviewed",
    "migrated",
];

/// Intensifiers that pad short entries without adding content.
const INTENSIFIERS: &[&str] = &["very", "really", "extremely", "super", "so", "quite"];

/// Temporal-expression patterns, matched against lowercased text.
/// Each match adds 2 to specificity.
static TEMPORAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b\d{1,2}:\d{2}\b",
        r"\b\d{1,2}\s?(?:am|pm)\b",
        r"\b(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        r"\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\b",
        r"\bthis (?:morning|afternoon|evening)\b",
        r"\b\d+ (?:minutes?|hours?|days?|weeks?)\b",
        r"\b(?:yesterday|today|tonight)\b",
        r"\blast \w+\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid temporal pattern"))
    .collect()
});

static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("valid number pattern"));

/// Full signal breakdown for one scored text.
#[derive(Debug, Clone)]
pub struct GenericAnalysis {
    pub word_count: usize,
    pub generic_score: u32,
    pub specificity_score: u32,
    /// `specificity_score / word_count`, 0 for empty text.
    pub specificity_ratio: f64,
    /// Generic phrases found, in table order.
    pub matched_phrases: Vec<&'static str>,
    pub proper_nouns: u32,
    pub numbers: u32,
    pub temporal_refs: u32,
    pub action_verbs: u32,
    pub quoted: u32,
}

impl GenericAnalysis {
    /// Remediation feedback for a rejected entry: which specificity
    /// dimensions are missing, plus the first matched generic phrase.
    pub fn feedback(&self) -> String {
        let mut suggestions = Vec::new();
        if self.proper_nouns < 2 {
            suggestions.push("names of people, places, or tools");
        }
        if self.numbers == 0 {
            suggestions.push("specific quantities or durations");
        }
        if self.action_verbs == 0 {
            suggestions.push("concrete actions you took");
        }
        if self.temporal_refs == 0 {
            suggestions.push("a time anchor (when did this happen?)");
        }

        let mut feedback = String::from("This entry reads as generic.");
        if !suggestions.is_empty() {
            feedback.push_str(" Try adding: ");
            feedback.push_str(&suggestions.join("; "));
            feedback.push('.');
        }
        if let Some(phrase) = self.matched_phrases.first() {
            feedback.push_str(&format!(
                " You wrote \"{phrase}\" — replace it with what specifically happened."
            ));
        }
        feedback
    }
}

/// Score a text. Returns `(is_generic, analysis)`.
pub fn score(text: &str) -> (bool, GenericAnalysis) {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();

    // Weighted generic-phrase matches
    let mut generic_score = 0u32;
    let mut matched_phrases = Vec::new();
    for (table, weight) in [
        (PLATITUDES, 2u32),
        (VAGUE_STATEMENTS, 1),
        (SURFACE_OBSERVATIONS, 1),
    ] {
        for phrase in table {
            if lowered.contains(phrase) {
                generic_score += weight;
                matched_phrases.push(*phrase);
            }
        }
    }

    // Additive specificity signals
    let proper_nouns = count_proper_nouns(&words);
    let numbers = NUMBER_PATTERN.find_iter(text).count() as u32;
    let temporal_refs = TEMPORAL_PATTERNS
        .iter()
        .map(|re| re.find_iter(&lowered).count() as u32)
        .sum::<u32>();
    let action_verbs = words
        .iter()
        .filter(|w| ACTION_VERBS.contains(&clean_token(w).to_lowercase().as_str()))
        .count() as u32;
    let quoted = count_quoted(text);

    let specificity_score =
        proper_nouns + numbers + temporal_refs * 2 + action_verbs * 2 + quoted * 2;

    // Red flag: "learned that/about/how" trailed by almost nothing.
    if has_empty_lesson_claim(&lowered) {
        generic_score += 1;
    }

    // Red flag: intensifier-heavy short entries.
    let intensifier_count = words
        .iter()
        .filter(|w| INTENSIFIERS.contains(&clean_token(w).to_lowercase().as_str()))
        .count();
    if intensifier_count >= 3 && word_count < 50 {
        generic_score += 1;
    }

    let specificity_ratio = if word_count == 0 {
        0.0
    } else {
        specificity_score as f64 / word_count as f64
    };

    // Graduated decision thresholds. The first two rules apply at any
    // length; only then does the length band select a rule.
    let is_generic = if generic_score >= 3 && specificity_score < 2 {
        true
    } else if generic_score >= 2 && specificity_ratio < 0.12 {
        true
    } else if word_count < 30 {
        (generic_score >= 1 && specificity_score == 0)
            || (generic_score > 0 && specificity_ratio < 0.1)
    } else if word_count < 100 {
        generic_score >= 2 && specificity_score < 3
    } else {
        generic_score >= 3 && specificity_ratio < 0.08
    };

    let analysis = GenericAnalysis {
        word_count,
        generic_score,
        specificity_score,
        specificity_ratio,
        matched_phrases,
        proper_nouns,
        numbers,
        temporal_refs,
        action_verbs,
        quoted,
    };

    (is_generic, analysis)
}

/// Strip leading/trailing punctuation from a whitespace token.
fn clean_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Count capitalized tokens that are not sentence-initial and not in the
/// stopword set. A token is sentence-initial if it is the first token or
/// the previous token ends a sentence.
fn count_proper_nouns(words: &[&str]) -> u32 {
    let mut count = 0;
    for (i, word) in words.iter().enumerate() {
        if i == 0 || ends_sentence(words[i - 1]) {
            continue;
        }
        let cleaned = clean_token(word);
        if cleaned.is_empty() {
            continue;
        }
        let starts_upper = cleaned.chars().next().is_some_and(|c| c.is_uppercase());
        if starts_upper
            && !PROPER_NOUN_STOPWORDS.contains(&cleaned.to_lowercase().as_str())
        {
            count += 1;
        }
    }
    count
}

fn ends_sentence(token: &str) -> bool {
    token.ends_with('.') || token.ends_with('!') || token.ends_with('?')
}

/// Count double-quoted substrings of at least 3 characters.
fn count_quoted(text: &str) -> u32 {
    let mut count = 0;
    let mut inside: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c == '"' {
            match inside.take() {
                Some(start) => {
                    if text[start..i].chars().count() >= 3 {
                        count += 1;
                    }
                }
                None => inside = Some(i + c.len_utf8()),
            }
        }
    }
    count
}

/// True when a "learned that/about/how" claim is followed by fewer than 15
/// words — the lesson is named but never substantiated.
fn has_empty_lesson_claim(lowered: &str) -> bool {
    for needle in ["learned that", "learned about", "learned how"] {
        if let Some(pos) = lowered.find(needle) {
            let remaining = lowered[pos + needle.len()..].split_whitespace().count();
            if remaining < 15 {
                return true;
            }
        }
    }
    false
}
