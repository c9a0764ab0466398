use crate::flow::Step;
use regex::Regex;
use std::sync::LazyLock;

static AFTER_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:after|following)\s+["“”]([^"“”]+)["“”]"#).expect("valid regex")
});

static BEFORE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:before|preceding)\s+["“”]([^"“”]+)["“”]"#).expect("valid regex")
});

/// Which rule of the inference produced a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementRule {
    /// `after "X"` or `following "X"`.
    AfterQuoted,
    /// `before "X"` or `preceding "X"`.
    BeforeQuoted,
    /// Mentions the beginning or start of the flow.
    Start,
    /// Mentions the end of the flow or a final step.
    End,
    /// Best token overlap with a step's title and description.
    Scored(usize),
    /// Nothing matched; append after the last step.
    Fallback,
}

/// Where a new step goes: next to `anchor_id`, after it or before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub anchor_id: String,
    pub anchor_index: usize,
    pub insert_after: bool,
    pub rule: PlacementRule,
}

impl Placement {
    fn at(steps: &[Step], anchor_index: usize, insert_after: bool, rule: PlacementRule) -> Self {
        Self {
            anchor_id: steps[anchor_index].id.clone(),
            anchor_index,
            insert_after,
            rule,
        }
    }
}

/// Chooses an anchor and direction for a step described by free text.
///
/// Rules are tried in order: a quoted `after`/`following` reference, a quoted
/// `before`/`preceding` reference, start keywords, end keywords, then a token
/// overlap score. A rule that names a step which cannot be found falls through to the
/// next one. Returns `None` only when `steps` is empty. The function is pure, so the
/// same text and steps always give the same placement.
pub fn infer_placement(text: &str, steps: &[Step]) -> Option<Placement> {
    if steps.is_empty() {
        return None;
    }
    let text = text.to_lowercase();

    if let Some(index) = quoted_reference(&AFTER_QUOTED, &text, steps) {
        return Some(Placement::at(steps, index, true, PlacementRule::AfterQuoted));
    }
    if let Some(index) = quoted_reference(&BEFORE_QUOTED, &text, steps) {
        return Some(Placement::at(steps, index, false, PlacementRule::BeforeQuoted));
    }
    if text.contains("beginning") || text.contains("start") {
        return Some(Placement::at(steps, 0, false, PlacementRule::Start));
    }
    let last = steps.len() - 1;
    if text.contains("end") || text.contains("final") {
        return Some(Placement::at(steps, last, true, PlacementRule::End));
    }

    let placement = match best_scoring_step(&text, steps) {
        Some((index, score)) => Placement::at(steps, index, true, PlacementRule::Scored(score)),
        None => Placement::at(steps, last, true, PlacementRule::Fallback),
    };
    Some(placement)
}

/// Index of the first step whose title matches the phrase captured by `pattern`.
fn quoted_reference(pattern: &Regex, text: &str, steps: &[Step]) -> Option<usize> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|phrase| phrase.as_str().trim())
        .filter(|phrase| !phrase.is_empty())
        .find_map(|phrase| find_step_by_title(phrase, steps))
}

/// Case-insensitive substring match in either direction.
fn find_step_by_title(phrase: &str, steps: &[Step]) -> Option<usize> {
    let phrase = phrase.to_lowercase();
    steps.iter().position(|step| {
        let title = step.title.to_lowercase();
        title.contains(&phrase) || phrase.contains(&title)
    })
}

/// Counts the whitespace tokens longer than three characters that occur in the
/// step's searchable text.
pub fn overlap_score(text: &str, step: &Step) -> usize {
    let haystack = step.search_text();
    text.to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() > 3)
        .filter(|token| haystack.contains(token))
        .count()
}

/// The highest scoring step, the earliest on ties. `None` if every score is zero.
fn best_scoring_step(text: &str, steps: &[Step]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (index, step) in steps.iter().enumerate() {
        let score = overlap_score(text, step);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((index, score));
        }
    }
    best
}
