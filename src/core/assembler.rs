use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::model::{Block, Champion, ItemSet, Position, SkillAnnotation, SourceInfo};
use crate::domain::ports::Translate;

fn ability_letters() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^QWER]").unwrap())
}

/// Strips a raw provider skill-order string down to ability letters.
pub fn sanitize_skill_order(raw: &str) -> Vec<char> {
    ability_letters()
        .replace_all(&raw.to_uppercase(), "")
        .chars()
        .collect()
}

/// Dot-joined full ordering: "Q.W.E.Q.Q.R...".
pub fn dotted_skills(letters: &[char]) -> String {
    letters
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Shorthand notation: the first four levels dot-joined, then the non-ult
/// max order over the first nine levels by frequency, e.g. "Q.W.E.Q - Q>W>E".
pub fn shorthand_skills(letters: &[char]) -> String {
    let lead: Vec<String> = letters.iter().take(4).map(|c| c.to_string()).collect();

    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in letters.iter().take(9) {
        if *c != 'R' {
            *counts.entry(*c).or_insert(0) += 1;
        }
    }

    let mut order: Vec<char> = counts.keys().copied().collect();
    order.sort_by(|a, b| counts[b].cmp(&counts[a]).then(a.cmp(b)));

    let priority: Vec<String> = order.iter().map(|c| c.to_string()).collect();
    format!("{} - {}", lead.join("."), priority.join(">"))
}

fn render(raw: &str, shorthand: bool) -> String {
    let letters = sanitize_skill_order(raw);
    if shorthand {
        shorthand_skills(&letters)
    } else {
        dotted_skills(&letters)
    }
}

/// Renders both orderings; each is independently formatted, and both are
/// always attached regardless of which one is displayed downstream.
pub fn build_skill_annotation(
    most_freq_raw: &str,
    highest_win_raw: &str,
    shorthand: bool,
) -> SkillAnnotation {
    SkillAnnotation {
        most_freq: render(most_freq_raw, shorthand),
        highest_win: render(highest_win_raw, shorthand),
    }
}

/// Stitches Blocks, skill annotations, title, and version into the canonical
/// build document for one (champion, position[, variant]) tuple. The Blocks
/// sequence keeps caller-supplied order; it is semantically meaningful to
/// consumers.
#[allow(clippy::too_many_arguments)]
pub fn assemble(
    champion: &Champion,
    position: Position,
    variant_label: Option<&str>,
    skills: SkillAnnotation,
    blocks: Vec<Block>,
    version: &str,
    source: &SourceInfo,
    translator: &dyn Translate,
) -> ItemSet {
    let position_label = translator.translate(position.as_str(), true);
    let title = match variant_label {
        Some(variant) => format!("{} {} {} {}", source.abbrev, position_label, variant, version),
        None => format!("{} {} {}", source.abbrev, position_label, version),
    };

    ItemSet {
        champion: champion.name.clone(),
        title,
        position_label,
        blocks,
        skills,
    }
}
