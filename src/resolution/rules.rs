use crate::graph::Kindred;
use crate::types::PersonRecord;

use super::labels::gendered;

/// One entry of the labeling decision list.
///
/// `applies` tests whether the member at a graph position belongs to the
/// relation; the label is then picked from `male`/`female` by the member's
/// gender.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&Kindred, usize) -> bool,
    pub male: &'static str,
    pub female: &'static str,
}

impl Rule {
    /// The label this rule assigns to `person`.
    pub fn label(&self, person: &PersonRecord) -> String {
        gendered(&person.gender, self.male, self.female)
    }
}

/// Graph-based rules in priority order. The first rule that applies wins.
///
/// A father's sibling is always an uncle or aunt; no rule labels them with
/// the parent label.
pub const DIRECT_RULES: &[Rule] = &[
    Rule {
        name: "self",
        applies: is_anchor,
        male: "self",
        female: "self",
    },
    Rule {
        name: "spouse",
        applies: is_spouse,
        male: "husband",
        female: "wife",
    },
    Rule {
        name: "sibling",
        applies: is_sibling,
        male: "brother",
        female: "sister",
    },
    Rule {
        name: "spouse-sibling",
        applies: is_spouse_sibling,
        male: "brother-in-law",
        female: "sister-in-law",
    },
    Rule {
        name: "cousin",
        applies: is_cousin,
        male: "cousin",
        female: "cousin",
    },
    Rule {
        name: "sibling-spouse",
        applies: is_sibling_spouse,
        male: "brother-in-law",
        female: "sister-in-law",
    },
    Rule {
        name: "parent",
        applies: is_parent,
        male: "father",
        female: "mother",
    },
    Rule {
        name: "uncle-aunt",
        applies: is_uncle_aunt,
        male: "uncle",
        female: "aunt",
    },
    Rule {
        name: "spouse-parent",
        applies: is_spouse_parent,
        male: "father-in-law",
        female: "mother-in-law",
    },
    Rule {
        name: "spouse-uncle-aunt",
        applies: is_spouse_uncle_aunt,
        male: "uncle-in-law",
        female: "aunt-in-law",
    },
    Rule {
        name: "child",
        applies: is_child,
        male: "son",
        female: "daughter",
    },
    Rule {
        name: "niece-nephew",
        applies: is_niece_nephew,
        male: "nephew",
        female: "niece",
    },
    Rule {
        name: "child-spouse",
        applies: is_child_spouse,
        male: "son-in-law",
        female: "daughter-in-law",
    },
];

/// Returns the first rule in `DIRECT_RULES` that applies to `idx`.
pub fn first_match(kindred: &Kindred, idx: usize) -> Option<&'static Rule> {
    DIRECT_RULES.iter().find(|rule| (rule.applies)(kindred, idx))
}

fn is_anchor(k: &Kindred, idx: usize) -> bool {
    k.anchor == idx
}

fn is_spouse(k: &Kindred, idx: usize) -> bool {
    k.spouse == Some(idx)
}

fn is_sibling(k: &Kindred, idx: usize) -> bool {
    k.siblings.contains(&idx)
}

fn is_spouse_sibling(k: &Kindred, idx: usize) -> bool {
    k.spouse_siblings.contains(&idx)
}

fn is_cousin(k: &Kindred, idx: usize) -> bool {
    k.cousins.contains(&idx)
}

fn is_sibling_spouse(k: &Kindred, idx: usize) -> bool {
    k.sibling_spouses.contains(&idx) || k.spouse_sibling_spouses.contains(&idx)
}

fn is_parent(k: &Kindred, idx: usize) -> bool {
    k.is_parent(idx)
}

fn is_uncle_aunt(k: &Kindred, idx: usize) -> bool {
    k.uncles_aunts.contains(&idx) || k.uncles_aunts_by_marriage.contains(&idx)
}

fn is_spouse_parent(k: &Kindred, idx: usize) -> bool {
    k.spouse_parents.contains(&idx)
}

fn is_spouse_uncle_aunt(k: &Kindred, idx: usize) -> bool {
    k.spouse_uncles_aunts.contains(&idx)
}

fn is_child(k: &Kindred, idx: usize) -> bool {
    k.children.contains(&idx)
}

fn is_niece_nephew(k: &Kindred, idx: usize) -> bool {
    k.nieces_nephews.contains(&idx)
}

fn is_child_spouse(k: &Kindred, idx: usize) -> bool {
    k.child_spouses.contains(&idx)
}
