use tracing::{debug, trace, warn};

use crate::config::{ReferencePolicy, ResolverConfig};
use crate::errors::{KinshipError, Result};
use crate::graph::{FamilyGraph, Kindred};
use crate::types::{PersonId, PersonRecord, RelationResult};

use super::labels::{generational, to_in_law, FALLBACK_LABEL};
use super::rebase::merge_rebased;
use super::rules::first_match;

/// How a label was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Basis {
    /// A graph rule matched, named by the rule.
    Rule(&'static str),
    /// A rule matched in the spouse-anchored pass and was converted.
    Rebased(&'static str),
    /// Grandparent/grandchild label through the spouse's generation.
    SpouseGeneration,
    /// Grandparent/grandchild label through the reference generation.
    Generation,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub label: String,
    pub basis: Basis,
}

/// Computes a relationship label for every member of a family relative to a
/// reference person.
///
/// The resolver holds only options; every call builds its own `FamilyGraph`
/// from the input and never mutates it, so one resolver can serve any number
/// of callers.
#[derive(Debug, Clone, Default)]
pub struct RelationResolver {
    reference_policy: ReferencePolicy,
    infer_generations: bool,
}

impl RelationResolver {
    /// Creates a resolver with strict reference checking and recorded
    /// generations only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver from persisted settings.
    pub fn with_config(config: &ResolverConfig) -> Self {
        Self {
            reference_policy: config.reference_policy,
            infer_generations: config.infer_generations,
        }
    }

    pub fn reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.reference_policy = policy;
        self
    }

    pub fn infer_generations(mut self, enabled: bool) -> Self {
        self.infer_generations = enabled;
        self
    }

    /// Labels every member relative to the member flagged `isSelf`.
    ///
    /// Output has one result per input record, in input order.
    ///
    /// # Errors
    ///
    /// `NoReferencePerson` when no member is flagged (including empty input);
    /// `AmbiguousReferencePerson` when several are and the policy is strict.
    pub fn resolve(&self, members: &[PersonRecord]) -> Result<Vec<RelationResult>> {
        let anchor = self.find_reference(members)?;
        Ok(self.resolve_from(members, anchor))
    }

    /// Labels every member relative to the member with id `reference`,
    /// ignoring `isSelf` flags.
    pub fn resolve_for(
        &self,
        members: &[PersonRecord],
        reference: &PersonId,
    ) -> Result<Vec<RelationResult>> {
        let anchor = members
            .iter()
            .position(|m| &m.id == reference)
            .ok_or_else(|| KinshipError::UnknownReference {
                id: reference.to_string(),
            })?;
        Ok(self.resolve_from(members, anchor))
    }

    /// Finds the position of the reference person under the active policy.
    pub fn find_reference(&self, members: &[PersonRecord]) -> Result<usize> {
        let flagged: Vec<usize> = members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_self)
            .map(|(idx, _)| idx)
            .collect();

        match (flagged.as_slice(), self.reference_policy) {
            ([], _) => Err(KinshipError::NoReferencePerson),
            ([only], _) => Ok(*only),
            ([first, ..], ReferencePolicy::FirstWins) => {
                warn!(
                    count = flagged.len(),
                    chosen = %members[*first].id,
                    "several members flagged isSelf, using the first"
                );
                Ok(*first)
            }
            (_, ReferencePolicy::Strict) => Err(KinshipError::AmbiguousReferencePerson {
                ids: flagged.iter().map(|&i| members[i].id.to_string()).collect(),
            }),
        }
    }

    fn resolve_from(&self, members: &[PersonRecord], anchor: usize) -> Vec<RelationResult> {
        let mut graph = FamilyGraph::build(members);
        if self.infer_generations {
            graph.infer_generations(anchor);
        }

        let kindred = Kindred::derive(&graph, anchor);
        let direct = label_all(&graph, &kindred);

        let assignments = match kindred.spouse.filter(|_| !kindred.has_parents()) {
            Some(spouse) => {
                let rebased = label_all(&graph, &Kindred::derive(&graph, spouse));
                merge_rebased(&graph, anchor, spouse, direct, rebased)
            }
            None => direct,
        };

        for (person, assignment) in members.iter().zip(&assignments) {
            if let Basis::Rebased(rule) = assignment.basis {
                trace!(id = %person.id, rule, label = %assignment.label, "converted through spouse");
            }
        }

        debug!(
            members = members.len(),
            reference = %members[anchor].id,
            rebased = kindred.spouse.is_some() && !kindred.has_parents(),
            unplaced = assignments.iter().filter(|a| a.basis == Basis::Fallback).count(),
            "resolved relations"
        );

        members
            .iter()
            .zip(assignments)
            .map(|(person, assignment)| RelationResult::new(person, assignment.label))
            .collect()
    }
}

/// Labels every member of the graph relative to the kindred's anchor.
pub(crate) fn label_all(graph: &FamilyGraph<'_>, kindred: &Kindred) -> Vec<Assignment> {
    (0..graph.len()).map(|idx| label_one(graph, kindred, idx)).collect()
}

/// Runs the decision list for one member: graph rules first, then the
/// generation heuristics, then the fallback.
fn label_one(graph: &FamilyGraph<'_>, kindred: &Kindred, idx: usize) -> Assignment {
    let person = graph.person(idx);

    if let Some(rule) = first_match(kindred, idx) {
        return Assignment {
            label: rule.label(person),
            basis: Basis::Rule(rule.name),
        };
    }

    // Without parents of their own, the anchor reaches older and younger
    // generations of the spouse's family only as in-laws.
    if let Some(spouse) = kindred.spouse.filter(|_| !kindred.has_parents()) {
        if kindred.spouse_side.contains(&idx) {
            let label = graph
                .generation_gap(idx, spouse)
                .and_then(|diff| generational(diff, &person.gender));
            if let Some(label) = label {
                return Assignment {
                    label: to_in_law(&label),
                    basis: Basis::SpouseGeneration,
                };
            }
        }
    }

    let label = graph
        .generation_gap(idx, kindred.anchor)
        .and_then(|diff| generational(diff, &person.gender));
    match label {
        Some(label) => Assignment {
            label,
            basis: Basis::Generation,
        },
        None => Assignment {
            label: FALLBACK_LABEL.to_string(),
            basis: Basis::Fallback,
        },
    }
}

/// Labels `members` relative to the member flagged `isSelf`, using default
/// options.
pub fn resolve(members: &[PersonRecord]) -> Result<Vec<RelationResult>> {
    RelationResolver::new().resolve(members)
}
