use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::types::{PersonId, PersonRecord};

/// Read-only index over a flat member collection.
///
/// Members are addressed by their position in the input slice. Links that
/// point at ids missing from the collection resolve to `None` rather than
/// failing; children are indexed by the raw `parentId` value so that members
/// sharing a dangling parent still count as siblings.
pub struct FamilyGraph<'a> {
    members: &'a [PersonRecord],
    by_id: HashMap<&'a PersonId, usize>,
    /// Member positions grouped by their recorded `parentId`.
    children: HashMap<&'a PersonId, Vec<usize>>,
    /// Effective spouse of each member, including one-sided links.
    spouses: Vec<Option<usize>>,
    generations: Vec<i64>,
}

impl<'a> FamilyGraph<'a> {
    /// Builds the indices for `members`. Missing generations count as 0.
    pub fn build(members: &'a [PersonRecord]) -> Self {
        let mut by_id: HashMap<&'a PersonId, usize> = HashMap::with_capacity(members.len());
        let mut children: HashMap<&'a PersonId, Vec<usize>> = HashMap::new();

        for (idx, member) in members.iter().enumerate() {
            if by_id.insert(&member.id, idx).is_some() {
                debug!(id = %member.id, "duplicate member id, keeping the last occurrence");
            }
            if let Some(parent) = member.parent_ref() {
                children.entry(parent).or_default().push(idx);
            }
        }

        let mut spouses: Vec<Option<usize>> = members
            .iter()
            .enumerate()
            .map(|(idx, member)| {
                member
                    .spouse_ref()
                    .and_then(|id| by_id.get(id).copied())
                    .filter(|&s| s != idx)
            })
            .collect();

        // A link recorded on one side only is honored in both directions.
        for idx in 0..spouses.len() {
            if let Some(s) = spouses[idx] {
                if spouses[s].is_none() {
                    spouses[s] = Some(idx);
                }
            }
        }

        let generations = members.iter().map(|m| m.generation.unwrap_or(0)).collect();

        Self {
            members,
            by_id,
            children,
            spouses,
            generations,
        }
    }

    /// Number of members in the graph.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the record at `idx`.
    pub fn person(&self, idx: usize) -> &'a PersonRecord {
        &self.members[idx]
    }

    /// Looks up a member position by id.
    pub fn index_of(&self, id: &PersonId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// The member's recorded parent, if it is present in the collection.
    pub fn parent_of(&self, idx: usize) -> Option<usize> {
        self.members[idx]
            .parent_ref()
            .and_then(|id| self.index_of(id))
            .filter(|&p| p != idx)
    }

    /// The recorded parent and that parent's spouse.
    pub fn parents_of(&self, idx: usize) -> (Option<usize>, Option<usize>) {
        let first = self.parent_of(idx);
        let second = first.and_then(|p| self.spouse_of(p)).filter(|&p| p != idx);
        (first, second)
    }

    pub fn spouse_of(&self, idx: usize) -> Option<usize> {
        self.spouses[idx]
    }

    /// Members whose `parentId` is exactly this member's id.
    pub fn children_of(&self, idx: usize) -> BTreeSet<usize> {
        self.children
            .get(&self.members[idx].id)
            .map(|c| c.iter().copied().filter(|&c| c != idx).collect())
            .unwrap_or_default()
    }

    /// Children recorded under this member or under their spouse.
    pub fn children_of_couple(&self, idx: usize) -> BTreeSet<usize> {
        let mut out = self.children_of(idx);
        if let Some(spouse) = self.spouse_of(idx) {
            out.extend(self.children_of(spouse));
        }
        out.remove(&idx);
        out
    }

    /// Members sharing this member's `parentId`, or recorded under that
    /// parent's spouse (half-sibling data entered under either parent).
    pub fn siblings_of(&self, idx: usize) -> BTreeSet<usize> {
        let mut out = BTreeSet::new();
        let Some(parent_id) = self.members[idx].parent_ref() else {
            return out;
        };

        if let Some(same) = self.children.get(parent_id) {
            out.extend(same.iter().copied());
        }
        if let (_, Some(other_parent)) = self.parents_of(idx) {
            out.extend(self.children_of(other_parent));
        }
        out.remove(&idx);
        out
    }

    /// Effective generation of a member (recorded, inferred or 0).
    pub fn generation(&self, idx: usize) -> i64 {
        self.generations[idx]
    }

    /// Generation of `idx` minus that of `from`, or `None` when the
    /// difference does not fit in an `i64`.
    pub fn generation_gap(&self, idx: usize, from: usize) -> Option<i64> {
        self.generation(idx).checked_sub(self.generation(from))
    }

    /// Direct neighbours of a member with the generation step to reach
    /// them: the recorded parent (+1), the spouse (0) and children (-1).
    fn links(&self, idx: usize) -> Vec<(usize, i64)> {
        let mut out = Vec::new();
        if let Some(parent) = self.parent_of(idx) {
            out.push((parent, 1));
        }
        if let Some(spouse) = self.spouse_of(idx) {
            out.push((spouse, 0));
        }
        out.extend(self.children_of(idx).into_iter().map(|child| (child, -1)));
        out
    }

    /// Blood ancestors and descendants of a member, excluding the member.
    ///
    /// Ancestors follow both parents upward; descendants follow the children
    /// of each couple downward.
    pub fn lineage_of(&self, idx: usize) -> BTreeSet<usize> {
        let mut seen = BTreeSet::from([idx]);

        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            let (first, second) = self.parents_of(current);
            for parent in first.into_iter().chain(second) {
                if seen.insert(parent) {
                    stack.push(parent);
                }
            }
        }

        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            for child in self.children_of_couple(current) {
                if seen.insert(child) {
                    stack.push(child);
                }
            }
        }

        seen.remove(&idx);
        seen
    }

    /// Members connected to `start` through parent, spouse and child links
    /// without passing through any member in `blocked`. `start` itself is
    /// not included.
    pub fn reachable_from(&self, start: usize, blocked: &BTreeSet<usize>) -> BTreeSet<usize> {
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for (next, _) in self.links(current) {
                if !blocked.contains(&next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen.remove(&start);
        seen
    }

    /// Fills in missing generations by walking outward from `anchor`.
    ///
    /// Parents sit one generation above their children and spouses share a
    /// generation. Recorded generations are kept and propagate to their
    /// neighbours. Members unreachable from `anchor` keep their recorded value
    /// or 0. Derived values saturate at the `i64` bounds.
    pub fn infer_generations(&mut self, anchor: usize) {
        let mut visited: HashSet<usize> = HashSet::new();
        let mut queue: VecDeque<(usize, i64)> = VecDeque::new();

        let start = self.members[anchor].generation.unwrap_or(0);
        self.generations[anchor] = start;
        visited.insert(anchor);
        queue.push_back((anchor, start));

        while let Some((current, generation)) = queue.pop_front() {
            for (next, step) in self.links(current) {
                if !visited.insert(next) {
                    continue;
                }
                let derived = generation.saturating_add(step);
                let value = self.members[next].generation.unwrap_or(derived);
                self.generations[next] = value;
                queue.push_back((next, value));
            }
        }

        debug!(
            reached = visited.len(),
            total = self.members.len(),
            "inferred generations"
        );
    }
}
