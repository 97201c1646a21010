use std::collections::BTreeSet;

use super::FamilyGraph;

/// Relatives of one anchor member, grouped by how they are reached.
///
/// Every set holds member positions in the graph the sets were derived from.
/// A member may appear in several sets; the labeling rules decide which
/// membership wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Kindred {
    pub anchor: usize,
    pub spouse: Option<usize>,
    pub father: Option<usize>,
    pub mother: Option<usize>,
    pub siblings: BTreeSet<usize>,
    pub children: BTreeSet<usize>,
    pub uncles_aunts: BTreeSet<usize>,
    /// Spouses of `uncles_aunts` who are not themselves blood uncles/aunts.
    pub uncles_aunts_by_marriage: BTreeSet<usize>,
    pub cousins: BTreeSet<usize>,
    pub nieces_nephews: BTreeSet<usize>,
    pub spouse_parents: BTreeSet<usize>,
    pub spouse_siblings: BTreeSet<usize>,
    pub spouse_uncles_aunts: BTreeSet<usize>,
    pub sibling_spouses: BTreeSet<usize>,
    pub spouse_sibling_spouses: BTreeSet<usize>,
    pub child_spouses: BTreeSet<usize>,
    /// Blood ancestors and descendants of the anchor.
    pub lineage: BTreeSet<usize>,
    /// Members reached from the spouse without going through the anchor or
    /// the anchor's lineage.
    pub spouse_side: BTreeSet<usize>,
}

impl Kindred {
    /// Derives every relative set of `anchor` from the graph indices.
    pub fn derive(graph: &FamilyGraph<'_>, anchor: usize) -> Self {
        let (father, mother) = graph.parents_of(anchor);
        let spouse = graph.spouse_of(anchor);

        let siblings = graph.siblings_of(anchor);
        let children = graph.children_of_couple(anchor);

        let uncles_aunts = siblings_of_all(graph, father.iter().chain(mother.iter()));
        let uncles_aunts_by_marriage = spouses_of_all(graph, &uncles_aunts)
            .difference(&uncles_aunts)
            .copied()
            .collect();
        let cousins = children_of_all(graph, &uncles_aunts);
        let nieces_nephews = children_of_all(graph, &siblings);

        let (spouse_parents, spouse_siblings, spouse_uncles_aunts) = match spouse {
            Some(s) => {
                let (p1, p2) = graph.parents_of(s);
                let parents: BTreeSet<usize> = p1.into_iter().chain(p2).collect();
                let uncles = siblings_of_all(graph, parents.iter());
                (parents, graph.siblings_of(s), uncles)
            }
            None => Default::default(),
        };

        let sibling_spouses = spouses_of_all(graph, &siblings);
        let spouse_sibling_spouses = spouses_of_all(graph, &spouse_siblings);
        let child_spouses = spouses_of_all(graph, &children);

        let lineage = graph.lineage_of(anchor);
        let spouse_side = match spouse {
            Some(s) => {
                let mut blocked = lineage.clone();
                blocked.insert(anchor);
                graph.reachable_from(s, &blocked)
            }
            None => BTreeSet::new(),
        };

        Self {
            anchor,
            spouse,
            father,
            mother,
            siblings,
            children,
            uncles_aunts,
            uncles_aunts_by_marriage,
            cousins,
            nieces_nephews,
            spouse_parents,
            spouse_siblings,
            spouse_uncles_aunts,
            sibling_spouses,
            spouse_sibling_spouses,
            child_spouses,
            lineage,
            spouse_side,
        }
    }

    /// True when `idx` is the anchor's father or mother.
    pub fn is_parent(&self, idx: usize) -> bool {
        self.father == Some(idx) || self.mother == Some(idx)
    }

    /// True when the anchor has at least one parent present in the graph.
    pub fn has_parents(&self) -> bool {
        self.father.is_some()
    }
}

fn siblings_of_all<'i>(
    graph: &FamilyGraph<'_>,
    members: impl Iterator<Item = &'i usize>,
) -> BTreeSet<usize> {
    members.flat_map(|&m| graph.siblings_of(m)).collect()
}

fn children_of_all(graph: &FamilyGraph<'_>, members: &BTreeSet<usize>) -> BTreeSet<usize> {
    members
        .iter()
        .flat_map(|&m| graph.children_of_couple(m))
        .collect()
}

fn spouses_of_all(graph: &FamilyGraph<'_>, members: &BTreeSet<usize>) -> BTreeSet<usize> {
    members
        .iter()
        .filter_map(|&m| graph.spouse_of(m))
        .collect()
}
