use crate::graph::FamilyGraph;

use super::labels::to_in_law;
use super::resolver::{Assignment, Basis};

/// Generations, relative to the spouse, whose members count as the spouse's
/// blood relatives when merging a re-based pass.
const SPOUSE_BLOOD_WINDOW: std::ops::RangeInclusive<i64> = 0..=1;

/// Merges the pass anchored on the spouse into the pass anchored on the
/// reference person.
///
/// The reference person and the spouse keep their direct labels, as does any
/// member a direct rule already placed. Other members within the spouse's
/// blood window take the spouse-pass rule label converted to its in-law form.
pub(crate) fn merge_rebased(
    graph: &FamilyGraph<'_>,
    anchor: usize,
    spouse: usize,
    direct: Vec<Assignment>,
    rebased: Vec<Assignment>,
) -> Vec<Assignment> {
    direct
        .into_iter()
        .zip(rebased)
        .enumerate()
        .map(|(idx, (own, theirs))| {
            if idx == anchor || idx == spouse || matches!(own.basis, Basis::Rule(_)) {
                return own;
            }
            let in_window = graph
                .generation_gap(idx, spouse)
                .is_some_and(|gap| SPOUSE_BLOOD_WINDOW.contains(&gap));
            match theirs.basis {
                Basis::Rule(name) if in_window => Assignment {
                    label: to_in_law(&theirs.label),
                    basis: Basis::Rebased(name),
                },
                _ => own,
            }
        })
        .collect()
}
