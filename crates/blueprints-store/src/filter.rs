use serde::{Deserialize, Serialize};

use blueprints_core::Blueprint;

/// Post-processing applied to blueprints on the read path.
/// Filters never touch author or name, and pass empty point lists through.
pub trait BlueprintFilter: Send + Sync {
    fn filter(&self, blueprint: Blueprint) -> Blueprint;

    fn filter_all(&self, blueprints: Vec<Blueprint>) -> Vec<Blueprint> {
        blueprints.into_iter().map(|bp| self.filter(bp)).collect()
    }
}

/// Configurable filter selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Leave blueprints unchanged.
    #[default]
    Identity,
    /// Drop each point equal to its immediate predecessor.
    Redundancy,
    /// Keep only the points at even indices.
    Subsampling,
}

impl BlueprintFilter for FilterKind {
    fn filter(&self, mut blueprint: Blueprint) -> Blueprint {
        match self {
            Self::Identity => {}
            Self::Redundancy => blueprint.points.dedup(),
            Self::Subsampling => {
                blueprint.points = blueprint.points.into_iter().step_by(2).collect();
            }
        }
        blueprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprints_core::Point;

    fn bp(coords: &[(f64, f64)]) -> Blueprint {
        Blueprint::new("a", "b", coords.iter().copied().map(Point::from).collect())
    }

    #[test]
    fn identity_keeps_points() {
        let input = bp(&[(1.0, 1.0), (1.0, 1.0)]);
        assert_eq!(FilterKind::Identity.filter(input.clone()), input);
    }

    #[test]
    fn redundancy_drops_consecutive_duplicates_only() {
        let out = FilterKind::Redundancy.filter(bp(&[
            (1.0, 1.0),
            (1.0, 1.0),
            (2.0, 2.0),
            (1.0, 1.0),
            (1.0, 1.0),
        ]));
        assert_eq!(out.points, bp(&[(1.0, 1.0), (2.0, 2.0), (1.0, 1.0)]).points);
        assert_eq!(out.author, "a");
        assert_eq!(out.name, "b");
    }

    #[test]
    fn subsampling_keeps_even_indices() {
        let out = FilterKind::Subsampling.filter(bp(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (2.0, 2.0),
            (3.0, 3.0),
            (4.0, 4.0),
        ]));
        assert_eq!(out.points, bp(&[(0.0, 0.0), (2.0, 2.0), (4.0, 4.0)]).points);
    }

    #[test]
    fn empty_points_pass_through() {
        for kind in [FilterKind::Identity, FilterKind::Redundancy, FilterKind::Subsampling] {
            assert!(kind.filter(bp(&[])).points.is_empty());
        }
    }

    #[test]
    fn filter_kind_serde() {
        assert_eq!(serde_json::to_string(&FilterKind::Subsampling).unwrap(), "\"subsampling\"");
        let parsed: FilterKind = serde_json::from_str("\"redundancy\"").unwrap();
        assert_eq!(parsed, FilterKind::Redundancy);
    }
}
