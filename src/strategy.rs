//! Solving strategies (formulations) the solver is benchmarked under.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which counter a strategy reports in its third table column.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountMetric {
    /// Branch-and-bound nodes explored
    Nodes,
    /// Cutting planes added
    Cuts,
}

impl CountMetric {
    /// Key looked up in the solver's RESULT record
    pub fn key(&self) -> &'static str {
        match self {
            CountMetric::Nodes => "nodes",
            CountMetric::Cuts => "cuts",
        }
    }

    /// Column header used in the report
    pub fn header(&self) -> &'static str {
        match self {
            CountMetric::Nodes => "Nodes",
            CountMetric::Cuts => "Cuts",
        }
    }
}

/// A solving mode passed to the solver, with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    /// Mode argument given to the solver (e.g. `MTZ`)
    pub id: String,
    /// Column-group title in the report (LaTeX allowed)
    pub label: String,
    /// Counter shown for this strategy
    pub count_metric: CountMetric,
}

impl Strategy {
    pub fn new(id: &str, label: &str, count_metric: CountMetric) -> Self {
        Strategy {
            id: id.to_string(),
            label: label.to_string(),
            count_metric,
        }
    }

    /// MTZ formulation, CUT with integer separation, CUT with fractional separation
    pub fn default_set() -> Vec<Strategy> {
        vec![
            Strategy::new("MTZ", "MTZ", CountMetric::Nodes),
            Strategy::new("CUT", "CUT (sol $\\in \\mathbb{N}$)", CountMetric::Cuts),
            Strategy::new("CUT_LP", "CUT (sol $\\in \\mathbb{Q}$)", CountMetric::Nodes),
        ]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_order() {
        let ids: Vec<String> = Strategy::default_set().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["MTZ", "CUT", "CUT_LP"]);
    }

    #[test]
    fn test_count_metric_is_static() {
        let set = Strategy::default_set();
        assert_eq!(set[0].count_metric.key(), "nodes");
        assert_eq!(set[1].count_metric.key(), "cuts");
        assert_eq!(set[1].count_metric.header(), "Cuts");
        assert_eq!(set[2].count_metric.key(), "nodes");
    }
}
