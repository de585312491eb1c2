//! Division model.

use serde::{Deserialize, Serialize};

/// A division employees belong to. Flat reference table, no hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Division {
    pub id: i64,
    pub name: String,
}

/// Names of the divisions seeded on first access.
pub const DEFAULT_DIVISIONS: [&str; 6] = [
    "Mobile Apps",
    "QA",
    "Full Stack",
    "Backend",
    "Frontend",
    "UI/UX Designer",
];

impl Division {
    /// The default division table, numbered from 1.
    pub fn defaults() -> Vec<Division> {
        DEFAULT_DIVISIONS
            .iter()
            .zip(1..)
            .map(|(name, id)| Division {
                id,
                name: (*name).to_string(),
            })
            .collect()
    }
}

/// Fields for creating a new division.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDivision {
    pub name: String,
}

/// Fields for updating an existing division.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DivisionChanges {
    #[serde(default)]
    pub name: Option<String>,
}

/// Filter for listing divisions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DivisionFilter {
    /// Case-insensitive substring of the division name
    #[serde(default)]
    pub name: Option<String>,
}

impl DivisionFilter {
    pub fn matches(&self, division: &Division) -> bool {
        super::employee::name_matches(self.name.as_deref(), &division.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_numbered_from_one() {
        let divisions = Division::defaults();
        assert_eq!(divisions.len(), 6);
        assert_eq!(divisions[0].id, 1);
        assert_eq!(divisions[0].name, "Mobile Apps");
        assert_eq!(divisions[5].id, 6);
        assert_eq!(divisions[5].name, "UI/UX Designer");
    }

    #[test]
    fn test_filter_by_name() {
        let filter = DivisionFilter {
            name: Some("END".to_string()),
        };
        let matched: Vec<_> = Division::defaults()
            .into_iter()
            .filter(|d| filter.matches(d))
            .map(|d| d.name)
            .collect();
        assert_eq!(matched, vec!["Backend", "Frontend"]);
    }
}
