//! Employee model.

use serde::{Deserialize, Serialize};

use super::Division;

/// An employee record as persisted in the `employees` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Division id. May point at a division that was deleted later.
    pub division: i64,
}

/// Fields for creating a new employee.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub phone: String,
    pub position: String,
    #[serde(default)]
    pub image: Option<String>,
    pub division: i64,
}

/// Fields for updating an existing employee. `None` keeps the current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub division: Option<i64>,
}

/// Filter for listing employees. Both criteria must hold.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeFilter {
    /// Case-insensitive substring of the employee name
    #[serde(default)]
    pub name: Option<String>,
    /// Exact division id
    #[serde(default)]
    pub division_id: Option<i64>,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        name_matches(self.name.as_deref(), &employee.name)
            && self
                .division_id
                .map_or(true, |division| employee.division == division)
    }
}

/// Case-insensitive substring match. A blank needle matches everything.
pub(crate) fn name_matches(needle: Option<&str>, haystack: &str) -> bool {
    match needle.map(str::trim) {
        None | Some("") => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

/// An employee together with its resolved division, for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmployeeListing {
    #[serde(flatten)]
    pub employee: Employee,
    /// `None` when the division reference is orphaned
    #[serde(rename = "division_detail")]
    pub division: Option<Division>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: i64, name: &str, division: i64) -> Employee {
        Employee {
            id,
            name: name.to_string(),
            phone: "0800".to_string(),
            position: "Engineer".to_string(),
            image: None,
            division,
        }
    }

    #[test]
    fn test_name_filter_is_case_insensitive_substring() {
        let filter = EmployeeFilter {
            name: Some("smith".to_string()),
            division_id: None,
        };
        assert!(filter.matches(&employee(1, "Alice Smith", 1)));
        assert!(!filter.matches(&employee(2, "Bob Jones", 1)));
    }

    #[test]
    fn test_single_letter_filter() {
        let filter = EmployeeFilter {
            name: Some("a".to_string()),
            division_id: None,
        };
        assert!(filter.matches(&employee(1, "Alice", 10)));
        assert!(!filter.matches(&employee(2, "Bob", 20)));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filter = EmployeeFilter {
            name: Some("ali".to_string()),
            division_id: Some(10),
        };
        assert!(filter.matches(&employee(1, "Alice", 10)));
        assert!(!filter.matches(&employee(2, "Alice", 20)));
        assert!(!filter.matches(&employee(3, "Bob", 10)));
    }

    #[test]
    fn test_blank_name_matches_everything() {
        let filter = EmployeeFilter {
            name: Some("   ".to_string()),
            division_id: None,
        };
        assert!(filter.matches(&employee(1, "Anyone", 1)));
    }

    #[test]
    fn test_image_omitted_when_absent() {
        let json = serde_json::to_value(employee(1, "Alice", 10)).unwrap();
        assert!(json.get("image").is_none());
        assert_eq!(json["division"], 10);
    }
}
