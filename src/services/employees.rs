//! Employee records.

use crate::errors::AppError;
use crate::models::{
    Division, Employee, EmployeeChanges, EmployeeFilter, EmployeeListing, NewEmployee,
    PageRequest, Paginated,
};
use crate::store::{keys, Store};

use super::{required, Collection, DivisionService, Record};

impl Record for Employee {
    const COLLECTION_KEY: &'static str = keys::EMPLOYEES;
    const LABEL: &'static str = "Employee";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// CRUD, filtering and pagination over employees.
#[derive(Clone)]
pub struct EmployeeService {
    employees: Collection<Employee>,
    divisions: DivisionService,
}

impl EmployeeService {
    pub fn new(store: Store, divisions: DivisionService) -> Self {
        Self {
            employees: Collection::new(store),
            divisions,
        }
    }

    /// Employees matching `filter`, one page at a time, in insertion order.
    pub async fn get_all(
        &self,
        filter: &EmployeeFilter,
        page: PageRequest,
    ) -> Result<Paginated<Employee>, AppError> {
        let result = self.employees.query(|e| filter.matches(e), page).await?;
        tracing::debug!(
            total = result.pagination.total,
            page = result.pagination.current_page,
            "Listed employees"
        );
        Ok(result)
    }

    /// Like [`get_all`](Self::get_all), with each employee's division resolved for display.
    pub async fn list_with_divisions(
        &self,
        filter: &EmployeeFilter,
        page: PageRequest,
    ) -> Result<Paginated<EmployeeListing>, AppError> {
        let divisions = self.divisions.list().await?;
        let page = self.get_all(filter, page).await?;
        Ok(page.map(|employee| resolve(employee, &divisions)))
    }

    pub async fn get(&self, id: i64) -> Result<Employee, AppError> {
        self.employees
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.employees.count().await
    }

    /// Validate and append a new employee.
    pub async fn create(&self, request: &NewEmployee) -> Result<Employee, AppError> {
        let employee = Employee {
            id: 0,
            name: required("Name", &request.name)?,
            phone: required("Phone", &request.phone)?,
            position: required("Position", &request.position)?,
            image: normalize_image(request.image.as_deref())?,
            division: request.division,
        };
        self.ensure_division_exists(employee.division).await?;

        self.employees.insert(employee, |_, _| Ok(())).await
    }

    /// Merge `changes` into the employee with `id`. Fields left as `None` keep their value.
    pub async fn update(&self, id: i64, changes: &EmployeeChanges) -> Result<Employee, AppError> {
        if let Some(division) = changes.division {
            self.ensure_division_exists(division).await?;
        }

        self.employees
            .update(id, |employee, _| {
                if let Some(name) = &changes.name {
                    employee.name = required("Name", name)?;
                }
                if let Some(phone) = &changes.phone {
                    employee.phone = required("Phone", phone)?;
                }
                if let Some(position) = &changes.position {
                    employee.position = required("Position", position)?;
                }
                if let Some(image) = &changes.image {
                    employee.image = normalize_image(Some(image))?;
                }
                if let Some(division) = changes.division {
                    employee.division = division;
                }
                Ok(())
            })
            .await
    }

    /// Remove the employee with `id`. Deleting an unknown id succeeds and returns `false`.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.employees.delete(id).await
    }

    async fn ensure_division_exists(&self, division: i64) -> Result<(), AppError> {
        match self.divisions.find(division).await? {
            Some(_) => Ok(()),
            None => Err(AppError::Validation(format!(
                "Division {} does not exist",
                division
            ))),
        }
    }
}

fn resolve(employee: Employee, divisions: &[Division]) -> EmployeeListing {
    let division = divisions.iter().find(|d| d.id == employee.division).cloned();
    EmployeeListing { employee, division }
}

/// Blank images are dropped; anything else must be an http(s) URL.
fn normalize_image(image: Option<&str>) -> Result<Option<String>, AppError> {
    match image.map(str::trim) {
        None | Some("") => Ok(None),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Ok(Some(url.to_string()))
        }
        Some(_) => Err(AppError::Validation(
            "Image must be an http or https URL".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_image() {
        assert_eq!(normalize_image(None).unwrap(), None);
        assert_eq!(normalize_image(Some("  ")).unwrap(), None);
        assert_eq!(
            normalize_image(Some(" https://cdn.example.com/a.png ")).unwrap(),
            Some("https://cdn.example.com/a.png".to_string())
        );
        assert!(normalize_image(Some("ftp://example.com/a.png")).is_err());
    }

    #[test]
    fn test_resolve_tolerates_orphaned_division() {
        let employee = Employee {
            id: 1,
            name: "Alice".to_string(),
            phone: "0800".to_string(),
            position: "QA Engineer".to_string(),
            image: None,
            division: 42,
        };
        let listing = resolve(employee, &Division::defaults());
        assert!(listing.division.is_none());
        assert_eq!(listing.employee.division, 42);
    }
}
