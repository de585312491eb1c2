//! Division records.

use crate::errors::AppError;
use crate::models::{
    Division, DivisionChanges, DivisionFilter, NewDivision, PageRequest, Paginated,
};
use crate::store::{keys, Store};

use super::{required, Collection, Record};

impl Record for Division {
    const COLLECTION_KEY: &'static str = keys::DIVISIONS;
    const LABEL: &'static str = "Division";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// CRUD, filtering and pagination over divisions.
///
/// Deleting a division does not touch employees that reference it.
#[derive(Clone)]
pub struct DivisionService {
    divisions: Collection<Division>,
}

impl DivisionService {
    /// `seed_defaults` makes the collection read as [`Division::defaults`] until first written.
    pub fn new(store: Store, seed_defaults: bool) -> Self {
        let seed = if seed_defaults {
            Division::defaults()
        } else {
            Vec::new()
        };
        Self {
            divisions: Collection::with_seed(store, seed),
        }
    }

    /// Every division in insertion order.
    pub async fn list(&self) -> Result<Vec<Division>, AppError> {
        self.divisions.load().await
    }

    pub async fn get_all(
        &self,
        filter: &DivisionFilter,
        page: PageRequest,
    ) -> Result<Paginated<Division>, AppError> {
        self.divisions.query(|d| filter.matches(d), page).await
    }

    pub async fn find(&self, id: i64) -> Result<Option<Division>, AppError> {
        self.divisions.get(id).await
    }

    pub async fn get(&self, id: i64) -> Result<Division, AppError> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Division {} not found", id)))
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.divisions.count().await
    }

    /// Create a division. Names are unique ignoring case.
    pub async fn create(&self, request: &NewDivision) -> Result<Division, AppError> {
        let division = Division {
            id: 0,
            name: required("Division name", &request.name)?,
        };

        self.divisions
            .insert(division, |new, existing| {
                ensure_unique_name(&new.name, None, existing)
            })
            .await
    }

    pub async fn update(&self, id: i64, changes: &DivisionChanges) -> Result<Division, AppError> {
        self.divisions
            .update(id, |division, existing| {
                if let Some(name) = &changes.name {
                    let name = required("Division name", name)?;
                    ensure_unique_name(&name, Some(id), existing)?;
                    division.name = name;
                }
                Ok(())
            })
            .await
    }

    /// Remove the division with `id`. Deleting an unknown id succeeds and returns `false`.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.divisions.delete(id).await
    }
}

fn ensure_unique_name(name: &str, own_id: Option<i64>, existing: &[Division]) -> Result<(), AppError> {
    let taken = existing
        .iter()
        .any(|d| Some(d.id) != own_id && d.name.to_lowercase() == name.to_lowercase());
    if taken {
        return Err(AppError::Validation(format!(
            "Division '{}' already exists",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name_ignores_case() {
        let existing = Division::defaults();
        assert!(ensure_unique_name("backend", None, &existing).is_err());
        assert!(ensure_unique_name("Data", None, &existing).is_ok());
    }

    #[test]
    fn test_unique_name_allows_own_record() {
        let existing = Division::defaults();
        assert!(ensure_unique_name("qa", Some(2), &existing).is_ok());
        assert!(ensure_unique_name("qa", Some(3), &existing).is_err());
    }
}
