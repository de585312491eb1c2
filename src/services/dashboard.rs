//! Dashboard summary.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::{EmployeeFilter, EmployeeListing, PageRequest};

use super::{DivisionService, EmployeeService};

/// How many employees the dashboard reads.
const SUMMARY_WINDOW: usize = 100;
/// How many employees the "recent" card shows.
const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_employees: usize,
    pub total_divisions: usize,
    /// There is no inactive state yet, so this equals `total_employees`.
    pub active_employees: usize,
    pub recent_employees: Vec<EmployeeListing>,
}

#[derive(Clone)]
pub struct DashboardService {
    employees: EmployeeService,
    divisions: DivisionService,
}

impl DashboardService {
    pub fn new(employees: EmployeeService, divisions: DivisionService) -> Self {
        Self {
            employees,
            divisions,
        }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, AppError> {
        let listing = self
            .employees
            .list_with_divisions(&EmployeeFilter::default(), PageRequest::first(SUMMARY_WINDOW))
            .await?;
        let total_divisions = self.divisions.count().await?;

        let total_employees = listing.pagination.total;
        let recent_employees = listing.data.into_iter().take(RECENT_LIMIT).collect();

        Ok(DashboardSummary {
            total_employees,
            total_divisions,
            active_employees: total_employees,
            recent_employees,
        })
    }
}
