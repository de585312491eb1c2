//! Staffdesk command line
//!
//! Drives the employee and division services from a terminal. Output is plain text, or the
//! `{success, data}` / `{success, error}` envelope with `--json`.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use staffdesk::config::Config;
use staffdesk::errors::{ErrorResponse, SuccessResponse};
use staffdesk::models::{
    Division, DivisionChanges, DivisionFilter, EmployeeChanges, EmployeeFilter, EmployeeListing,
    NewDivision, NewEmployee, PageRequest, Pagination, ProfileUpdate, ThemePreference,
};
use staffdesk::{AppError, AppState};

#[derive(Parser)]
#[command(name = "staffdesk")]
#[command(about = "Employee and division records")]
struct Cli {
    /// Print the JSON envelope instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with the configured credentials
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Edit the signed-in user's profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Summary counts and the most recent employees
    Dashboard,
    Employees {
        #[command(subcommand)]
        command: EmployeeCommand,
    },
    Divisions {
        #[command(subcommand)]
        command: DivisionCommand,
    },
    /// Show or change the theme preference
    Theme {
        #[arg(value_enum)]
        preference: Option<ThemeArg>,
    },
}

#[derive(Subcommand)]
enum EmployeeCommand {
    List {
        /// Case-insensitive part of the name
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        division_id: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        per_page: Option<usize>,
    },
    Show {
        id: i64,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        position: String,
        /// Division id
        #[arg(long)]
        division: i64,
        #[arg(long)]
        image: Option<String>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        division: Option<i64>,
        #[arg(long)]
        image: Option<String>,
    },
    Remove {
        id: i64,
    },
}

#[derive(Subcommand)]
enum DivisionCommand {
    List {
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        per_page: Option<usize>,
    },
    Add {
        #[arg(long)]
        name: String,
    },
    Rename {
        id: i64,
        #[arg(long)]
        name: String,
    },
    Remove {
        id: i64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for ThemePreference {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemePreference::Light,
            ThemeArg::Dark => ThemePreference::Dark,
            ThemeArg::System => ThemePreference::System,
        }
    }
}

/// A command result in both output forms.
struct Rendered {
    data: serde_json::Value,
    text: String,
}

fn rendered<T: Serialize>(data: &T, text: impl Into<String>) -> Result<Rendered, AppError> {
    Ok(Rendered {
        data: serde_json::to_value(data)?,
        text: text.into(),
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env();

    // Logs go to stderr so stdout stays parseable
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let json_logs = config.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_logs =
        (!config.log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_logs)
        .with(text_logs)
        .init();

    tracing::debug!("Store path: {:?}", config.db_path);

    let json = cli.json;
    match run(cli.command, config).await {
        Ok(output) => {
            if json {
                let body = serde_json::to_string(&SuccessResponse::new(output.data))
                    .unwrap_or_else(|e| e.to_string());
                println!("{}", body);
            } else if !output.text.is_empty() {
                println!("{}", output.text);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if json {
                let body = serde_json::to_string(&ErrorResponse::new(&err))
                    .unwrap_or_else(|_| err.to_string());
                println!("{}", body);
            } else {
                eprintln!("error: {}", err.message());
            }
            ExitCode::from(err.exit_status())
        }
    }
}

async fn run(command: Command, config: Config) -> Result<Rendered, AppError> {
    let state = AppState::open(config).await?;

    match command {
        Command::Login { username, password } => {
            let outcome = state.session.login(&username, &password).await?;
            if !outcome.success {
                return Err(AppError::Unauthorized(outcome.message));
            }
            rendered(&outcome, outcome.message.clone())
        }
        Command::Logout => {
            state.sign_out().await?;
            rendered(&(), "Signed out")
        }
        Command::Theme { preference } => {
            if let Some(preference) = preference {
                state.theme.set(preference.into()).await?;
            }
            let current = state.theme.current().await?;
            rendered(&current, format!("Theme: {}", current))
        }
        command => {
            state.session.require_user().await?;
            run_signed_in(&state, command).await
        }
    }
}

async fn run_signed_in(state: &AppState, command: Command) -> Result<Rendered, AppError> {
    match command {
        Command::Whoami => {
            let user = state.session.require_user().await?;
            let text = format!(
                "{} <{}>\nusername: {}\nphone: {}",
                user.name, user.email, user.username, user.phone
            );
            rendered(&user, text)
        }
        Command::Profile { name, email, phone } => {
            let user = state
                .session
                .update_profile(&ProfileUpdate { name, email, phone })
                .await?;
            rendered(&user, "Profile updated successfully!")
        }
        Command::Dashboard => {
            let summary = state.dashboard.summary().await?;
            let mut text = format!(
                "Employees: {}\nDivisions: {}\nActive: {}\n\nRecent employees:",
                summary.total_employees, summary.total_divisions, summary.active_employees
            );
            if summary.recent_employees.is_empty() {
                text.push_str("\n  (none yet)");
            }
            for listing in &summary.recent_employees {
                text.push('\n');
                text.push_str(&employee_line(listing));
            }
            rendered(&summary, text)
        }
        Command::Employees { command } => run_employees(state, command).await,
        Command::Divisions { command } => run_divisions(state, command).await,
        Command::Login { .. } | Command::Logout | Command::Theme { .. } => Err(AppError::Internal(
            "Command does not need a session".to_string(),
        )),
    }
}

async fn run_employees(state: &AppState, command: EmployeeCommand) -> Result<Rendered, AppError> {
    match command {
        EmployeeCommand::List {
            name,
            division_id,
            page,
            per_page,
        } => {
            let filter = EmployeeFilter { name, division_id };
            let request = page_request(state, page, per_page);
            let result = state.employees.list_with_divisions(&filter, request).await?;

            let mut lines: Vec<String> = result.data.iter().map(employee_line).collect();
            if lines.is_empty() {
                lines.push("No employees found".to_string());
            }
            lines.push(pagination_line(&result.pagination));
            rendered(&result, lines.join("\n"))
        }
        EmployeeCommand::Show { id } => {
            let employee = state.employees.get(id).await?;
            let division = state.divisions.find(employee.division).await?;
            let listing = EmployeeListing { employee, division };
            let text = format!(
                "{}\nphone: {}\nimage: {}",
                employee_line(&listing),
                listing.employee.phone,
                listing.employee.image.as_deref().unwrap_or("-")
            );
            rendered(&listing, text)
        }
        EmployeeCommand::Add {
            name,
            phone,
            position,
            division,
            image,
        } => {
            let employee = state
                .employees
                .create(&NewEmployee {
                    name,
                    phone,
                    position,
                    image,
                    division,
                })
                .await?;
            let text = format!("Created employee {} ({})", employee.id, employee.name);
            rendered(&employee, text)
        }
        EmployeeCommand::Edit {
            id,
            name,
            phone,
            position,
            division,
            image,
        } => {
            let changes = EmployeeChanges {
                name,
                phone,
                position,
                image,
                division,
            };
            let employee = state.employees.update(id, &changes).await?;
            let text = format!("Updated employee {} ({})", employee.id, employee.name);
            rendered(&employee, text)
        }
        EmployeeCommand::Remove { id } => {
            let removed = state.employees.delete(id).await?;
            let text = if removed {
                format!("Deleted employee {}", id)
            } else {
                format!("Employee {} was already gone", id)
            };
            rendered(&serde_json::json!({ "id": id, "removed": removed }), text)
        }
    }
}

async fn run_divisions(state: &AppState, command: DivisionCommand) -> Result<Rendered, AppError> {
    match command {
        DivisionCommand::List {
            name,
            page,
            per_page,
        } => {
            let filter = DivisionFilter { name };
            let request = page_request(state, page, per_page);
            let result = state.divisions.get_all(&filter, request).await?;

            let mut lines: Vec<String> = result.data.iter().map(division_line).collect();
            if lines.is_empty() {
                lines.push("No divisions found".to_string());
            }
            lines.push(pagination_line(&result.pagination));
            rendered(&result, lines.join("\n"))
        }
        DivisionCommand::Add { name } => {
            let division = state.divisions.create(&NewDivision { name }).await?;
            let text = format!("Created division {} ({})", division.id, division.name);
            rendered(&division, text)
        }
        DivisionCommand::Rename { id, name } => {
            let division = state
                .divisions
                .update(id, &DivisionChanges { name: Some(name) })
                .await?;
            let text = format!("Renamed division {} to {}", division.id, division.name);
            rendered(&division, text)
        }
        DivisionCommand::Remove { id } => {
            let removed = state.divisions.delete(id).await?;
            let text = if removed {
                format!("Deleted division {}", id)
            } else {
                format!("Division {} was already gone", id)
            };
            rendered(&serde_json::json!({ "id": id, "removed": removed }), text)
        }
    }
}

fn page_request(state: &AppState, page: usize, per_page: Option<usize>) -> PageRequest {
    match per_page {
        Some(per_page) => PageRequest::new(page, per_page),
        None => state.page(page),
    }
}

fn employee_line(listing: &EmployeeListing) -> String {
    let employee = &listing.employee;
    let division = listing
        .division
        .as_ref()
        .map(|d| d.name.as_str())
        .unwrap_or("(unknown division)");
    format!(
        "{:>4}  {:<24} {:<20} {}",
        employee.id, employee.name, employee.position, division
    )
}

fn division_line(division: &Division) -> String {
    format!("{:>4}  {}", division.id, division.name)
}

fn pagination_line(pagination: &Pagination) -> String {
    format!(
        "page {}/{} ({} total)",
        pagination.current_page, pagination.last_page, pagination.total
    )
}
