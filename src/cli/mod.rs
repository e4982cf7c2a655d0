//! Command-line front-end over the session and permission gate.
//!
//! Parsing lives in [`Cli`]; [`prompt_missing`] fills interactive gaps with
//! `dialoguer`; [`run`] executes a fully resolved [`Commands`] against a
//! [`Session`] and writes human-readable output.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use schoolgate_auth::{PermissionOverrides, Role};
use schoolgate_core::{Action, AppError, Resource};
use schoolgate_session::{Session, SessionUser};

#[derive(Parser, Debug)]
#[command(name = "schoolgate")]
#[command(about = "SchoolGate - session and permission gate for the school portal", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Sign in and persist the session
    Login {
        /// Role to sign in as (prompted if not provided)
        #[arg(short = 'r', long)]
        role: Option<Role>,

        /// Display name (prompted if not provided)
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// JSON file with per-user permission overrides
        #[arg(short = 'o', long)]
        overrides: Option<PathBuf>,
    },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Check whether the current identity may perform an action
    Check {
        /// Resource name, e.g. attendance
        resource: Resource,
        /// One of view, create, edit, delete
        action: Action,
    },
    /// Print every resource with the actions currently allowed on it
    Matrix,
    /// Update the signed-in user's profile
    UpdateProfile {
        /// New display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// New email address
        #[arg(short = 'e', long)]
        email: Option<String>,
    },
}

/// Prompt for the login fields the user left out.
pub fn prompt_missing(command: Commands) -> Result<Commands, AppError> {
    match command {
        Commands::Login {
            role,
            name,
            email,
            overrides,
        } => {
            let role = match role {
                Some(role) => role,
                None => {
                    let labels: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
                    let index = Select::new()
                        .with_prompt("Role")
                        .items(&labels[..])
                        .default(0)
                        .interact()?;
                    Role::ALL[index]
                }
            };

            let name = match name {
                Some(name) => name,
                None => Input::<String>::new().with_prompt("Name").interact_text()?,
            };

            Ok(Commands::Login {
                role: Some(role),
                name: Some(name),
                email,
                overrides,
            })
        }
        other => Ok(other),
    }
}

/// Execute `command` against `session`, writing output to `out`.
pub fn run<W: Write>(command: Commands, session: &mut Session, out: &mut W) -> Result<(), AppError> {
    match command {
        Commands::Login {
            role,
            name,
            email,
            overrides,
        } => {
            let role = role.ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Role is required")))?;
            let name = name.ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Name is required")))?;

            let mut user = SessionUser::new(name);
            user.email = email;
            if let Some(path) = overrides {
                let raw = std::fs::read_to_string(&path).map_err(|e| {
                    AppError::bad_request(anyhow::anyhow!(
                        "Failed to read overrides file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                user.permissions = Some(PermissionOverrides::from_json(&raw)?);
            }

            session.login(role, user)?;
            writeln!(out, "✅ Signed in as {}", describe(session))?;
        }
        Commands::Logout => {
            let was_signed_in = session.is_authenticated();
            let redirect = session.logout();
            if was_signed_in {
                writeln!(out, "✅ Signed out")?;
            } else {
                writeln!(out, "Not signed in")?;
            }
            writeln!(out, "   Continue at {}", redirect.location)?;
        }
        Commands::Whoami => {
            if session.is_authenticated() {
                writeln!(out, "{}", describe(session))?;
                if let Some(email) = session.user().and_then(|u| u.email.as_deref()) {
                    writeln!(out, "   Email: {}", email)?;
                }
            } else {
                writeln!(out, "Not signed in")?;
            }
        }
        Commands::Check { resource, action } => {
            let allowed = session.permissions().has_permission(resource, action);
            let verdict = if allowed { "allowed" } else { "denied" };
            writeln!(out, "{} {}: {}", action, resource, verdict)?;

            if !allowed {
                return Err(AppError::forbidden(format!(
                    "{} may not {} {}",
                    role_label(session),
                    action,
                    resource
                )));
            }
        }
        Commands::Matrix => {
            writeln!(out, "Permissions for {}", role_label(session))?;
            for (resource, actions) in session.permissions().matrix() {
                let actions = if actions.is_empty() {
                    "-".to_string()
                } else {
                    actions
                        .iter()
                        .map(|a| a.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                writeln!(out, "  {:<14}{}", resource.as_str(), actions)?;
            }
        }
        Commands::UpdateProfile { name, email } => {
            let mut user = session
                .user()
                .cloned()
                .ok_or_else(|| AppError::unauthorized("Not signed in".to_string()))?;
            if let Some(name) = name {
                user.name = name;
            }
            if let Some(email) = email {
                user.email = Some(email);
            }

            session.update_user(user)?;
            writeln!(out, "✅ Profile updated: {}", describe(session))?;
        }
    }

    Ok(())
}

fn role_label(session: &Session) -> String {
    session
        .role()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "signed-out user".to_string())
}

fn describe(session: &Session) -> String {
    match (session.user(), session.role()) {
        (Some(user), Some(role)) => format!("{} ({}, {})", user.name, role, user.id),
        _ => "signed-out user".to_string(),
    }
}
