use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic::api::ClinicApi;
use clinic::config;
use clinic::dashboard::{AdminDashboard, DoctorDashboard};
use clinic::errors::ClientError;
use clinic::gateway::ApiGateway;
use clinic::middleware::guard::{Access, DenialReason, RouteGuard};
use clinic::middleware::identity::Identity;
use clinic::models::doctor::DoctorUpdate;
use clinic::models::patient::NewPatient;
use clinic::session::file::FileStore;
use clinic::session::SessionManager;
use clinic::views::View;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "quickcare=info,clinic=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::Cli::parse();
    let mut cfg = config::load()?;
    if let Some(url) = args.api_url.as_deref() {
        cfg = cfg.with_api_url(url)?;
    }

    tracing::debug!(api_url = %cfg.api_url, session_file = %cfg.session_file.display(), "Configuration loaded");

    let session = Arc::new(SessionManager::new(FileStore::new(cfg.session_file.clone())));
    let gateway = ApiGateway::new(&cfg, session).context("Failed to build HTTP client")?;
    let api = ClinicApi::new(gateway);

    let result = match args.command {
        cli::Commands::Signup { username, password } => {
            api.register_admin(&username, &password).await?;
            println!("Superuser created. You can now log in.");
            Ok(())
        }
        cli::Commands::Login { username, password } => handle_login(&api, &username, &password).await,
        cli::Commands::Logout => {
            api.logout()?;
            println!("Logged out. Now at {}", View::Signup);
            Ok(())
        }
        cli::Commands::Whoami => {
            match api.whoami() {
                Ok(Some(identity)) => print_identity(&identity),
                Ok(None) => println!("Not logged in."),
                Err(e) => println!("Stored credential is unreadable: {}", e),
            }
            Ok(())
        }
        cli::Commands::Open { view } => {
            let view: View = view.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            open_view(&api, view).await
        }
        cli::Commands::Admin { command } => {
            let identity = navigate(&api, View::AdminDashboard)?;
            handle_admin_command(&api, &identity, command).await
        }
        cli::Commands::Doctor { command } => {
            navigate(&api, View::DoctorDashboard)?;
            handle_doctor_command(&api, command).await
        }
    };

    if let Err(ref e) = result {
        if let Some(view) = e.downcast_ref::<ClientError>().and_then(ClientError::redirect) {
            eprintln!("Redirecting to {}: run `quickcare login` to continue.", view);
        }
    }
    result
}

async fn handle_login(api: &ClinicApi, username: &str, password: &str) -> anyhow::Result<()> {
    match api.login(username, password).await {
        Ok(identity) => {
            let landing = View::landing_for(&identity.role);
            print_identity(&identity);
            println!("Now at {}", landing);
            Ok(())
        }
        Err(ClientError::Unauthorized { detail }) | Err(ClientError::Api { detail, .. }) => {
            anyhow::bail!("Login failed: {}", detail)
        }
        Err(e) => Err(e).context("Login failed"),
    }
}

/// Run the route guard for `view`; a denial is turned into an error.
fn navigate(api: &ClinicApi, view: View) -> anyhow::Result<Identity> {
    let guard = RouteGuard::for_view(view)
        .with_context(|| format!("{} is not a protected view", view))?;

    match guard.check(api.session()) {
        Access::Granted(identity) => Ok(identity),
        Access::Denied { redirect, reason } => {
            let why = match reason {
                DenialReason::NoCredential => "not logged in".to_string(),
                DenialReason::MalformedCredential => "stored credential is corrupt".to_string(),
                DenialReason::RoleNotPermitted(role) => format!("role '{}' may not open {}", role, view),
            };
            anyhow::bail!("Access to {} denied ({}). Redirecting to {}", view, why, redirect)
        }
    }
}

async fn open_view(api: &ClinicApi, view: View) -> anyhow::Result<()> {
    match view {
        View::Signup => println!("Sign up as superuser: quickcare signup --username <name> --password <pw>"),
        View::Login => println!("Log in: quickcare login --username <name> --password <pw>"),
        View::AdminDashboard => {
            let identity = navigate(api, view)?;
            let dash = AdminDashboard::load(api, &identity).await?;
            print_users(&dash);
            print_discharged(&dash);
        }
        View::DoctorDashboard => {
            navigate(api, view)?;
            let dash = DoctorDashboard::load(api).await?;
            println!("Doctors:");
            for d in &dash.doctors {
                println!("  {:<6} {} - {}", d.id, d.name, d.specialty.as_deref().unwrap_or("-"));
            }
            println!("Patients under care:");
            for p in dash.active_patients() {
                println!(
                    "  {:<6} {:<24} disease: {:<16} treatment: {}",
                    p.id,
                    p.name,
                    dash.disease_name(p.disease).unwrap_or("-"),
                    dash.treatment_name(p.treatment).unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}

async fn handle_admin_command(
    api: &ClinicApi,
    identity: &Identity,
    cmd: cli::AdminCommands,
) -> anyhow::Result<()> {
    match cmd {
        cli::AdminCommands::Users => {
            let dash = AdminDashboard::load(api, identity).await?;
            print_users(&dash);
        }
        cli::AdminCommands::Deactivate { user_id } => {
            let dash = AdminDashboard::load(api, identity).await?;
            dash.deactivate(api, user_id)
                .await
                .context("Failed to deactivate user")?;
            println!("User deactivated successfully.");
        }
        cli::AdminCommands::CreateDoctor {
            username,
            name,
            password,
        } => match AdminDashboard::create_doctor(api, &name, &username, &password).await {
            Ok(doctor) => println!("Doctor created successfully (id {}).", doctor.id),
            Err(ClientError::Validation { messages, .. }) => anyhow::bail!("{}", messages),
            Err(e) => return Err(e).context("Failed to create doctor"),
        },
        cli::AdminCommands::Discharged => {
            let dash = AdminDashboard::load(api, identity).await?;
            print_discharged(&dash);
        }
        cli::AdminCommands::DeleteDischarged { discharge_id } => {
            api.delete_discharged(discharge_id)
                .await
                .context("Failed to delete patient")?;
            println!("Patient deleted successfully.");
        }
    }
    Ok(())
}

async fn handle_doctor_command(api: &ClinicApi, cmd: cli::DoctorCommands) -> anyhow::Result<()> {
    match cmd {
        cli::DoctorCommands::Patients => {
            let patients = api.list_patients().await?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                println!("{:<6} {:<24} {:<8} {:<10}", "ID", "NAME", "AGE", "STATUS");
                for p in patients {
                    println!(
                        "{:<6} {:<24} {:<8} {:<10}",
                        p.id,
                        p.name,
                        p.age.map(|a| a.to_string()).unwrap_or_else(|| "-".into()),
                        if p.discharged { "discharged" } else { "admitted" }
                    );
                }
            }
        }
        cli::DoctorCommands::Patient { id } => {
            let patient = api.get_patient(id).await?;
            println!("{}", serde_json::to_string_pretty(&patient)?);
        }
        cli::DoctorCommands::Admit { name, age, gender } => {
            let patient = api.admit_patient(&NewPatient { name, age, gender }).await?;
            println!("Patient admitted:\n  Name: {}\n  ID:   {}", patient.name, patient.id);
        }
        cli::DoctorCommands::AssignDisease {
            patient_id,
            disease_id,
        } => {
            api.assign_disease(patient_id, disease_id).await?;
            println!("Disease {} assigned to patient {}.", disease_id, patient_id);
        }
        cli::DoctorCommands::AssignTreatment {
            patient_id,
            treatment_id,
        } => {
            api.assign_treatment(patient_id, treatment_id).await?;
            println!("Treatment {} assigned to patient {}.", treatment_id, patient_id);
        }
        cli::DoctorCommands::Discharge { patient_id } => {
            api.discharge_patient(patient_id).await?;
            println!("Patient {} discharged.", patient_id);
        }
        cli::DoctorCommands::Diseases => {
            for d in api.list_diseases().await? {
                println!("{:<6} {}", d.id, d.name);
            }
        }
        cli::DoctorCommands::Treatments => {
            for t in api.list_treatments().await? {
                println!("{:<6} {}", t.id, t.name);
            }
        }
        cli::DoctorCommands::Doctors => {
            for d in api.list_doctors().await? {
                println!("{:<6} {} - {}", d.id, d.name, d.specialty.as_deref().unwrap_or("-"));
            }
        }
        cli::DoctorCommands::UpdateDoctor { id, name, specialty } => {
            let doctor = api
                .update_doctor(id, &DoctorUpdate { name, specialty })
                .await
                .context("Failed to update doctor")?;
            println!("Doctor {} updated: {}", doctor.id, doctor.name);
        }
        cli::DoctorCommands::DeleteDoctor { id } => {
            api.delete_doctor(id).await.context("Failed to delete doctor")?;
            println!("Doctor deleted successfully.");
        }
    }
    Ok(())
}

fn print_identity(identity: &Identity) {
    println!(
        "Role:    {}\nSubject: {}",
        identity.role,
        identity.subject.as_deref().unwrap_or("-")
    );
}

fn print_users(dash: &AdminDashboard) {
    if dash.users.is_empty() {
        println!("No users found.");
        return;
    }
    println!("{:<6} {:<24} {:<10}", "ID", "USERNAME", "ROLE");
    for u in &dash.users {
        println!(
            "{:<6} {:<24} {:<10}",
            u.id,
            u.username,
            u.role.as_deref().unwrap_or("-")
        );
    }
}

fn print_discharged(dash: &AdminDashboard) {
    if dash.discharged.is_empty() {
        println!("No discharged patients available.");
        return;
    }
    println!("{:<6} {:<24} {:<12} {:<20}", "ID", "PATIENT", "DISCHARGED", "DOCTOR");
    for d in &dash.discharged {
        println!(
            "{:<6} {:<24} {:<12} {:<20}",
            d.discharge_id,
            d.patient_name,
            d.discharge_date.to_string(),
            d.doctor_name.as_deref().unwrap_or("-")
        );
    }
}
