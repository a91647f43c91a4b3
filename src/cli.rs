use clap::{Parser, Subcommand};

/// QuickCare: operator console for the clinic management API
#[derive(Parser)]
#[command(name = "quickcare", version, about)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "QUICKCARE_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register the superuser account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long, env = "QUICKCARE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in and store the credential pair
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "QUICKCARE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored credentials
    Logout,

    /// Show the role and subject of the stored credential
    Whoami,

    /// Navigate to a view (signup, login, admin, doctor, or its path)
    Open { view: String },

    /// Admin dashboard actions
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Doctor dashboard actions
    Doctor {
        #[command(subcommand)]
        command: DoctorCommands,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// List managed users
    Users,
    /// Deactivate a user account
    Deactivate { user_id: i64 },
    /// Create a doctor with a login account
    CreateDoctor {
        #[arg(long)]
        username: String,
        #[arg(long)]
        name: String,
        #[arg(long, env = "QUICKCARE_DOCTOR_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List discharged patients
    Discharged,
    /// Delete a discharged patient's record
    DeleteDischarged { discharge_id: i64 },
}

#[derive(Subcommand)]
pub enum DoctorCommands {
    /// List patients
    Patients,
    /// Show one patient
    Patient { id: i64 },
    /// Admit a new patient
    Admit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        gender: Option<String>,
    },
    /// Assign a disease to a patient
    AssignDisease { patient_id: i64, disease_id: i64 },
    /// Assign a treatment to a patient
    AssignTreatment { patient_id: i64, treatment_id: i64 },
    /// Discharge a patient
    Discharge { patient_id: i64 },
    /// List diseases
    Diseases,
    /// List treatments
    Treatments,
    /// List doctors
    Doctors,
    /// Rename a doctor or change their specialty
    UpdateDoctor {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        specialty: Option<String>,
    },
    /// Remove a doctor
    DeleteDoctor { id: i64 },
}
