use clap::{Parser, Subcommand};
use patientor_core::{
    config::resolve_diagnoses, parse_new_entry, parse_new_patient, DiagnosisSet,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "patientor")]
#[command(about = "Patientor patient record CLI")]
struct Cli {
    /// Diagnoses reference file (defaults to the bundled dataset)
    #[arg(long, global = true)]
    diagnoses: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a new patient payload
    CheckPatient {
        /// JSON file holding the patient
        file: PathBuf,
    },
    /// Validate a new entry payload
    CheckEntry {
        /// JSON file holding the entry
        file: PathBuf,
    },
    /// Print the diagnosis reference dataset
    Diagnoses,
}

fn read_json(file: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| format!("failed to read {}: {}", file.display(), e))?;
    Ok(serde_json::from_str(&text)?)
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let diagnoses: DiagnosisSet = resolve_diagnoses(cli.diagnoses)?;

    match cli.command {
        Some(Commands::CheckPatient { file }) => {
            let input = read_json(&file)?;
            match parse_new_patient(&input) {
                Ok(patient) => println!("{}", serde_json::to_string_pretty(&patient)?),
                Err(e) => {
                    eprintln!("Invalid patient: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Some(Commands::CheckEntry { file }) => {
            let input = read_json(&file)?;
            match parse_new_entry(&input, &diagnoses) {
                Ok(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
                Err(e) => {
                    eprintln!("Invalid entry: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Some(Commands::Diagnoses) => {
            println!("{}", serde_json::to_string_pretty(diagnoses.all())?);
        }
        None => {
            println!("Use 'patientor --help' for commands");
        }
    }

    Ok(ExitCode::SUCCESS)
}
