use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use premium_core::{
    predict_output, CoreConfig, EnrichedRecord, LogisticModel, PatientService, RawUserInput,
    SortField, SortOrder, DEFAULT_MODEL_PATH, DEFAULT_PATIENTS_FILE,
};
use serde_json::json;

#[derive(Parser)]
#[command(name = "premium")]
#[command(about = "Insurance premium and patient record CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a quote request and print the derived features
    Features(QuoteArgs),
    /// Validate a quote request and classify it with a model file
    Predict {
        #[command(flatten)]
        quote: QuoteArgs,
        /// Exported model parameters
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
    },
    /// Work with a patient store file
    Patients {
        /// Patient store file
        #[arg(long, default_value = DEFAULT_PATIENTS_FILE)]
        file: PathBuf,
        #[command(subcommand)]
        command: PatientCommands,
    },
}

#[derive(Args)]
struct QuoteArgs {
    /// Age in years
    #[arg(long)]
    age: i64,
    /// Weight in kg
    #[arg(long)]
    weight: f64,
    /// Height in metres
    #[arg(long)]
    height: f64,
    /// Income in lakhs per annum
    #[arg(long)]
    income_lpa: f64,
    /// The user smokes
    #[arg(long)]
    smoker: bool,
    #[arg(long)]
    city: String,
    /// e.g. private_job, student, retired
    #[arg(long)]
    occupation: String,
}

impl From<QuoteArgs> for RawUserInput {
    fn from(a: QuoteArgs) -> Self {
        RawUserInput {
            age: a.age,
            weight: a.weight,
            height: a.height,
            income_lpa: a.income_lpa,
            smoker: a.smoker,
            city: a.city,
            occupation: a.occupation,
        }
    }
}

#[derive(Subcommand)]
enum PatientCommands {
    /// List all patients
    List,
    /// Show one patient
    View { id: String },
    /// List patients ordered by height, weight or bmi
    Sort {
        sort_by: String,
        #[arg(long, default_value = "asc")]
        order: String,
    },
    /// Delete a patient
    Delete { id: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Features(quote)) => {
            let record = EnrichedRecord::from_raw(quote.into())?;
            let out = json!({
                "record": record,
                "model_features": record.model_features(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Some(Commands::Predict { quote, model }) => {
            let record = EnrichedRecord::from_raw(quote.into())?;
            let model = LogisticModel::load(&model)?;
            let prediction = predict_output(&model, &record.model_features())?;
            println!("{}", serde_json::to_string_pretty(&prediction)?);
        }
        Some(Commands::Patients { file, command }) => {
            let cfg = CoreConfig::new(file, PathBuf::from(DEFAULT_MODEL_PATH))?;
            let service = PatientService::new(Arc::new(cfg));
            run_patients(&service, command)?;
        }
        None => {
            println!("Use 'premium --help' for commands");
        }
    }

    Ok(())
}

fn run_patients(service: &PatientService, command: PatientCommands) -> anyhow::Result<()> {
    match command {
        PatientCommands::List => {
            let patients = service.list()?;
            if patients.is_empty() {
                println!("No patients found.");
            }
            for p in patients {
                println!(
                    "ID: {}, Name: {}, BMI: {}, Verdict: {}",
                    p.id,
                    p.details.name(),
                    p.details.bmi(),
                    p.details.verdict().as_str()
                );
            }
        }
        PatientCommands::View { id } => {
            let record = service.view(&id)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        PatientCommands::Sort { sort_by, order } => {
            let field: SortField = sort_by.parse()?;
            let order: SortOrder = order.parse()?;
            let records = service.sorted(field, order)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        PatientCommands::Delete { id } => {
            service.delete(&id)?;
            println!("Deleted patient {}", id);
        }
    }
    Ok(())
}
