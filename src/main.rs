use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use credit_score::api::{ApiClient, ApiError, PredictRequest, PREDICTION_FAILED};
use credit_score::auth::{self, AuthError, SignupForm};
use credit_score::config::{self, Config};
use credit_score::estimator::{self, engine::BASE_SCORE};
use credit_score::output;
use credit_score::profile::{FormError, FormField, ProfileForm};
use credit_score::prompt::{prompt, prompt_password, prompt_with_default};
use credit_score::store::{FileStore, ProfileRepository};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

/// Field overrides shared by `input`, `estimate` and `predict`.
#[derive(Args, Debug, Default, Clone)]
struct ProfileArgs {
    /// Age in years (18-80)
    #[arg(long)]
    age: Option<String>,
    /// Monthly income
    #[arg(long)]
    monthly_income: Option<String>,
    /// Total outstanding loan amount
    #[arg(long)]
    total_loan_amount: Option<String>,
    /// Loan tenure in months (1-360)
    #[arg(long)]
    loan_tenure: Option<String>,
    /// Credit utilization in percent (0-100)
    #[arg(long)]
    credit_utilization: Option<String>,
    /// Missed payments in the last year (0-4)
    #[arg(long)]
    missed_payments: Option<String>,
    /// Number of active loans
    #[arg(long)]
    active_loans: Option<String>,
    /// Length of credit history in years (0-50)
    #[arg(long)]
    credit_history_length: Option<String>,
}

impl ProfileArgs {
    fn value(&self, field: FormField) -> Option<&String> {
        match field {
            FormField::Age => self.age.as_ref(),
            FormField::MonthlyIncome => self.monthly_income.as_ref(),
            FormField::TotalLoanAmount => self.total_loan_amount.as_ref(),
            FormField::LoanTenure => self.loan_tenure.as_ref(),
            FormField::CreditUtilization => self.credit_utilization.as_ref(),
            FormField::MissedPayments => self.missed_payments.as_ref(),
            FormField::ActiveLoans => self.active_loans.as_ref(),
            FormField::CreditHistoryLength => self.credit_history_length.as_ref(),
        }
    }

    /// Overlay the given flags onto `form`.
    fn apply(&self, form: &mut ProfileForm) {
        for field in FormField::ALL {
            if let Some(value) = self.value(field) {
                form.set(field, value.as_str());
            }
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill in the loan form and save it as the active analysis
    Input {
        #[command(flatten)]
        fields: ProfileArgs,
        /// Start from an empty form instead of the pre-filled one
        #[arg(long)]
        cleared: bool,
        /// Ask for each field on the terminal
        #[arg(short, long)]
        interactive: bool,
    },
    /// Show the score analysis for the saved profile (default)
    Result {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear the saved profile to start a new analysis
    Reset,
    /// Score a profile directly without saving it
    Estimate {
        #[command(flatten)]
        fields: ProfileArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sign in (any email and password are accepted)
    Login {
        #[arg(long)]
        email: String,
        /// Prompted without echo when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Signup {
        /// Full name
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Prompted without echo when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Ask the prediction API for a score band and loan decision
    Predict {
        #[command(flatten)]
        fields: ProfileArgs,
        /// Use the saved profile instead of the form
        #[arg(long, conflicts_with = "cleared")]
        from_saved: bool,
        /// Start from an empty form instead of the pre-filled one
        #[arg(long)]
        cleared: bool,
        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the API's sample applicants
    Samples {
        #[arg(long)]
        json: bool,
    },
    /// Check whether the prediction API and its model are up
    Health {
        #[arg(long)]
        json: bool,
    },
    /// Show model performance and feature importance
    Dashboard {
        #[arg(long)]
        json: bool,
    },
    /// Create a config file
    Init {
        /// Overwrite an existing config without asking
        #[arg(long)]
        force: bool,
        /// Write the defaults without prompting
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "credit-score")]
#[command(about = "Estimate a CIBIL-style credit score from your financial profile", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/credit-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

struct App {
    config: Config,
    verbose: bool,
    use_colors: bool,
}

impl App {
    fn store(&self) -> Result<FileStore> {
        Ok(FileStore::new(config::state_path(&self.config)?))
    }

    fn api(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config.api)
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "credit_score=debug"
    } else {
        "credit_score=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Map a failed command to its exit code.
fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<AuthError>().is_some() {
        EXIT_AUTH
    } else if err.downcast_ref::<ApiError>().is_some() {
        EXIT_NETWORK
    } else {
        EXIT_CONFIG
    }
}

fn form_errors(errors: Vec<FormError>) -> anyhow::Error {
    let lines: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    anyhow!(lines.join("\n"))
}

/// Surface the backend's explanation, keeping the `ApiError` for the exit code.
fn api_failure(err: ApiError, fallback: &str) -> anyhow::Error {
    let message = err.user_message(fallback);
    anyhow::Error::new(err).context(message)
}

fn fill_interactively(form: &mut ProfileForm) -> Result<()> {
    for field in FormField::ALL {
        let current = form.get(field).to_string();
        let answer = if current.is_empty() {
            prompt(&format!("{}: ", field.label()))?
        } else {
            prompt_with_default(field.label(), &current)?
        };
        form.set(field, answer);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", output::to_json(value)?);
    Ok(())
}

fn show_result(app: &App, form: &ProfileForm, json: bool) -> Result<()> {
    let profile = form.validate().map_err(form_errors)?;
    let result = estimator::estimate(&profile);
    tracing::debug!("estimated score {} for {:?}", result.score, profile);

    if json {
        return print_json(&result);
    }
    println!("{}", output::format_result(&result, app.use_colors));
    if app.verbose {
        println!();
        println!(
            "{}",
            output::format_breakdown(&result.breakdown, BASE_SCORE, app.use_colors)
        );
    }
    Ok(())
}

async fn run(command: Commands, app: &App) -> Result<()> {
    match command {
        Commands::Input {
            fields,
            cleared,
            interactive,
        } => {
            let mut form = if cleared {
                ProfileForm::cleared()
            } else {
                ProfileForm::default()
            };
            fields.apply(&mut form);
            if interactive {
                fill_interactively(&mut form)?;
            }

            form.validate().map_err(form_errors)?;
            let store = app.store()?;
            store.save(&form)?;
            println!("Profile saved. Run `credit-score result` to see your analysis.");
        }
        Commands::Result { json } => {
            let store = app.store()?;
            let form = store.load()?.ok_or_else(|| {
                anyhow!("No saved profile. Run `credit-score input` to enter your details.")
            })?;
            show_result(app, &form, json)?;
        }
        Commands::Reset => {
            app.store()?.clear()?;
            println!("Cleared saved profile. Run `credit-score input` to start a new analysis.");
        }
        Commands::Estimate { fields, json } => {
            let mut form = ProfileForm::default();
            fields.apply(&mut form);
            show_result(app, &form, json)?;
        }
        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password: ")?,
            };
            let store = app.store()?;
            let session =
                auth::login(&store, &email, &password, app.config.auth_delay()?).await?;
            println!("Signed in as {}", session.email);
        }
        Commands::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password: ")?,
            };
            let confirm_password = match confirm_password {
                Some(p) => p,
                None => prompt_password("Confirm password: ")?,
            };
            let form = SignupForm {
                full_name: name,
                email,
                password,
                confirm_password,
            };
            let store = app.store()?;
            auth::signup(&store, &form, app.config.auth_delay()?).await?;
            println!("{}", output::format_welcome(&form));
        }
        Commands::Logout => {
            auth::logout(&app.store()?)?;
            println!("Signed out.");
        }
        Commands::Whoami => {
            let session = auth::current_session(&app.store()?)?;
            println!("{}", output::format_session(session.as_ref()));
        }
        Commands::Predict {
            fields,
            from_saved,
            cleared,
            json,
        } => {
            let mut form = if from_saved {
                app.store()?.load()?.ok_or_else(|| {
                    anyhow!("No saved profile. Run `credit-score input` first.")
                })?
            } else if cleared {
                ProfileForm::cleared()
            } else {
                ProfileForm::default()
            };
            fields.apply(&mut form);
            let profile = form.validate().map_err(form_errors)?;

            let client = app.api()?;
            let response = client
                .predict(&PredictRequest::from(&profile))
                .await
                .map_err(|e| api_failure(e, PREDICTION_FAILED))?;

            if json {
                print_json(&response.prediction)?;
            } else {
                println!("{}", output::format_prediction(&response.prediction, app.use_colors));
            }
        }
        Commands::Samples { json } => {
            let response = app
                .api()?
                .sample_data()
                .await
                .map_err(|e| api_failure(e, "Failed to load sample data"))?;
            if json {
                print_json(&response.samples)?;
            } else {
                println!("{}", output::format_samples(&response.samples, app.use_colors));
            }
        }
        Commands::Health { json } => {
            let client = app.api()?;
            let health = client.health().await.map_err(|e| {
                let fallback = format!("Could not reach the API at {}", client.base_url());
                api_failure(e, &fallback)
            })?;
            if json {
                print_json(&health)?;
            } else {
                println!(
                    "{}",
                    output::format_health(&health, client.base_url(), app.use_colors)
                );
            }
        }
        Commands::Dashboard { json } => {
            let dashboard = app
                .api()?
                .dashboard()
                .await
                .map_err(|e| api_failure(e, "Failed to fetch dashboard data"))?;
            if json {
                print_json(&dashboard)?;
            } else {
                println!("{}", output::format_dashboard(&dashboard, app.use_colors));
            }
        }
        // Handled in main before the config is loaded
        Commands::Init { .. } => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Result { json: false });
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    // Init writes the config, so it must not require one
    if let Commands::Init { force, yes } = command {
        if let Err(e) = config::run_init_wizard(config_path, yes, force) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match config::load_config(config_path).context("Config error") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let app = App {
        config,
        verbose: cli.verbose,
        use_colors: output::should_use_colors(),
    };

    if let Err(e) = run(command, &app).await {
        tracing::debug!("command failed: {:#}", e);
        eprintln!("{}", e);
        std::process::exit(exit_code(&e));
    }

    tracing::debug!("done in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}
