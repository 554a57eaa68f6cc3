//! PhishGuard CLI - training, offline prediction and artifact inspection
//!
//! Usage:
//!   phishguard train-url urls.csv --phishing-class 0
//!   phishguard train-email emails.csv --vectorizer tfidf --max-features 5000
//!   phishguard predict-url "http://secure-login.example.com/verify"
//!   phishguard predict-email - < message.txt
//!   phishguard inspect

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use phishguard_core::api::{predict_email, predict_url, EmailPredictRequest, UrlPredictRequest};
use phishguard_core::constants::{
    get_model_dir, APP_NAME, APP_VERSION, DEFAULT_MAX_FEATURES, DEFAULT_SPLIT_SEED,
    DEFAULT_TEST_RATIO, URL_COLUMN, URL_LABEL_COLUMN,
};
use phishguard_core::logic::artifacts::ArtifactStore;
use phishguard_core::logic::training::{train_email, train_url, TrainingConfig, TrainingReport};
use phishguard_core::logic::vectorizer::{VectorizerConfig, WeightScheme};
use phishguard_core::ModelContext;

#[derive(Parser)]
#[command(name = "phishguard")]
#[command(version, about = "URL and email phishing detection")]
struct Cli {
    /// Model artifact directory (defaults to $PHISHGUARD_MODEL_DIR)
    #[arg(long, global = true)]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit the URL scaler + logistic regression from a CSV dataset
    TrainUrl {
        dataset: PathBuf,

        /// Raw URL column; without it every numeric column is a feature
        #[arg(long, default_value = URL_COLUMN)]
        url_column: String,

        #[arg(long, default_value = URL_LABEL_COLUMN)]
        label_column: String,

        /// Label value that denotes phishing (0 or 1)
        #[arg(long, default_value_t = 1)]
        phishing_class: usize,

        #[arg(long, default_value_t = DEFAULT_TEST_RATIO)]
        test_ratio: f64,

        #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
        seed: u64,
    },

    /// Fit the email vectorizer + naive Bayes from a CSV dataset
    TrainEmail {
        dataset: PathBuf,

        /// Term weighting: tfidf or count
        #[arg(long, default_value = "tfidf")]
        vectorizer: WeightScheme,

        #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
        max_features: usize,

        #[arg(long, default_value_t = DEFAULT_TEST_RATIO)]
        test_ratio: f64,

        #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
        seed: u64,
    },

    /// Classify one URL
    PredictUrl { url: String },

    /// Classify one email body (`-` reads stdin)
    PredictEmail { text: String },

    /// List stored artifacts and their checksums
    Inspect,
}

fn print_report(report: &TrainingReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn load_context(store: &ArtifactStore) -> Result<ModelContext> {
    ModelContext::load(store)
        .with_context(|| format!("loading models from {}", store.root().display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let store = ArtifactStore::new(cli.model_dir.unwrap_or_else(get_model_dir));
    log::debug!("{} v{} using {}", APP_NAME, APP_VERSION, store.root().display());

    match cli.command {
        Command::TrainUrl {
            dataset,
            url_column,
            label_column,
            phishing_class,
            test_ratio,
            seed,
        } => {
            let config = TrainingConfig {
                test_ratio,
                seed,
                url_column,
                label_column,
                phishing_class,
                ..Default::default()
            };
            let report = train_url(&dataset, &config, &store)
                .with_context(|| format!("training URL model from {}", dataset.display()))?;
            print_report(&report)?;
        }
        Command::TrainEmail {
            dataset,
            vectorizer,
            max_features,
            test_ratio,
            seed,
        } => {
            let config = TrainingConfig {
                test_ratio,
                seed,
                vectorizer: VectorizerConfig {
                    weighting: vectorizer,
                    max_features,
                },
                ..Default::default()
            };
            let report = train_email(&dataset, &config, &store)
                .with_context(|| format!("training email model from {}", dataset.display()))?;
            print_report(&report)?;
        }
        Command::PredictUrl { url } => {
            let ctx = load_context(&store)?;
            let request = UrlPredictRequest {
                url: Some(url),
                features: None,
            };
            let prediction = predict_url(&ctx, &request)?;
            println!("{}", serde_json::to_string_pretty(&prediction.response())?);
        }
        Command::PredictEmail { text } => {
            let text = if text == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading email text from stdin")?;
                buf
            } else {
                text
            };
            let ctx = load_context(&store)?;
            let request = EmailPredictRequest {
                email_text: Some(text),
            };
            let prediction = predict_email(&ctx, &request)?;
            println!("{}", serde_json::to_string_pretty(&prediction.response())?);
        }
        Command::Inspect => {
            let infos = store.inspect()?;
            if infos.is_empty() {
                println!("No artifacts in {}", store.root().display());
                return Ok(());
            }
            println!("{}", serde_json::to_string_pretty(&infos)?);
            match ModelContext::load(&store) {
                Ok(ctx) => println!("{}", serde_json::to_string_pretty(&ctx.info())?),
                Err(e) => log::warn!("Artifacts present but not servable: {}", e),
            }
        }
    }

    Ok(())
}
