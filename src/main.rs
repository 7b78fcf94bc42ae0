//! polls - question, choice and voting service
//!
//! `polls serve` runs the HTTP server; the remaining subcommands are the
//! administrative interface over the same store.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "polls")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply migrations and start the HTTP server
    Serve,

    /// Apply pending database migrations
    Migrate,

    /// Replace all polls with the sample data set
    CreateSamplePolls,

    /// Manage questions
    #[command(subcommand)]
    Question(QuestionCommands),

    /// Manage choices
    #[command(subcommand)]
    Choice(ChoiceCommands),
}

#[derive(Subcommand, Debug)]
pub enum QuestionCommands {
    /// List every question, newest first
    #[command(alias = "ls")]
    List,

    /// Create a question with its choices
    Add {
        /// Question text
        text: String,

        /// Choice text, repeat for several choices
        #[arg(short, long = "choice")]
        choices: Vec<String>,

        /// Publication date (RFC 3339), defaults to now
        #[arg(long)]
        pub_date: Option<DateTime<Utc>>,
    },

    /// Change the text or publication date of a question
    Edit {
        id: i64,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        pub_date: Option<DateTime<Utc>>,
    },

    /// Delete a question and all its choices
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ChoiceCommands {
    /// Add a choice to a question
    Add { question_id: i64, text: String },

    /// Change the text or vote count of a choice
    Edit {
        id: i64,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        votes: Option<i64>,
    },

    /// Set the vote count of a choice back to zero
    Reset { id: i64 },

    /// Delete a single choice
    Delete { id: i64 },
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,actix_web=info")).init();

    let cli = Cli::parse();
    let settings = polls::config::Settings::from_env()?;

    match cli.command {
        Commands::Serve => commands::serve(settings).await,
        Commands::Migrate => commands::migrate(&settings).await,
        Commands::CreateSamplePolls => commands::create_sample_polls(&settings).await,
        Commands::Question(cmd) => commands::manage_questions(&settings, cmd).await,
        Commands::Choice(cmd) => commands::manage_choices(&settings, cmd).await,
    }
}
