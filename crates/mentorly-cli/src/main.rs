//! mentorly CLI: quizzes, subscription plans and mentoring services.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mentorly", version, about = "AI career mentoring: quizzes, plans and services")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a set of answers against a quiz
    Evaluate {
        /// Quiz TOML file, or the id of a bundled sample quiz
        #[arg(long)]
        quiz: String,

        /// Answers JSON file, e.g. {"q1": 0, "q5": "cross"}
        #[arg(long)]
        answers: PathBuf,

        /// Attempt history JSON; the attempt is recorded and attempt limits apply
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the recommended difficulty and weak topics
    Next {
        /// Attempt history JSON
        #[arg(long)]
        history: PathBuf,
    },

    /// Generate an adaptive quiz from attempt history
    Generate {
        /// Attempt history JSON
        #[arg(long)]
        history: PathBuf,

        /// Course the quiz belongs to
        #[arg(long, default_value = "general")]
        course: String,

        /// Write the quiz JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate quiz and plan catalog TOML files
    Validate {
        /// Path to quiz file or directory
        #[arg(long)]
        quiz: Option<PathBuf>,

        /// Path to plan catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List subscription plans with display prices
    Plans {
        /// Billing cycle: monthly, yearly
        #[arg(long, default_value = "monthly")]
        cycle: String,

        /// Display currency (defaults to the configured currency)
        #[arg(long)]
        currency: Option<String>,

        /// Plan catalog TOML (defaults to the built-in plans)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Check whether a plan unlocks a feature
    Access {
        /// Plan id
        #[arg(long)]
        plan: String,

        /// Feature token
        #[arg(long)]
        feature: String,

        /// Plan catalog TOML (defaults to the built-in plans)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Start a subscription checkout for a plan
    Checkout {
        /// Plan id
        #[arg(long)]
        plan: String,

        /// Customer email to prefill
        #[arg(long)]
        email: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show course lessons and progress
    Course {
        /// Course id; omit to list every course
        #[arg(long)]
        course: Option<String>,

        /// Attempt history JSON
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Mark a video, reading or project lesson as done
    Lesson {
        /// Course id
        #[arg(long)]
        course: String,

        /// Lesson id
        #[arg(long)]
        lesson: String,

        /// Attempt history JSON; the completion is recorded here
        #[arg(long)]
        history: PathBuf,
    },

    /// Mint the badge for a completed course
    Mint {
        /// Course the badge certifies
        #[arg(long)]
        course: String,

        /// Learner or wallet receiving the badge
        #[arg(long)]
        recipient: String,

        /// Attempt history JSON the course progress is read from
        #[arg(long)]
        history: PathBuf,

        /// Badge name (defaults to the course badge)
        #[arg(long)]
        badge: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and an example quiz
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mentorly=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            quiz,
            answers,
            history,
            format,
        } => commands::evaluate::execute(quiz, answers, history, format),
        Commands::Next { history } => commands::next::execute(history),
        Commands::Generate {
            history,
            course,
            output,
        } => commands::generate::execute(history, course, output),
        Commands::Validate { quiz, catalog } => commands::validate::execute(quiz, catalog),
        Commands::Plans {
            cycle,
            currency,
            catalog,
        } => commands::plans::execute(cycle, currency, catalog),
        Commands::Access {
            plan,
            feature,
            catalog,
        } => commands::access::execute(plan, feature, catalog),
        Commands::Checkout {
            plan,
            email,
            config,
        } => commands::checkout::execute(plan, email, config).await,
        Commands::Course { course, history } => commands::course::execute(course, history),
        Commands::Lesson {
            course,
            lesson,
            history,
        } => commands::lesson::execute(course, lesson, history),
        Commands::Mint {
            course,
            recipient,
            history,
            badge,
            config,
        } => commands::mint::execute(course, recipient, history, badge, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
