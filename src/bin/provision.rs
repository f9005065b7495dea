//! Out-of-band operator provisioning.
//!
//! ```text
//! provision admin --username root --password '...'
//! provision invigilator --username inv01 --password '...' --hall 3 --hall 4
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exam_attendance::entities::sea_orm_active_enums::OperatorRole;
use exam_attendance::services::operators::{NewOperator, OperatorService};
use exam_attendance::static_service::connect;

#[derive(Debug, Parser)]
#[clap(about = "Create exam attendance operators")]
struct Cli {
    #[clap(long, env)]
    database_url: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an admin operator
    Admin {
        #[clap(long)]
        username: String,
        #[clap(long, env = "PROVISION_PASSWORD")]
        password: String,
    },
    /// Create an invigilator assigned to the given halls
    Invigilator {
        #[clap(long)]
        username: String,
        #[clap(long, env = "PROVISION_PASSWORD")]
        password: String,
        #[clap(long = "hall")]
        halls: Vec<i32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "exam_attendance=info,provision=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let db = connect(&cli.database_url).await?;

    let new_operator = match cli.command {
        Command::Admin { username, password } => NewOperator {
            username,
            password,
            role: OperatorRole::Admin,
            hall_ids: Vec::new(),
        },
        Command::Invigilator {
            username,
            password,
            halls,
        } => NewOperator {
            username,
            password,
            role: OperatorRole::Invigilator,
            hall_ids: halls,
        },
    };

    let created = OperatorService::new(&db)
        .create_operator(new_operator)
        .await
        .context("Failed to provision operator")?;

    tracing::info!(
        operator_id = created.operator_id,
        username = %created.username,
        role = created.role.as_str(),
        halls = ?created.hall_ids,
        "operator provisioned"
    );

    Ok(())
}
