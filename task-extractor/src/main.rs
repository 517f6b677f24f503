use clap::Parser;
use task_extractor::{cli::Args, config::AppConfig, workflow};
use task_extractor_sdk::RunStatus;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    args.validate()?;

    let app = AppConfig::from_env();
    let status = workflow::run(args.into(), &app).await?;

    if status == RunStatus::CompletedWithFailures {
        std::process::exit(2);
    }
    Ok(())
}
