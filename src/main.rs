use anyhow::Result;
use clap::Parser;
use cyberblog_rs::cli::Args;
use cyberblog_rs::logging::init_tracing;
use cyberblog_rs::{RunOutcome, launch};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, args.log_format);
    let config = args.into_config()?;

    match launch(&config).await? {
        RunOutcome::Skipped { existing } => {
            info!(existing = %existing.display(), "今天已经发布过文章，本次未做修改");
        }
        RunOutcome::Published {
            path,
            title,
            publish,
        } => {
            debug!(?publish, "publish status");
            info!(path = %path.display(), title, "新文章已写入");
        }
    }

    Ok(())
}
