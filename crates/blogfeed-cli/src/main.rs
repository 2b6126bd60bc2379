use blogfeed_cli::{CliArgs, FeedCli};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let cli = FeedCli::from_args("blogfeed", &args)?;
    cli.run(args).await?;
    Ok(())
}
