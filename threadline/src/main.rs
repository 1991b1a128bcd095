//! threadline: command-line dashboard for the textile supply chain

use clap::Parser;
use threadline::{apply_overrides, execute, Args, Config};
use threadline_sdk::{SdkError, ThreadlineClient};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!("threadline={0},threadline_sdk={0},warn", args.log_level).into()
                }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load config, then apply CLI overrides
    let mut config = Config::load(&args.config)?;
    apply_overrides(&mut config, &args);

    debug!(
        rpc_url = %config.chain.rpc_url,
        contract = %config.chain.contract_address,
        "Contract gateway"
    );
    debug!(pinning_url = %config.content.pinning_url, "Pinning service");

    let client = ThreadlineClient::connect(config.chain_config(), config.pinning_config())?;
    if let Some(account) = config.wallet_address()? {
        client.wallet().connect(account);
    } else {
        info!("No wallet account configured, only public reads will work");
    }

    match execute(&client, args.command, args.json).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            match e.downcast_ref::<SdkError>() {
                Some(sdk) => eprintln!("{}", sdk.notification()),
                None => eprintln!("Error: {:#}", e),
            }
            std::process::exit(1);
        }
    }
}
