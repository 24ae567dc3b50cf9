use std::process::ExitCode;

use helpers::{init_tracing, setup_script};
use scripts::{exit_status, mint_nft};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    ExitCode::from(exit_status(run().await))
}

async fn run() -> helpers::Result<()> {
    let setup = setup_script().await?;
    mint_nft(&setup.client, &setup.deployments).await?;
    Ok(())
}
