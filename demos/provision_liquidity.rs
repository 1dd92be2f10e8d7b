use v4_lp_sdk_rs::{
    LiquidityProvisioner,
    orchestrator::{ApprovalStatus, TokenSide, WalletContext},
    providers::EthRpcProvider,
    types::ProvisionConfig
};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ProvisionConfig::from_env()?;
    let provider = EthRpcProvider::connect(&config).await?;
    let context = WalletContext::new(provider.from(), config.chain().chain_id());

    let provisioner = LiquidityProvisioner::initialize(provider, context)
        .await?
        .with_config(&config)?;

    if let Ok(amount) = std::env::var("LIQUIDITY_DELTA") {
        provisioner.set_liquidity_delta_str(&amount)?;
    }
    if let Ok(hook_data) = std::env::var("HOOK_DATA") {
        provisioner.set_hook_data(&hook_data)?;
    }

    for side in TokenSide::BOTH {
        if provisioner.approval_status(side) == ApprovalStatus::NeedsApproval {
            let tx_hash = provisioner.approve(side).await?;
            println!("Approved {side}: {tx_hash:?}");
        }
    }

    let tx_hash = provisioner.add_liquidity().await?;
    println!("Add Liquidity Tx Hash: {tx_hash:?}");

    for notification in provisioner.take_notifications() {
        println!("[{:?}] {}: {}", notification.level, notification.title, notification.message);
    }

    Ok(())
}
