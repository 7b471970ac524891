//! Sale status and purchase CLI for the PRT sale SDK
//!
//! Run with: cargo run --example sale_status [buy <amount> | mint]
//!
//! Requires ALCHEMY_API_KEY and PRT_CONTRACT_ADDRESS; buying or minting also
//! needs PRIVATE_KEY.

use prt_sale_sdk::constants::wei_to_ether;
use prt_sale_sdk::{
    CancelToken, LocalWallet, NetworkConfig, PrtClient, ReplayRevertReason, RpcChain, SaleAction,
    WalletState,
};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let action = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] => None,
        ["mint"] => Some(SaleAction::Mint),
        ["buy", amount] => Some(SaleAction::Buy {
            amount: amount.parse()?,
        }),
        _ => eyre::bail!("usage: sale_status [buy <amount> | mint]"),
    };

    let config = NetworkConfig::from_env()?;
    let private_key = std::env::var("PRIVATE_KEY").ok();
    let chain = RpcChain::connect(&config.rpc_url)?;

    let Some(private_key) = private_key else {
        eyre::ensure!(action.is_none(), "PRIVATE_KEY must be set to buy or mint");
        print_status(&chain, &config).await?;
        return Ok(());
    };

    let wallet = LocalWallet::from_private_key(&private_key, &config.rpc_url)?;
    let reasons = ReplayRevertReason::new(chain.provider().clone(), config.network);
    let account = WalletState::single(wallet.address());
    let client = PrtClient::new(wallet, chain, reasons, config);

    println!("\n========================================");
    println!("         PRT Sale ({})", client.config().network);
    println!("========================================");
    println!("Connected wallet: {}", client.wallet().address());

    let status = client.sale_status().await?;
    println!("PRT sold:        {} / {}", status.total_prt, status.max_supply_prt);
    println!("NFTs minted:     {} / {}", status.total_minted, status.max_supply_for_token);
    println!("Presale open:    {}", status.presale_open);
    println!("Mint open:       {}", status.mint_open);
    println!("Your PRT:        {}", client.per_account_prt(&account).await?);
    println!("Winner:          {}", client.is_winner(&account).await?);

    let Some(action) = action else {
        return Ok(());
    };

    println!("\nSubmitting: {} ...", action);
    let (cancel, token) = CancelToken::pair();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let outcome = client.execute(action, &account, &token).await;
    ctrl_c.abort();

    let message = client.present(&outcome);
    println!("\n{}", message.status);
    println!("\n{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}

/// Read-only view when no key is configured
async fn print_status(chain: &RpcChain, config: &NetworkConfig) -> eyre::Result<()> {
    let client = PrtClient::read_only(chain.clone(), config.clone());

    let status = client.sale_status().await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    println!("PRT price: {} ETH", wei_to_ether(client.prt_price().await?));
    Ok(())
}
