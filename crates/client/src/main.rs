//! `stockroom` command-line entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use stockroom_client::{ApiClient, ClientConfig, Credentials, StockService};
use stockroom_core::ProductId;

#[derive(Debug, Parser)]
#[command(name = "stockroom", about = "Inventory API client")]
struct Cli {
    /// Base URL of the inventory API [env: STOCKROOM_API_URL].
    #[arg(long)]
    api_url: Option<String>,

    /// Bearer token from a previous login [env: STOCKROOM_AUTH_TOKEN].
    #[arg(long)]
    token: Option<String>,

    /// Request timeout in seconds [env: STOCKROOM_HTTP_TIMEOUT_SECS].
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and print the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOCKROOM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List products with their stock quantity.
    Products,
    /// List categories.
    Categories,
    /// List stock records.
    Stock,
    /// Add stock to a product.
    StockIn {
        product_id: ProductId,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Delete a product that has no stock left.
    DeleteProduct { product_id: ProductId },
    /// Print dashboard counts.
    Dashboard,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    stockroom_observability::init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().with_overrides(cli.api_url, cli.token, cli.timeout_secs);

    let client = ApiClient::new(config).context("failed to initialize API client")?;
    tracing::info!(api_url = %client.base_url(), "client ready");
    let service = StockService::new(client.clone());

    match cli.command {
        Command::Login { email, password } => {
            let session = client.login(&Credentials::new(email, password)).await?;
            print_json(&session)?;
        }
        Command::Products => print_json(&service.products_with_stock().await?)?,
        Command::Categories => print_json(&client.list_categories().await?)?,
        Command::Stock => print_json(&service.stock_lines().await?)?,
        Command::StockIn {
            product_id,
            quantity,
        } => {
            let intent = service
                .stock_in_raw(product_id, &quantity)
                .await
                .with_context(|| format!("stock-in for product {product_id} failed"))?;
            print_json(&intent)?;
        }
        Command::DeleteProduct { product_id } => {
            service
                .delete_product(product_id)
                .await
                .with_context(|| format!("deleting product {product_id} failed"))?;
            println!("deleted product {product_id}");
        }
        Command::Dashboard => print_json(&service.dashboard().await?)?,
    }

    Ok(())
}
