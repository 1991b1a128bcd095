//! Command-line arguments and command execution

use crate::render;
use anyhow::bail;
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use threadline_sdk::{
    Address, Apparel, ApparelForm, CreationForm, Fabric, FabricForm, Filter, FormState,
    PackagedStock, PackagedStockForm, RawMaterial, RawMaterialForm, RetailProduct,
    RetailProductForm, Role, ThreadlineClient, Tier, TierKind,
};

/// Threadline - textile supply-chain dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "threadline")]
#[command(about = "Command-line dashboard for the Threadline textile supply chain")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "THREADLINE_CONFIG", default_value = "threadline.toml")]
    pub config: PathBuf,

    /// Contract gateway URL (overrides config file)
    #[arg(long, env = "THREADLINE_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Contract address (overrides config file)
    #[arg(long, env = "THREADLINE_CONTRACT_ADDRESS")]
    pub contract_address: Option<String>,

    /// Pinning service JWT (overrides config file)
    #[arg(long, env = "THREADLINE_PINNING_JWT", hide_env_values = true)]
    pub pinning_jwt: Option<String>,

    /// Account to act as (overrides config file)
    #[arg(long, env = "THREADLINE_ACCOUNT")]
    pub account: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "THREADLINE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the connected account's profile
    Whoami,

    /// Register the connected account
    Register {
        #[arg(short, long)]
        name: String,
        /// Role (farmer, mill, manufacturer, distributor, retailer, customer)
        #[arg(short, long)]
        role: Role,
        #[arg(short, long, default_value = "")]
        location: String,
    },

    /// Show a role dashboard (defaults to the registered role)
    Dashboard {
        #[arg(short, long)]
        role: Option<Role>,
    },

    /// List entities of one tier
    List(ListArgs),

    /// Lower-tier entities selectable when creating a tier
    Candidates {
        /// Tier to be created (fabric, apparel, packaged-stock, retail-product)
        kind: TierKind,
    },

    /// Create an entity
    #[command(subcommand)]
    Add(AddCommand),

    /// Buy an entity at its listed price
    Buy {
        /// Tier (raw-material, fabric, packaged-stock, retail-product)
        kind: TierKind,
        id: u64,
    },

    /// Transaction history, newest first
    History {
        #[arg(long, default_value = "0")]
        from_block: u64,
        /// Only events involving the connected account
        #[arg(long)]
        mine: bool,
    },

    /// Chain of custody behind a retail product
    Trace { retail_product_id: u64 },
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ListArgs {
    /// Tier (raw-material, fabric, apparel, packaged-stock, retail-product)
    pub kind: TierKind,

    /// Only entities still on the market
    #[arg(long, conflicts_with = "sold")]
    pub available: bool,

    /// Only entities already taken by the next role
    #[arg(long)]
    pub sold: bool,

    /// Only entities created by this account
    #[arg(long)]
    pub origin: Option<Address>,

    /// Only entities taken over by this account
    #[arg(long)]
    pub holder: Option<Address>,

    /// Only entities not yet used for the tier above
    #[arg(long)]
    pub unused: bool,
}

impl ListArgs {
    fn filter<T: Tier>(&self) -> Filter<T> {
        let mut filter = Filter::all();
        if self.available {
            filter = filter.and(Filter::available());
        }
        if self.sold {
            filter = filter.and(Filter::unavailable());
        }
        if let Some(origin) = self.origin {
            filter = filter.and(Filter::originated_by(origin));
        }
        if let Some(holder) = self.holder {
            filter = filter.and(Filter::held_by(holder));
        }
        if self.unused {
            filter = filter.and(Filter::unused_for_next_tier());
        }
        filter
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum AddCommand {
    /// Farmer: list a raw material lot
    RawMaterial {
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        raw_material_type: String,
        #[arg(long)]
        quantity: String,
        /// Price in ETH
        #[arg(long)]
        price: String,
    },

    /// Mill: weave fabric from a purchased raw material
    Fabric {
        #[arg(long)]
        raw_material: Option<u64>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        composition: String,
        #[arg(long)]
        price: String,
    },

    /// Manufacturer: make apparel from purchased fabrics
    Apparel {
        #[arg(long = "fabric")]
        fabrics: Vec<u64>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        size: String,
        #[arg(long)]
        price: String,
    },

    /// Distributor: pack apparel from the market
    PackagedStock {
        #[arg(long = "apparel")]
        apparel: Vec<u64>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        price: String,
    },

    /// Retailer: list a product from purchased packaged stock
    RetailProduct {
        #[arg(long)]
        packaged_stock: Option<u64>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        price: String,
    },
}

fn emit<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text(value))
    }
}

async fn list<T: Tier>(
    client: &ThreadlineClient,
    args: &ListArgs,
    json: bool,
) -> anyhow::Result<String> {
    let result = client.list::<T>(&args.filter()).await?;
    if !result.skipped.is_empty() {
        tracing::warn!(skipped = ?result.skipped, "Some entities could not be loaded");
    }
    emit(json, &result.items, |items| render::tier_table(items))
}

async fn submit<F: CreationForm>(
    client: &ThreadlineClient,
    form: F,
    json: bool,
) -> anyhow::Result<String> {
    let mut state = FormState::new(form);
    let submission = client.submit(&mut state).await?;
    emit(json, &submission, render::submission)
}

async fn add(client: &ThreadlineClient, command: AddCommand, json: bool) -> anyhow::Result<String> {
    match command {
        AddCommand::RawMaterial {
            name,
            raw_material_type,
            quantity,
            price,
        } => {
            let form = RawMaterialForm {
                name,
                raw_material_type,
                quantity,
                price,
            };
            submit(client, form, json).await
        }
        AddCommand::Fabric {
            raw_material,
            name,
            composition,
            price,
        } => {
            let form = FabricForm {
                raw_material_id: raw_material,
                name,
                composition,
                price,
            };
            submit(client, form, json).await
        }
        AddCommand::Apparel {
            fabrics,
            name,
            category,
            size,
            price,
        } => {
            let form = ApparelForm {
                fabric_ids: fabrics,
                name,
                category,
                size,
                price,
            };
            submit(client, form, json).await
        }
        AddCommand::PackagedStock {
            apparel,
            name,
            quantity,
            price,
        } => {
            let form = PackagedStockForm {
                apparel_ids: apparel,
                name,
                quantity,
                price,
            };
            submit(client, form, json).await
        }
        AddCommand::RetailProduct {
            packaged_stock,
            name,
            brand,
            price,
        } => {
            let form = RetailProductForm {
                packaged_stock_id: packaged_stock,
                name,
                brand,
                price,
            };
            submit(client, form, json).await
        }
    }
}

/// Run one command and return what to print
pub async fn execute(
    client: &ThreadlineClient,
    command: Command,
    json: bool,
) -> anyhow::Result<String> {
    match command {
        Command::Whoami => {
            let user = client.whoami().await?;
            emit(json, &user, render::user)
        }
        Command::Register { name, role, location } => {
            let receipt = client.register(&name, &location, role).await?;
            emit(json, &receipt, |r| format!("registered as {}, {}", role, render::receipt(r)))
        }
        Command::Dashboard { role } => {
            let role = match role {
                Some(role) => role,
                None => match client.whoami().await?.role {
                    Some(role) => role,
                    None => bail!("account is not registered, run `threadline register` first"),
                },
            };
            match client.dashboard(role).await {
                Ok((user, dashboard)) => emit(json, &dashboard, |d| render::dashboard(&user, d)),
                Err(redirect) => {
                    bail!("access denied to the {} dashboard, go to {}", role, redirect)
                }
            }
        }
        Command::List(args) => match args.kind {
            TierKind::RawMaterial => list::<RawMaterial>(client, &args, json).await,
            TierKind::Fabric => list::<Fabric>(client, &args, json).await,
            TierKind::Apparel => list::<Apparel>(client, &args, json).await,
            TierKind::PackagedStock => list::<PackagedStock>(client, &args, json).await,
            TierKind::RetailProduct => list::<RetailProduct>(client, &args, json).await,
        },
        Command::Candidates { kind } => {
            let candidates = client.candidates(kind).await?;
            emit(json, &candidates, |c| render::candidates(c))
        }
        Command::Add(command) => add(client, command, json).await,
        Command::Buy { kind, id } => {
            let purchase = client.buy(kind, id).await?;
            emit(json, &purchase, render::purchase)
        }
        Command::History { from_block, mine } => {
            let events = client.history(from_block, mine).await?;
            emit(json, &events, |e| render::history(e))
        }
        Command::Trace { retail_product_id } => {
            let trace = client.provenance(retail_product_id).await?;
            emit(json, &trace, render::provenance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::sync::Arc;
    use threadline_sdk::{MockContentStore, MockContract, WalletContext};

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_add_apparel() {
        let args = Args::try_parse_from([
            "threadline",
            "add",
            "apparel",
            "--fabric",
            "1",
            "--fabric",
            "4",
            "--name",
            "Jacket",
            "--category",
            "outerwear",
            "--size",
            "L",
            "--price",
            "0.8",
        ])
        .unwrap();

        match args.command {
            Command::Add(AddCommand::Apparel { fabrics, .. }) => assert_eq!(fabrics, vec![1, 4]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_kinds_and_roles() {
        let args = Args::try_parse_from(["threadline", "buy", "packaged-stock", "3"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Buy {
                kind: TierKind::PackagedStock,
                id: 3
            }
        ));

        let bad_role = Args::try_parse_from(["threadline", "register", "-n", "x", "-r", "weaver"]);
        assert!(bad_role.is_err());
    }

    #[tokio::test]
    async fn test_execute_add_and_list() {
        let farmer = Address::from_bytes([1; 20]);
        let client = ThreadlineClient::new(
            Arc::new(MockContract::new().with_user(farmer, "Asha", Role::Farmer)),
            Arc::new(MockContentStore::new()),
            WalletContext::with_account(farmer),
        );

        let command = Command::Add(AddCommand::RawMaterial {
            name: "Jute".into(),
            raw_material_type: "jute".into(),
            quantity: "70".into(),
            price: "0.05".into(),
        });
        let out = execute(&client, command, false).await.unwrap();
        assert!(out.contains("/farmer/dashboard"));

        let listing = ListArgs {
            kind: TierKind::RawMaterial,
            available: true,
            sold: false,
            origin: Some(farmer),
            holder: None,
            unused: false,
        };
        let out = execute(&client, Command::List(listing), false).await.unwrap();
        assert!(out.contains("Jute"));
        assert!(out.contains("0.0500 ETH"));
    }

    #[tokio::test]
    async fn test_dashboard_denied_for_wrong_role() {
        let account = Address::from_bytes([2; 20]);
        let client = ThreadlineClient::new(
            Arc::new(MockContract::new().with_user(account, "Weave Co", Role::Mill)),
            Arc::new(MockContentStore::new()),
            WalletContext::with_account(account),
        );

        let err = execute(&client, Command::Dashboard { role: Some(Role::Retailer) }, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/login"));

        let out = execute(&client, Command::Dashboard { role: None }, true).await.unwrap();
        assert!(out.contains("\"role\": \"mill\""));
    }
}
