//! MarketDesk - 市场管理后台命令行
//!
//! 组合根：加载配置、初始化日志、构建唯一的 ApiClient 并注入各个服务。

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use marketdesk::config::{load_config_from_path, print_config, AppConfig};
use marketdesk::domain::marketplace::OrderStatus;
use marketdesk::infrastructure::http::{ApiClient, ApiClientConfig, RequestBody};
use marketdesk::infrastructure::navigation::InMemoryNavigator;
use marketdesk::infrastructure::storage::{SledCredentialStore, SledStoreConfig};
use marketdesk::services::{
    AdminService, AuthService, NotificationService, ReviewQueue, SellerService,
};

/// 市场管理后台命令行
#[derive(Parser)]
#[command(name = "marketdesk")]
#[command(about = "Marketplace admin console", long_about = None)]
struct Cli {
    /// 配置文件路径（默认搜索 config.toml / config.local.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session locally
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the cached profile of the logged-in user
    Whoami,
    /// Print the effective configuration
    Config,
    /// Dashboard statistics
    Stats,
    /// List users
    Users,
    /// List products
    Products,
    /// List orders
    Orders,
    /// Change an order status
    SetOrderStatus { id: i64, status: String },
    /// List categories
    Categories,
    /// List balance top-up requests
    BalanceRequests,
    /// List withdrawal requests
    Withdrawals,
    /// List payment methods
    PaymentMethods,
    /// Current seller balance
    Balance,
    /// List notifications
    Notifications {
        /// Only print the unread count
        #[arg(long)]
        unread_count: bool,
    },
    /// Approve an item in a review queue (products, balance, withdrawals)
    Approve { queue: String, id: i64 },
    /// Reject an item in a review queue (products, balance, withdrawals)
    Reject {
        queue: String,
        id: i64,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Send an arbitrary request through the API client
    Raw {
        method: String,
        path: String,
        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },
}

impl Commands {
    /// 命令对应的页面路径，用于 401 跳转判断
    fn page(&self) -> &'static str {
        match self {
            Commands::Login { .. } | Commands::Logout => "/login",
            Commands::Whoami | Commands::Config | Commands::Raw { .. } => "/",
            Commands::Stats => "/admin",
            Commands::Users => "/admin/users",
            Commands::Products => "/admin/products",
            Commands::Orders | Commands::SetOrderStatus { .. } => "/admin/orders",
            Commands::Categories => "/admin/categories",
            Commands::BalanceRequests => "/admin/balance-requests",
            Commands::Withdrawals => "/admin/withdrawals",
            Commands::PaymentMethods => "/admin/payment-methods",
            Commands::Balance => "/seller/balance",
            Commands::Notifications { .. } => "/notifications",
            Commands::Approve { .. } | Commands::Reject { .. } => "/admin/reviews",
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},marketdesk={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    // stdout 只输出命令结果
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_queue(value: &str) -> anyhow::Result<ReviewQueue> {
    ReviewQueue::parse(value).ok_or_else(|| {
        anyhow::anyhow!("Unknown review queue '{}' (expected products, balance or withdrawals)", value)
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    init_tracing(&config);

    if let Some(parent) = std::path::Path::new(&config.storage.path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let credentials = Arc::new(SledCredentialStore::new(&SledStoreConfig {
        db_path: config.storage.path.clone(),
    })?);
    let navigator = Arc::new(InMemoryNavigator::new(cli.command.page()));

    let mut client_config = ApiClientConfig::new(config.api.base_url())
        .with_login_path(config.navigation.login_path.clone());
    if let Some(secs) = config.api.timeout_secs {
        client_config = client_config.with_timeout(secs);
    }
    let client = ApiClient::new(client_config, credentials, navigator.clone())?.arc();

    let auth = AuthService::new(client.clone());
    let admin = AdminService::new(client.clone());
    let seller = SellerService::new(client.clone());
    let notifications = NotificationService::new(client.clone());

    let result = run(cli.command, &config, &client, &auth, &admin, &seller, &notifications).await;

    if let Some(path) = navigator.last_redirect() {
        tracing::warn!(path = %path, "Session ended, run `marketdesk login` to continue");
    }

    result
}

async fn run(
    command: Commands,
    config: &AppConfig,
    client: &ApiClient,
    auth: &AuthService,
    admin: &AdminService,
    seller: &SellerService,
    notifications: &NotificationService,
) -> anyhow::Result<()> {
    match command {
        Commands::Login { email, password } => {
            let profile = auth.login(&email, &password).await?;
            print_json(&profile)?;
        }
        Commands::Logout => auth.logout().await?,
        Commands::Whoami => match auth.current_user()? {
            Some(profile) => print_json(&profile)?,
            None => anyhow::bail!("Not logged in"),
        },
        Commands::Config => print_config(config),
        Commands::Stats => print_json(&admin.dashboard_stats().await?)?,
        Commands::Users => print_json(&admin.list_users().await?)?,
        Commands::Products => print_json(&admin.list_products().await?)?,
        Commands::Orders => print_json(&admin.list_orders().await?)?,
        Commands::SetOrderStatus { id, status } => {
            let status = OrderStatus::parse(&status)
                .ok_or_else(|| anyhow::anyhow!("Unknown order status '{}'", status))?;
            admin.update_order_status(id, status).await?;
        }
        Commands::Categories => print_json(&admin.list_categories().await?)?,
        Commands::BalanceRequests => print_json(&admin.list_balance_requests().await?)?,
        Commands::Withdrawals => print_json(&admin.list_withdrawal_requests().await?)?,
        Commands::PaymentMethods => print_json(&admin.list_payment_methods().await?)?,
        Commands::Balance => print_json(&seller.balance().await?)?,
        Commands::Notifications { unread_count } => {
            if unread_count {
                print_json(&notifications.unread_count().await?)?;
            } else {
                print_json(&notifications.list().await?)?;
            }
        }
        Commands::Approve { queue, id } => admin.approve(parse_queue(&queue)?, id).await?,
        Commands::Reject { queue, id, reason } => {
            admin.reject(parse_queue(&queue)?, id, reason).await?
        }
        Commands::Raw { method, path, body } => {
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
            let body = match body {
                Some(text) => RequestBody::Json(serde_json::from_str(&text)?),
                None => RequestBody::Empty,
            };
            let value: Value = client
                .send(method, &path, body, HeaderMap::new())
                .await?
                .into_typed()?;
            print_json(&value)?;
        }
    }
    Ok(())
}
