use chayns_login::stub::{self, Account, DEFAULT_ADDR};
use dotenv::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn accounts_from_env() -> Vec<Account> {
    match (
        std::env::var("LOGIN_STUB_USERNAME"),
        std::env::var("LOGIN_STUB_PASSWORD"),
    ) {
        (Ok(username), Ok(password)) => vec![Account::new(username, password)],
        _ => vec![Account::default()],
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "login_stub=debug,chayns_login=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("LOGIN_STUB_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let accounts = accounts_from_env();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Couldn't bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Login stub listening on {} with {} account(s)",
        addr,
        accounts.len()
    );

    if let Err(e) = stub::run(listener, accounts).await {
        tracing::error!("Login stub stopped: {}", e);
        std::process::exit(1);
    }
}
