//! chancafe-cli: smoke-test tool for the ChancafeQ sales backend
//!
//! Usage:
//!   chancafe-cli login <email> <password>       Log in and print the session token
//!   chancafe-cli profile                         Show the signed-in user
//!   chancafe-cli clients [--active]              List clients
//!   chancafe-cli products [--low-stock | --search <text>]  List or search products
//!   chancafe-cli dashboard                       Fetch clients, quotes and products at once
//!   chancafe-cli logout                          End the session
//!   chancafe-cli config                          Print the resolved configuration

use anyhow::{bail, Context};
use chancafe_client::models::LoginRequest;
use chancafe_client::{ApiClient, ClientConfig, Envelope, Observable};
use std::fmt::Debug;

const TOKEN_ENV: &str = "CHANCAFE_TOKEN";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    chancafe_client::logging::init_with("chancafe_client=warn");

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "version" | "--version" | "-V" => {
            cmd_version();
            return Ok(());
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        "config" => return cmd_config(),
        _ => {}
    }

    let client = ApiClient::from_env().context("building api client")?;
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        client.session().set(token);
    }

    match args[1].as_str() {
        "login" => cmd_login(&client, &args[2..]).await,
        "profile" => report(client.auth().profile()).await,
        "clients" => cmd_clients(&client, &args[2..]).await,
        "products" => cmd_products(&client, &args[2..]).await,
        "dashboard" => cmd_dashboard(&client).await,
        "logout" => report(client.auth().logout()).await,
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"chancafe-cli: ChancafeQ sales backend command-line tool

USAGE:
    chancafe-cli <COMMAND> [OPTIONS]

COMMANDS:
    login <email> <password>    Log in and print the session token
    profile                     Show the signed-in user
    clients [--active]          List clients, or only active ones
    products [--low-stock]      List products, or only those at or below minimum stock
    products --search <text>    Search products by name or code
    dashboard                   Fetch clients, quotes and products concurrently
    logout                      End the session
    config                      Print the resolved configuration
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    CHANCAFE_ENV                development | staging | production
    CHANCAFE_BASE_URL           Base address, e.g. http://localhost:3000/api/
    CHANCAFE_TOKEN              Bearer token to start the session with
    RUST_LOG                    Log filter (e.g. chancafe_client=debug)"#
    );
}

fn cmd_version() {
    println!("chancafe-cli {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_config() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    let transport = config.transport()?;
    println!("environment:      {:?}", config.environment);
    println!("base_url:         {}", transport.base_url);
    println!("connect_timeout:  {:?}", transport.connect_timeout);
    println!("read_timeout:     {:?}", transport.read_timeout);
    println!("write_timeout:    {:?}", transport.write_timeout);
    println!("http_logging:     {}", transport.log_bodies);
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

async fn settle<T>(outcome: Observable<Envelope<T>>) -> anyhow::Result<Envelope<T>>
where
    T: Clone + Send + Sync + 'static,
{
    outcome.wait().await.context("call ended without an outcome")
}

async fn report<T>(outcome: Observable<Envelope<T>>) -> anyhow::Result<()>
where
    T: Clone + Debug + Send + Sync + 'static,
{
    let envelope = settle(outcome).await?;
    if !envelope.success {
        bail!("{} (code {})", envelope.message, envelope.code);
    }
    println!("{} (code {})", envelope.message, envelope.code);
    if let Some(data) = envelope.data {
        println!("{:#?}", data);
    }
    Ok(())
}

async fn cmd_login(client: &ApiClient, args: &[String]) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (args.first(), args.get(1)) else {
        bail!("usage: chancafe-cli login <email> <password>");
    };
    let envelope = settle(client.auth().login(&LoginRequest::new(email, password))).await?;
    if !envelope.success {
        bail!("{} (code {})", envelope.message, envelope.code);
    }
    println!("{}", envelope.message);
    if let Some(token) = client.session().get() {
        println!("export {}={}", TOKEN_ENV, token);
    }
    Ok(())
}

async fn cmd_clients(client: &ApiClient, args: &[String]) -> anyhow::Result<()> {
    let repo = client.clients();
    let outcome = if args.iter().any(|a| a == "--active") {
        repo.active()
    } else {
        repo.list()
    };
    let envelope = settle(outcome).await?;
    if !envelope.success {
        bail!("{} (code {})", envelope.message, envelope.code);
    }
    for c in envelope.data.unwrap_or_default() {
        println!(
            "{:>6}  {:<40}  {}",
            c.id.map(|id| id.to_string()).unwrap_or_default(),
            c.display_name(),
            c.document_number.unwrap_or_default()
        );
    }
    Ok(())
}

async fn cmd_products(client: &ApiClient, args: &[String]) -> anyhow::Result<()> {
    let repo = client.products();
    let outcome = if let Some(query) = flag_value(args, "--search") {
        repo.search(query)
    } else if args.iter().any(|a| a == "--low-stock") {
        repo.low_stock()
    } else {
        repo.list()
    };
    let envelope = settle(outcome).await?;
    if !envelope.success {
        bail!("{} (code {})", envelope.message, envelope.code);
    }
    for p in envelope.data.unwrap_or_default() {
        println!(
            "{:>6}  {:<40}  stock {:>5}{}",
            p.id.map(|id| id.to_string()).unwrap_or_default(),
            p.name.as_deref().unwrap_or("-"),
            p.stock.unwrap_or_default(),
            if p.is_low_stock() { "  (bajo)" } else { "" }
        );
    }
    Ok(())
}

async fn cmd_dashboard(client: &ApiClient) -> anyhow::Result<()> {
    let (clients, quotes, products) = futures::join!(
        settle(client.clients().list()),
        settle(client.quotes().list()),
        settle(client.products().low_stock()),
    );
    let line = |label: &str, count: Option<usize>, message: &str| match count {
        Some(n) => println!("{:<22} {}", label, n),
        None => println!("{:<22} error: {}", label, message),
    };
    let clients = clients?;
    let quotes = quotes?;
    let products = products?;
    line(
        "clientes",
        clients.data.as_ref().filter(|_| clients.success).map(Vec::len),
        &clients.message,
    );
    line(
        "cotizaciones",
        quotes.data.as_ref().filter(|_| quotes.success).map(Vec::len),
        &quotes.message,
    );
    line(
        "productos stock bajo",
        products.data.as_ref().filter(|_| products.success).map(Vec::len),
        &products.message,
    );
    Ok(())
}
