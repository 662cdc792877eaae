mod commands;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{ConsoleCommand, HELP};
use ecole_auth::{demo_accounts, AlertSink, Identity, Notice, Severity};
use ecole_config::load as load_config;
use ecole_notifications::Notification;
use ecole_runtime::{telemetry, EcoleServices};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser)]
#[command(name = "ecole")]
#[command(about = "School dashboard session console (console by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the demo accounts and their shared password
    DemoAccounts,
    /// Show the persisted session, if any
    Whoami,
    /// Clear the persisted session
    Logout,
    /// Start interactive console (default)
    Console,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Console) {
        Commands::DemoAccounts => {
            print_demo_accounts();
            Ok(())
        }
        Commands::Whoami => whoami().await,
        Commands::Logout => logout().await,
        Commands::Console => run_console().await,
    }
}

/// Prints notices the way the dashboard shows toasts.
struct ConsoleAlerts;

impl AlertSink for ConsoleAlerts {
    fn notify(&self, notice: Notice) {
        let marker = match notice.severity {
            Severity::Default => "*",
            Severity::Destructive => "!",
        };
        println!("[{marker}] {}: {}", notice.title, notice.description);
    }
}

/// Services without the background generator, for one-shot commands.
fn one_shot_services() -> anyhow::Result<EcoleServices> {
    let mut config = load_config().context("failed to load configuration")?;
    config.notifications.enabled = false;

    EcoleServices::initialise(&config, Arc::new(ConsoleAlerts))
        .context("failed to initialise services")
}

async fn whoami() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let services = one_shot_services()?;
    match services.auth.current() {
        Some(identity) => print_identity(&identity),
        None => println!("Not signed in"),
    }
    Ok(())
}

async fn logout() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let services = one_shot_services()?;
    if services.auth.is_authenticated() {
        services.auth.logout();
    } else {
        println!("Not signed in");
    }
    Ok(())
}

async fn run_console() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting interactive console");

    let config = load_config().context("failed to load configuration")?;

    let services = EcoleServices::initialise(&config, Arc::new(ConsoleAlerts))
        .context("failed to initialise services")?;

    println!("Ecole Interactive Console");
    println!("Type commands like '/help', '/demo', '/login', '/notifications', '/quit'");
    println!("Use Ctrl+C or '/quit' to exit");
    println!("---");

    if let Some(identity) = services.auth.current() {
        println!("Session restored for {} ({})", identity.name, identity.email);
    }

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        line.clear();
        let bytes_read = tokio::select! {
            read = reader.read_line(&mut line) => read?,
            _ = ecole_runtime::shutdown_signal() => break,
        };
        if bytes_read == 0 {
            break; // EOF
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let command = match commands::parse(input) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        if matches!(command, ConsoleCommand::Quit) {
            println!("Au revoir !");
            break;
        }

        execute(&services, command).await;
    }

    info!("console shut down");
    Ok(())
}

async fn execute(services: &EcoleServices, command: ConsoleCommand) {
    let auth = &services.auth;
    let feed = &services.feed;

    match command {
        ConsoleCommand::Quit => {}
        ConsoleCommand::Help => {
            println!("Available commands:");
            for (usage, description) in HELP {
                println!("  {usage:<66} - {description}");
            }
        }
        ConsoleCommand::Demo => print_demo_accounts(),
        ConsoleCommand::Login { email, password } => {
            // Failures are reported through the alert sink.
            let _ = auth.login(&email, &password).await;
        }
        ConsoleCommand::Register(form) => match form.validate() {
            Ok(request) => {
                let _ = auth.register(request).await;
            }
            Err(error) => println!("{error}"),
        },
        ConsoleCommand::Logout => {
            if !auth.is_authenticated() {
                println!("Not signed in");
            }
            auth.logout();
        }
        ConsoleCommand::Whoami => match auth.current() {
            Some(identity) => print_identity(&identity),
            None => println!("Not signed in"),
        },
        ConsoleCommand::Can(permission) => {
            println!("{permission}: {}", yes_no(auth.has_permission(&permission)));
        }
        ConsoleCommand::Role(role) => {
            println!("{}: {}", role.label(), yes_no(auth.is_role(role)));
        }
        ConsoleCommand::Guard(requirement) => {
            let decision = requirement.evaluate(auth);
            match decision.denial() {
                None if decision.is_granted() => println!("Accès autorisé"),
                None => println!("Redirection vers /login"),
                Some((title, detail)) => println!("{title}: {detail}"),
            }
        }
        ConsoleCommand::Notifications => {
            let items = feed.list().await;
            if items.is_empty() {
                println!("Aucune notification");
            } else {
                println!("Notifications ({} non lues):", feed.unread_count().await);
                for item in &items {
                    print_notification(item);
                }
            }
        }
        ConsoleCommand::Unread => println!("{} non lues", feed.unread_count().await),
        ConsoleCommand::Read(id) => {
            if !feed.mark_as_read(&id).await {
                println!("No notification with id {id}");
            }
        }
        ConsoleCommand::ReadAll => {
            let changed = feed.mark_all_as_read().await;
            println!("{changed} marked as read");
        }
        ConsoleCommand::Delete(id) => {
            if !feed.delete(&id).await {
                println!("No notification with id {id}");
            }
        }
        ConsoleCommand::Notify(new) => match feed.add(new).await {
            Some(created) => print_notification(&created),
            None => println!("Not signed in"),
        },
    }
}

fn print_demo_accounts() {
    println!("Comptes de démonstration:");
    for account in demo_accounts() {
        println!(
            "  {:<15} {:<25} {}",
            account.label(),
            account.email,
            account.password
        );
    }
}

fn print_identity(identity: &Identity) {
    println!("{} <{}>", identity.name, identity.email);
    println!("  id:          {}", identity.id);
    println!("  role:        {}", identity.role.label());
    println!("  school:      {}", identity.school_id);
    if let Some(class_id) = &identity.class_id {
        println!("  class:       {class_id}");
    }
    if let Some(student_ids) = &identity.student_ids {
        println!("  students:    {}", student_ids.join(", "));
    }
    let permissions: Vec<&str> = identity.permissions.iter().map(String::as_str).collect();
    println!("  permissions: {}", permissions.join(", "));
}

fn print_notification(item: &Notification) {
    let marker = if item.read { " " } else { "•" };
    println!(
        "  {marker} [{}] {:<8} {:<7} {} - {} ({})",
        item.id,
        item.kind,
        item.priority,
        item.title,
        item.message,
        item.timestamp.format("%Y-%m-%d %H:%M")
    );
    if let Some(url) = &item.action_url {
        println!("      -> {url}");
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "oui"
    } else {
        "non"
    }
}
