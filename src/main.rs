mod logging;

use bankist::{
    clock::SystemClock,
    config::Settings,
    engine::Engine,
    runtime::{self, Command, DisplaySurface, Update},
    seed::{demo_accounts, load_accounts},
    store::AccountStore,
};

use anyhow::Context;
use std::env;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::set_up();

    let store = match parse_args() {
        Some(path) => load_accounts(&path)
            .with_context(|| format!("Failed to load seed accounts from {path}"))?,
        None => demo_accounts().context("Failed to build demo accounts")?,
    };

    run(store).await
}

fn parse_args() -> Option<String> {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => None,
        2 => Some(args[1].clone()),
        _ => {
            eprintln!("Usage: {} [seed_csv]", args[0]);
            eprintln!("  seed_csv: CSV of account movements (default: built-in demo accounts)");
            std::process::exit(1);
        }
    }
}

async fn run(store: AccountStore) -> anyhow::Result<()> {
    let engine = Engine::new(store, Arc::new(SystemClock), Settings::default());
    let (commands, handle) = runtime::spawn(engine, Terminal);

    println!("Log in to get started");
    println!(
        "Commands: login <user> <pin> | transfer <user> <amount> | loan <amount> \
         | close <user> <pin> | sort | quit"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "quit" {
            break;
        }

        match parse_command(line) {
            Some(command) => commands
                .send(command)
                .await
                .context("Event loop stopped")?,
            None if line.is_empty() => {}
            None => eprintln!("Unrecognised command: {line}"),
        }
    }

    drop(commands);
    handle.await.context("Event loop panicked")?;
    Ok(())
}

fn parse_command(line: &str) -> Option<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();

    let command = match words.as_slice() {
        ["login", username, pin] => Command::Login {
            username: username.to_string(),
            pin: pin.to_string(),
        },
        ["transfer", to, amount] => Command::Transfer {
            to: to.to_string(),
            amount: amount.to_string(),
        },
        ["loan", amount] => Command::RequestLoan {
            amount: amount.to_string(),
        },
        ["close", username, pin] => Command::CloseAccount {
            username: username.to_string(),
            pin: pin.to_string(),
        },
        ["sort"] => Command::ToggleSort,
        _ => return None,
    };

    Some(command)
}

/// Prints every update to stdout.
struct Terminal;

impl DisplaySurface for Terminal {
    fn render(&mut self, update: Update) {
        match update {
            Update::Dashboard(dashboard) => {
                println!("{}  ({})", dashboard.welcome, dashboard.current_date);
                println!("Current balance: {}", dashboard.balance.formatted);
                for row in &dashboard.rows {
                    println!(
                        "  {:>3} {:<10} {:<12} {:>16}",
                        row.index, row.kind.as_str(), row.date, row.amount
                    );
                }
                println!(
                    "In {} | Out {} | Interest {}",
                    dashboard.summary.income, dashboard.summary.outgo, dashboard.summary.interest
                );
                println!("You will be logged out in {}", dashboard.timer);
            }
            Update::Timer(timer) => println!("You will be logged out in {timer}"),
            Update::LoggedOut(welcome) => println!("{welcome}"),
            Update::Rejected(e) => eprintln!("{e}"),
        }
    }
}
