//! Single-writer event loop around an [`Engine`].
//!
//! One task owns the engine. User commands, countdown ticks and matured loans
//! all arrive at that task and are applied one at a time, so nothing else ever
//! touches accounts or the session.

use crate::engine::{Engine, PendingLoan};
use crate::error::BankError;
use crate::session::{TickOutcome, TimerView};
use crate::view::{Dashboard, WelcomeState};

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Interval};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, pin: String },
    Transfer { to: String, amount: String },
    RequestLoan { amount: String },
    CloseAccount { username: String, pin: String },
    ToggleSort,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Dashboard(Dashboard),
    Timer(TimerView),
    LoggedOut(WelcomeState),
    Rejected(BankError),
}

/// Receives every view-model the runtime produces.
pub trait DisplaySurface: Send + 'static {
    fn render(&mut self, update: Update);
}

/// Start the event loop. Dropping every sender stops it and hands the engine
/// back through the join handle.
pub fn spawn<D: DisplaySurface>(
    engine: Engine,
    surface: D,
) -> (mpsc::Sender<Command>, JoinHandle<Engine>) {
    let (tx, rx) = mpsc::channel::<Command>(100);
    let handle = tokio::spawn(run(engine, rx, surface));
    (tx, handle)
}

pub async fn run<D: DisplaySurface>(
    mut engine: Engine,
    mut commands: mpsc::Receiver<Command>,
    mut surface: D,
) -> Engine {
    let (loan_tx, mut loans) = mpsc::unbounded_channel::<PendingLoan>();
    // At most one countdown; replaced on login, dropped on logout.
    let mut countdown: Option<Interval> = None;

    loop {
        tokio::select! {
            biased;

            command = commands.recv() => {
                let Some(command) = command else { break };
                handle_command(&mut engine, command, &mut countdown, &loan_tx, &mut surface);
            }
            Some(loan) = loans.recv() => {
                match engine.complete_loan(&loan) {
                    Ok(Some(dashboard)) => surface.render(Update::Dashboard(dashboard)),
                    Ok(None) => {
                        debug!(username = %loan.username, "loan landed outside the active session")
                    }
                    Err(e) => {
                        warn!(username = %loan.username, error = %e, "loan could not be recorded")
                    }
                }
            }
            () = next_tick(&mut countdown) => {
                match engine.tick() {
                    TickOutcome::Running(timer) => surface.render(Update::Timer(timer)),
                    TickOutcome::Expired => {
                        countdown = None;
                        surface.render(Update::LoggedOut(WelcomeState::logged_out()));
                    }
                    TickOutcome::Inactive => countdown = None,
                }
            }
        }
    }

    engine
}

fn handle_command<D: DisplaySurface>(
    engine: &mut Engine,
    command: Command,
    countdown: &mut Option<Interval>,
    loans: &mpsc::UnboundedSender<PendingLoan>,
    surface: &mut D,
) {
    debug!(?command, "handling command");

    let result = match command {
        Command::Login { username, pin } => engine.login(&username, &pin).map(|dashboard| {
            *countdown = Some(time::interval(engine.settings().tick_period));
            Some(Update::Dashboard(dashboard))
        }),
        Command::Transfer { to, amount } => engine
            .transfer(&to, &amount)
            .map(|dashboard| Some(Update::Dashboard(dashboard))),
        Command::RequestLoan { amount } => engine.request_loan(&amount).map(|loan| {
            schedule_loan(loan, engine.settings().loan_delay, loans.clone());
            None
        }),
        Command::CloseAccount { username, pin } => {
            engine.close_account(&username, &pin).map(|welcome| {
                *countdown = None;
                Some(Update::LoggedOut(welcome))
            })
        }
        Command::ToggleSort => engine
            .toggle_sort()
            .map(|dashboard| Some(Update::Dashboard(dashboard))),
    };

    match result {
        Ok(Some(update)) => surface.render(update),
        Ok(None) => {}
        Err(e) => {
            debug!(error = %e, "command rejected");
            surface.render(Update::Rejected(e));
        }
    }
}

/// The deposit lands after `delay` no matter what happens to the session in
/// the meantime.
fn schedule_loan(loan: PendingLoan, delay: Duration, loans: mpsc::UnboundedSender<PendingLoan>) {
    tokio::spawn(async move {
        time::sleep(delay).await;
        if loans.send(loan).is_err() {
            warn!("event loop stopped before a loan matured");
        }
    });
}

async fn next_tick(countdown: &mut Option<Interval>) {
    match countdown {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
