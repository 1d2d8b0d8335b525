use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use config::{load_env_file, NavigationSettings, PathManager, Settings};
use ticketdesk_core::ports::ScriptedConfirmer;
use ticketdesk_core::routes;
use ticketdesk_core::{
    AccountError, Confirmer, DeleteOutcome, DeskOptions, FieldErrors, FsKvStore, GateDecision,
    NavigationDelays, Ports, StorageKeys, Ticket, TicketDesk, TicketDraft, TicketError, TicketId,
};

mod logging;
mod terminal;

use terminal::{StdinConfirmer, TerminalNavigator, TerminalNotifier};

#[derive(Parser, Debug)]
#[command(author, version, about = "Local ticket desk", long_about = None)]
struct Args {
    /// Keep settings, logs and the store under this directory
    #[arg(long, env = "TICKETDESK_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Directory holding the stored slots (defaults to the platform data dir)
    #[arg(long, env = "TICKETDESK_STORE_DIR", global = true)]
    store_dir: Option<PathBuf>,

    /// Prefix of the slot names
    #[arg(long, env = "TICKETDESK_NAMESPACE", global = true)]
    namespace: Option<String>,

    /// Debug-level logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Also write logs to the log directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in to an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Check whether a page may be shown
    Open { path: String },
    /// Manage tickets
    #[command(subcommand)]
    Ticket(TicketCommand),
}

#[derive(Subcommand, Debug)]
enum TicketCommand {
    /// List tickets, newest first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one ticket
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "open")]
        status: String,
        #[arg(long, default_value = "low")]
        priority: String,
    },
    /// Change a ticket; omitted fields keep their current value
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Total, open and closed counts
    Stats {
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    fn assume_yes(&self) -> bool {
        matches!(self, Command::Ticket(TicketCommand::Delete { yes: true, .. }))
    }
}

fn delays(settings: &NavigationSettings) -> NavigationDelays {
    NavigationDelays {
        after_login: Duration::from_millis(settings.after_login_ms),
        after_signup: Duration::from_millis(settings.after_signup_ms),
        gate_redirect: Duration::from_millis(settings.gate_redirect_ms),
        after_logout: Duration::from_millis(settings.after_logout_ms),
    }
}

fn ports(assume_yes: bool) -> Ports {
    let confirmer: Arc<dyn Confirmer> = if assume_yes {
        Arc::new(ScriptedConfirmer::always(true))
    } else {
        Arc::new(StdinConfirmer)
    };
    Ports {
        notifier: Arc::new(TerminalNotifier),
        confirmer,
        navigator: Arc::new(TerminalNavigator),
    }
}

fn print_field_errors(errors: &FieldErrors) {
    for e in errors.iter() {
        eprintln!("  {}: {}", e.field, e.message);
    }
}

fn account_failure(err: AccountError) -> anyhow::Error {
    print_field_errors(&err.field_errors());
    err.into()
}

fn ticket_failure(err: TicketError) -> anyhow::Error {
    if let TicketError::Validation(errors) = &err {
        print_field_errors(errors);
    }
    err.into()
}

fn print_ticket(ticket: &Ticket) {
    println!(
        "{}  [{}]  {}  ({})  {}",
        ticket.id,
        ticket.status.label(),
        ticket.title,
        if ticket.priority.is_empty() { "-" } else { ticket.priority.as_str() },
        ticket.created_at.format("%Y-%m-%d %H:%M"),
    );
}

/// Ticket views need a session, like their pages
fn require_session(desk: &TicketDesk, path: &str) -> anyhow::Result<()> {
    match desk.gate().enter(path) {
        GateDecision::Redirected => bail!("login required to open {}", path),
        GateDecision::Open | GateDecision::Authorized(_) => Ok(()),
    }
}

fn run_ticket(desk: &TicketDesk, command: TicketCommand) -> anyhow::Result<()> {
    let tickets = desk.tickets();
    match command {
        TicketCommand::List { json } => {
            require_session(desk, routes::TICKETS)?;
            let all = tickets.list();
            let ordered = ticketdesk_core::types::newest_first(&all);
            if json {
                println!("{}", serde_json::to_string_pretty(&ordered)?);
            } else if ordered.is_empty() {
                println!("No tickets yet. Create one with `ticketdesk ticket create`.");
            } else {
                ordered.into_iter().for_each(print_ticket);
            }
        }
        TicketCommand::Show { id, json } => {
            require_session(desk, routes::TICKETS)?;
            let ticket = tickets
                .load_into_form(&TicketId::from_string(id))
                .map_err(ticket_failure)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ticket)?);
            } else {
                print_ticket(&ticket);
                if !ticket.description.is_empty() {
                    println!();
                    println!("{}", ticket.description);
                }
            }
        }
        TicketCommand::Create {
            title,
            description,
            status,
            priority,
        } => {
            require_session(desk, routes::TICKETS)?;
            let draft = TicketDraft::new(title, description, status, priority);
            let ticket = tickets.submit(None, &draft).map_err(ticket_failure)?;
            println!("{}", ticket.id);
        }
        TicketCommand::Update {
            id,
            title,
            description,
            status,
            priority,
        } => {
            require_session(desk, routes::TICKETS)?;
            let id = TicketId::from_string(id);
            let current = tickets.load_into_form(&id).map_err(ticket_failure)?;

            let mut draft = TicketDraft::from(&current);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(status) = status {
                draft.status = status;
            }
            if let Some(priority) = priority {
                draft.priority = priority;
            }

            tickets.submit(Some(&id), &draft).map_err(ticket_failure)?;
        }
        TicketCommand::Delete { id, .. } => {
            require_session(desk, routes::TICKETS)?;
            let outcome = tickets
                .delete(&TicketId::from_string(id))
                .map_err(ticket_failure)?;
            if outcome == DeleteOutcome::Cancelled {
                eprintln!("Cancelled");
            }
        }
        TicketCommand::Stats { json } => {
            require_session(desk, routes::DASHBOARD)?;
            let stats = tickets.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("total:  {}", stats.total);
                println!("open:   {}", stats.open);
                println!("closed: {}", stats.closed);
            }
        }
    }
    Ok(())
}

fn run(desk: &TicketDesk, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Signup {
            name,
            email,
            password,
        } => {
            desk.accounts()
                .sign_up(&name, &email, &password)
                .map_err(account_failure)?;
        }
        Command::Login { email, password } => {
            desk.accounts()
                .log_in(&email, &password)
                .map_err(account_failure)?;
        }
        Command::Logout => desk.accounts().log_out(),
        Command::Whoami => match desk.accounts().current_session() {
            Some(session) => println!("{} <{}>", session.user.name, session.user.email),
            None => println!("Not logged in"),
        },
        Command::Open { path } => match desk.gate().enter(&path) {
            GateDecision::Open => println!("{}: public", path),
            GateDecision::Authorized(session) => {
                println!("{}: signed in as {}", path, session.user.email)
            }
            GateDecision::Redirected => bail!("login required to open {}", path),
        },
        Command::Ticket(command) => run_ticket(desk, command)?,
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    load_env_file();
    let args = Args::parse();
    if let Some(dir) = args.data_dir.clone() {
        PathManager::set_data_dir(dir);
    }
    let _log_guard = logging::init_logging(args.verbose, args.log_file);
    if let Err(e) = PathManager::ensure_dirs_exist() {
        tracing::warn!(error = %e, "could not create app directories");
    }

    let settings = Settings::load();
    let store_dir = args
        .store_dir
        .clone()
        .or_else(|| settings.resolved_store_dir())
        .context("Could not determine a store directory; pass --store-dir")?;
    let namespace = args
        .namespace
        .clone()
        .unwrap_or_else(|| settings.storage_namespace.clone());
    tracing::debug!(store_dir = %store_dir.display(), namespace = %namespace, "opening store");

    let options = DeskOptions {
        keys: StorageKeys::with_namespace(&namespace),
        delays: delays(&settings.navigation),
    };
    let desk = TicketDesk::new(
        Arc::new(FsKvStore::new(store_dir)),
        ports(args.command.assume_yes()),
        options,
    );

    run(&desk, args.command)
}
