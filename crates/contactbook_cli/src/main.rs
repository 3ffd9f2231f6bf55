//! Command-line front end for the contact book.
//!
//! # Responsibility
//! - Map subcommands onto `ContactBook` use cases.
//! - Render the filtered contact list and report field errors.

mod render;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use contactbook_core::db::open_db;
use contactbook_core::{
    init_logging, write_export, AppConfig, ContactBook, ContactFields, ContactStore, FormSignal,
    KvContactStore, SqliteKeyValueStore,
};
use log::info;
use render::{describe_error, render_contact, render_list};
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "contactbook")]
#[command(about = "Keep a small list of contacts in local storage")]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// SQLite database path (overrides CONTACTBOOK_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error (overrides CONTACTBOOK_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for log files (overrides CONTACTBOOK_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// List contacts, optionally filtered by name or email
    List {
        /// Case-insensitive search term
        #[arg(short, long, default_value = "")]
        filter: String,
    },
    /// Add a new contact
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// Edit a contact; omitted fields keep their current value
    Edit {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Remove a contact
    Remove { id: Uuid },
    /// Remove every contact
    Clear {
        /// Confirm removal of all contacts
        #[arg(long)]
        yes: bool,
    },
    /// Write all contacts to contatos.json
    Export {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Print core version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let mut book = ContactBook::open(KvContactStore::new(SqliteKeyValueStore::new(&conn)));

    let stdout = std::io::stdout();
    run(&mut book, cli.command, &mut stdout.lock())
}

fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    config
}

fn run<S: ContactStore>(
    book: &mut ContactBook<S>,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List { filter } => {
            render_list(out, &book.list(&filter))?;
        }
        Command::Add { name, email, phone } => {
            let outcome = book
                .submit(&ContactFields::new(name, email, phone))
                .map_err(|err| anyhow!(describe_error(&err)))?;
            write!(out, "Added: ")?;
            render_contact(out, &outcome.contact)?;
        }
        Command::Edit {
            id,
            name,
            email,
            phone,
        } => {
            let current = match book.begin_edit(id)? {
                FormSignal::Prefill(fields) => fields,
                FormSignal::Clear => ContactFields::default(),
            };
            let fields = ContactFields {
                name: name.unwrap_or(current.name),
                email: email.unwrap_or(current.email),
                phone: phone.unwrap_or(current.phone),
            };
            let outcome = match book.submit(&fields) {
                Ok(outcome) => outcome,
                Err(err) => {
                    book.cancel();
                    bail!(describe_error(&err));
                }
            };
            write!(out, "Updated: ")?;
            render_contact(out, &outcome.contact)?;
        }
        Command::Remove { id } => {
            if book.remove(id) {
                writeln!(out, "Removed {id}.")?;
            } else {
                writeln!(out, "No contact with id {id}.")?;
            }
        }
        Command::Clear { yes } => {
            let count = book.repository().len();
            if count > 0 && !yes {
                bail!("refusing to remove {count} contact(s) without --yes");
            }
            if book.clear_all() {
                writeln!(out, "Removed {count} contact(s).")?;
            } else {
                writeln!(out, "Nothing to clear.")?;
            }
        }
        Command::Export { out: dir } => {
            let records = book.repository().to_records();
            let path = write_export(&dir, &records)
                .with_context(|| format!("failed to export into `{}`", dir.display()))?;
            info!("event=cli_export module=cli status=ok count={}", records.len());
            writeln!(out, "Exported {} contact(s) to {}.", records.len(), path.display())?;
        }
        Command::Version => {
            writeln!(
                out,
                "contactbook_core ping={} version={}",
                contactbook_core::ping(),
                contactbook_core::core_version()
            )?;
        }
    }
    Ok(())
}
