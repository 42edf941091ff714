//! Site Admin CLI
//!
//! Inspect and reorder the admin lists from a terminal.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use site_admin::commands::{EmbeddedStore, HttpStore, LocalStore, OrderStore};
use site_admin::config::{AdminConfig, StoreConfig};
use site_admin::models::{
    CollectionKind, CollectionPayload, Entry, FeaturedProgram, HeroSlide, LocalizedText,
    ProgramTag, QuickLink, StudentStory,
};
use site_admin::{Direction, ListController, SyncOutcome, ToastLevel, Toasts};
use site_admin_backend::{commands, AppState};

#[derive(Parser)]
#[command(name = "site-admin", version, about = "Reorder the site's admin lists")]
struct Cli {
    /// Config file (JSON)
    #[arg(long, env = "SITE_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a collection in display order
    List { collection: CollectionKind },
    /// Swap an entry with its neighbour
    Move {
        collection: CollectionKind,
        index: usize,
        direction: Direction,
    },
    /// Move an entry to another index
    Drag {
        collection: CollectionKind,
        from: usize,
        to: usize,
    },
    /// Append entries with the given English titles
    Seed {
        collection: CollectionKind,
        #[arg(required = true)]
        titles: Vec<String>,
    },
}

impl Command {
    fn collection(&self) -> CollectionKind {
        match self {
            Command::List { collection }
            | Command::Move { collection, .. }
            | Command::Drag { collection, .. }
            | Command::Seed { collection, .. } => *collection,
        }
    }
}

/// Backing store selected by the config
enum Backend {
    Local(Duration),
    Sqlite(Arc<AppState>),
    Http(String),
}

impl Backend {
    async fn connect(config: &StoreConfig) -> Result<Self, String> {
        Ok(match config {
            StoreConfig::Local { latency_ms } => Backend::Local(Duration::from_millis(*latency_ms)),
            StoreConfig::Sqlite { db_path } => {
                Backend::Sqlite(Arc::new(AppState::open(db_path.clone()).await?))
            }
            StoreConfig::Http { base_url } => Backend::Http(base_url.clone()),
        })
    }

    fn store<P: CollectionPayload>(&self) -> Result<Arc<dyn OrderStore<Entry<P>>>, String> {
        let store: Arc<dyn OrderStore<Entry<P>>> = match self {
            Backend::Local(latency) => {
                Arc::new(LocalStore::<Entry<P>>::with_demo_entries(*latency))
            }
            Backend::Sqlite(state) => Arc::new(EmbeddedStore::<P>::new(Arc::clone(state))),
            Backend::Http(base_url) => Arc::new(HttpStore::<P>::new(base_url)?),
        };
        Ok(store)
    }
}

fn print_entries<P: CollectionPayload>(entries: &[Entry<P>], config: &AdminConfig) {
    if entries.is_empty() {
        println!("({} is empty)", P::KIND);
    }
    for entry in entries {
        println!(
            "{:>3}  #{:<5} {}",
            entry.position,
            entry.id,
            entry.payload.label(config.locale)
        );
    }
}

async fn run_for<P: CollectionPayload>(
    command: &Command,
    backend: &Backend,
    config: &AdminConfig,
    toasts: &Toasts,
) -> Result<(), String> {
    if let Command::Seed { titles, .. } = command {
        let Backend::Sqlite(state) = backend else {
            return Err("seeding needs a sqlite store; the local store only holds demo entries".to_string());
        };
        for title in titles {
            commands::create_entry(state, P::from_title(LocalizedText::en_only(title.as_str()))).await?;
        }
        toasts.success(format!("Added {} {} entries", titles.len(), P::KIND));
        print_entries(&commands::list_entries::<P>(state).await?, config);
        return Ok(());
    }

    let mut controller =
        ListController::new(P::KIND.to_string(), backend.store::<P>()?, toasts.clone(), config.sync);
    if !controller.load().await {
        return Ok(());
    }

    let outcome = match command {
        Command::Move { index, direction, .. } => controller.move_item(*index, *direction).await,
        Command::Drag { from, to, .. } => controller.drag_reorder(*from, Some(*to)).await,
        _ => SyncOutcome::Unchanged,
    };
    // The CLI exits right away, so a deferred change is saved now
    if outcome == SyncOutcome::Deferred {
        controller.save().await;
    } else if outcome == SyncOutcome::Unchanged && !matches!(command, Command::List { .. }) {
        toasts.info("Nothing to reorder");
    }

    print_entries(controller.list().get_ordered(), config);
    Ok(())
}

async fn run(cli: Cli) -> Result<bool, String> {
    let config_path = cli.config.unwrap_or_else(AdminConfig::default_path);
    let config = AdminConfig::load(&config_path).map_err(|e| e.to_string())?;

    if let Err(e) = rolling_logger::init_logger(&config.log_dir, "site-admin") {
        eprintln!("Logging disabled: {}", e);
    }
    rolling_logger::info(&format!("Using config {}", config_path.display())).ok();

    let backend = Backend::connect(&config.store).await?;
    if let Backend::Local(_) = backend {
        let note = "Local store holds demo entries; reorders last for this run only";
        if rolling_logger::warn(note).is_err() {
            eprintln!("warning: {}", note);
        }
    }
    let toasts = Toasts::new();
    let command = &cli.command;

    match command.collection() {
        CollectionKind::HeroSlides => run_for::<HeroSlide>(command, &backend, &config, &toasts).await?,
        CollectionKind::FeaturedPrograms => {
            run_for::<FeaturedProgram>(command, &backend, &config, &toasts).await?
        }
        CollectionKind::StudentStories => {
            run_for::<StudentStory>(command, &backend, &config, &toasts).await?
        }
        CollectionKind::QuickLinks => run_for::<QuickLink>(command, &backend, &config, &toasts).await?,
        CollectionKind::ProgramTags => run_for::<ProgramTag>(command, &backend, &config, &toasts).await?,
    }

    let mut ok = true;
    for toast in toasts.drain() {
        let tag = match toast.level {
            ToastLevel::Success => "ok",
            ToastLevel::Info => "info",
            ToastLevel::Error => {
                ok = false;
                "error"
            }
        };
        eprintln!("[{}] {}", tag, toast.message);
    }
    Ok(ok)
}

/// Tail of this run's log, shown when a command fails
fn print_recent_log() {
    let lines = rolling_logger::recent_lines(RECENT_LOG_LINES);
    if lines.is_empty() {
        return;
    }
    eprintln!("recent log:");
    for line in lines {
        eprintln!("  {}", line);
    }
}

const RECENT_LOG_LINES: usize = 10;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => {}
        Ok(false) => {
            print_recent_log();
            std::process::exit(1);
        }
        Err(e) => {
            rolling_logger::error(&e).ok();
            eprintln!("error: {}", e);
            print_recent_log();
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_admin::SyncOptions;

    #[tokio::test]
    async fn test_local_backend_serves_demo_entries() {
        let backend = Backend::connect(&StoreConfig::Local { latency_ms: 0 }).await.unwrap();
        let store = backend.store::<HeroSlide>().unwrap();
        assert_eq!(store.load().await.unwrap().len(), 3);

        let toasts = Toasts::new();
        let mut controller =
            ListController::new("hero_slides", store, toasts.clone(), SyncOptions::default());
        assert!(controller.load().await);
        assert_eq!(controller.move_item(1, Direction::Up).await, SyncOutcome::Saved);

        let ids: Vec<u32> = controller.list().get_ordered().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(toasts.latest().map(|t| t.level), Some(ToastLevel::Success));
    }

    #[tokio::test]
    async fn test_seed_refuses_local_store() {
        let backend = Backend::connect(&StoreConfig::Local { latency_ms: 0 }).await.unwrap();
        let command = Command::Seed {
            collection: CollectionKind::QuickLinks,
            titles: vec!["Housing".to_string()],
        };
        let err = run_for::<QuickLink>(&command, &backend, &AdminConfig::default(), &Toasts::new())
            .await
            .unwrap_err();
        assert!(err.contains("sqlite"));
    }

    #[tokio::test]
    async fn test_seed_into_sqlite() {
        let backend = Backend::connect(&StoreConfig::Sqlite { db_path: ":memory:".into() })
            .await
            .unwrap();
        let command = Command::Seed {
            collection: CollectionKind::ProgramTags,
            titles: vec!["Master".to_string(), "PhD".to_string()],
        };
        let toasts = Toasts::new();
        run_for::<ProgramTag>(&command, &backend, &AdminConfig::default(), &toasts)
            .await
            .unwrap();

        let loaded = backend.store::<ProgramTag>().unwrap().load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].position, 1);
    }
}
