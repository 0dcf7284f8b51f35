//! Guyun - terminal front end for the instrument gallery, favorites, and quiz

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use guyun::config::{Paths, Settings, CARD_EXCERPT_CHARS, FEEDBACK_EXCERPT_CHARS};
use guyun::core::{Phase, QuizConfig, QuizSession, Topic};
use guyun::storage::FileStorage;
use guyun::stores::{Catalog, CatalogFilter, CatalogProvider, FavoritesStore};
use guyun::utils::text::excerpt;
use guyun::{Category, Item, NotificationBus};

/// Guyun - hear the ancient instruments
#[derive(Parser, Debug)]
#[command(name = "guyun")]
#[command(version)]
#[command(about = "Browse traditional Chinese instruments, keep favorites, and take a listening quiz")]
struct Args {
    /// Enable debug mode
    #[arg(long, global = true)]
    debug: bool,

    /// Path to data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List instruments, optionally filtered
    Gallery {
        /// Only this category (wind, bowed, plucked, percussion)
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,

        /// Only this era
        #[arg(long)]
        era: Option<String>,

        /// Keyword matched against name and description
        #[arg(long)]
        search: Option<String>,
    },
    /// List favorited instruments
    Favorites,
    /// Add or remove an instrument from favorites
    Toggle {
        /// Instrument id
        id: i64,
    },
    /// Show a randomly recommended instrument
    Recommend,
    /// Take the listening quiz
    Quiz {
        /// Number of questions
        #[arg(long)]
        questions: Option<usize>,

        /// Options per question
        #[arg(long)]
        options: Option<usize>,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_str(s).ok_or_else(|| format!("unknown category '{}'", s))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(log_level);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let paths = Paths::init(args.data_dir)?;
    info!("Data directory: {:?}", paths.data_dir());

    let settings = Settings::load(&paths.settings_path())?;
    let catalog = match &settings.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin().context("Bundled catalog is invalid")?,
    };

    let storage = FileStorage::open(paths.storage_dir())?;
    let bus = NotificationBus::global();
    let favorites = Arc::new(FavoritesStore::with_key(
        Arc::new(storage),
        Arc::clone(&bus),
        settings.favorites_key.clone(),
    ));

    // the navigation badge: re-query the store on every change
    let badge_store = Arc::clone(&favorites);
    let _ = bus.subscribe(Topic::FavoritesChanged, move |_| {
        println!("Favorites: {}", badge_store.count());
    });

    match args.command {
        Command::Gallery {
            category,
            era,
            search,
        } => {
            let filter = CatalogFilter {
                category,
                era,
                search,
            };
            show_gallery(&catalog, &favorites, &filter);
        }
        Command::Favorites => show_favorites(&catalog, &favorites),
        Command::Toggle { id } => toggle(&catalog, &favorites, id),
        Command::Recommend => recommend(&catalog, &favorites, settings.recommendation_seed),
        Command::Quiz { questions, options } => {
            let config = QuizConfig::new(
                questions.unwrap_or(settings.quiz.question_count),
                options.unwrap_or(settings.quiz.options_per_question),
            );
            run_quiz(&catalog, config)?;
        }
    }

    Ok(())
}

fn print_card(item: &Item, favorites: &FavoritesStore) {
    let marker = if favorites.is_favorite(item.id) {
        "*"
    } else {
        " "
    };
    println!(
        "{} [{:>2}] {} - {} ({})",
        marker,
        item.id,
        item.name,
        item.category.label(),
        item.era
    );
    println!("       {}", excerpt(&item.description, CARD_EXCERPT_CHARS));
}

fn show_gallery(catalog: &Catalog, favorites: &FavoritesStore, filter: &CatalogFilter) {
    let items = catalog.filter(filter);
    println!("Found {} instrument(s)", items.len());

    if items.is_empty() {
        println!("No instruments match. Eras: {}", catalog.eras().join(", "));
        return;
    }

    for item in items {
        print_card(item, favorites);
    }
}

fn show_favorites(catalog: &Catalog, favorites: &FavoritesStore) {
    let items = favorites.list_favorite_items(catalog);
    if items.is_empty() {
        println!("No favorites yet. Use `guyun toggle <id>` to add one.");
        return;
    }

    for item in items {
        print_card(item, favorites);
    }
}

fn toggle(catalog: &Catalog, favorites: &FavoritesStore, id: i64) {
    let name = catalog
        .find_by_id(id)
        .map(|item| item.name.clone())
        .unwrap_or_else(|| format!("#{}", id));

    if favorites.toggle_favorite(id) {
        println!("Added {} to favorites", name);
    } else {
        println!("Removed {} from favorites", name);
    }
}

fn recommend(catalog: &Catalog, favorites: &FavoritesStore, seed: Option<u64>) {
    for (category, count) in catalog.category_counts() {
        println!("{}: {}", category.label(), count);
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match catalog.random_item(&mut rng) {
        Some(item) => {
            println!("Recommended:");
            print_card(item, favorites);
            println!("       Listen: {}", item.audio_path);
        }
        None => println!("The catalog is empty"),
    }
}

fn run_quiz(catalog: &Catalog, config: QuizConfig) -> Result<()> {
    let mut session = QuizSession::new();

    if let Err(e) = session.start(catalog.list_all(), config) {
        println!("Cannot start the quiz: {}", e);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while session.phase() == Phase::InProgress {
        let (number, total) = session.progress().unwrap_or((0, 0));
        let question = match session.current_question() {
            Some(question) => question.clone(),
            None => break,
        };

        println!();
        println!("Question {} / {}", number, total);
        println!("Listen: {}", question.correct_item.audio_path);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option.name);
        }

        let selected = loop {
            print!("Your answer: ");
            io::stdout().flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    session.reset();
                    println!();
                    println!("Quiz abandoned");
                    return Ok(());
                }
            };

            match line.trim().parse::<usize>() {
                Ok(n) if (1..=question.options.len()).contains(&n) => {
                    break question.options[n - 1].id
                }
                _ => println!("Enter a number from 1 to {}", question.options.len()),
            }
        };

        let evaluated = session.submit_answer(selected)?;
        if let Some(feedback) = evaluated.feedback() {
            let correct = feedback.correct_item;
            if feedback.is_correct {
                println!(
                    "Correct! {}: {}",
                    correct.name,
                    excerpt(&correct.description, FEEDBACK_EXCERPT_CHARS)
                );
            } else {
                let chosen = feedback
                    .chosen_item
                    .map(|item| item.name.as_str())
                    .unwrap_or("that");
                println!(
                    "Wrong. This is {}, not {}. {}",
                    correct.name,
                    chosen,
                    excerpt(&correct.description, FEEDBACK_EXCERPT_CHARS)
                );
            }
        }

        session.advance()?;
    }

    if let Some(result) = session.result() {
        println!();
        println!("Score: {}", result);
        println!("{}", result.message());
    }

    Ok(())
}
