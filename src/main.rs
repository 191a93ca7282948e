use clap::{Parser, Subcommand};
use serde::Serialize;
use showcase::content::{self, Collection, ContentStore, Kind, Record};
use showcase::resolve::{RelationSpec, resolve, resolve_all};
use showcase::{config, generate, output, schema};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "Static generator for a studio marketing site")]
#[command(long_about = "\
Static generator for a studio marketing site

Content lives in JSON collections. Records reference each other by id and
every reference is resolved at build time; a missing target never breaks a
page, it renders with a fallback label instead.

Content structure:

  content/
  ├── config.toml           # Site config (optional)
  ├── posts.json            # A collection as one JSON array
  ├── authors.json
  ├── categories.json
  ├── departments.json
  ├── jobs/                 # ...or as a directory, one record per file
  │   ├── 010-backend.json
  │   └── 020-designer.json
  ├── projects.json
  ├── testimonials.json
  └── faqs.json

Run 'showcase check' to list broken references and
'showcase gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log resolution details (same as RUST_LOG=showcase=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate content and list broken references
    Check {
        /// Exit with an error when any reference is broken
        #[arg(long)]
        strict: bool,
    },
    /// Print a collection with its relations resolved, as JSON
    Resolve {
        /// Collection name (posts, authors, categories, departments, jobs,
        /// projects, testimonials, faqs)
        #[arg(value_parser = parse_kind)]
        kind: Kind,
        /// Print only the record with this slug
        #[arg(long)]
        slug: Option<String>,
    },
    /// Render the static site into the output directory
    Build,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn parse_kind(name: &str) -> Result<Kind, String> {
    Kind::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Kind::ALL.iter().map(|k| k.name()).collect();
        format!("unknown collection '{name}' (expected one of: {})", known.join(", "))
    })
}

fn init_tracing(verbose: bool) -> Result<(), Box<dyn Error>> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::from_default_env().add_directive(format!("showcase={level}").parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Check { strict } => {
            let site_config = config::load_config(&cli.source)?;
            let store = content::load(&cli.source)?;
            let broken = schema::audit(&store, &site_config.fallbacks);
            output::print_check_output(&store, &broken);
            if strict && !broken.is_empty() {
                return Err(format!("{} broken reference(s)", broken.len()).into());
            }
        }
        Command::Resolve { kind, slug } => {
            let site_config = config::load_config(&cli.source)?;
            let store = content::load(&cli.source)?;
            let value = resolve_kind(&store, &site_config.fallbacks, kind, slug.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let store = content::load(&cli.source)?;
            let report = generate::generate(&store, &site_config, &cli.output)?;
            output::print_build_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn resolve_kind(
    store: &ContentStore,
    fallbacks: &config::FallbackConfig,
    kind: Kind,
    slug: Option<&str>,
) -> Result<serde_json::Value, Box<dyn Error>> {
    match kind {
        Kind::Posts => views_json(kind, &store.posts, &schema::post_relations(fallbacks), store, slug),
        Kind::Jobs => views_json(kind, &store.jobs, &schema::job_relations(fallbacks), store, slug),
        Kind::Projects => views_json(
            kind,
            &store.projects,
            &schema::project_relations(fallbacks),
            store,
            slug,
        ),
        Kind::Authors => views_json(kind, &store.authors, &[], store, slug),
        Kind::Categories => views_json(kind, &store.categories, &[], store, slug),
        Kind::Departments => views_json(kind, &store.departments, &[], store, slug),
        Kind::Testimonials => views_json(kind, &store.testimonials, &[], store, slug),
        Kind::Faqs => views_json(kind, &store.faqs, &[], store, slug),
    }
}

/// All records of a collection as resolved views, or the single record
/// with `slug`. A slug that matches nothing is a not-found error.
fn views_json<R>(
    kind: Kind,
    collection: &Collection<R>,
    relations: &[RelationSpec],
    store: &ContentStore,
    slug: Option<&str>,
) -> Result<serde_json::Value, Box<dyn Error>>
where
    R: Record + Serialize + Sync,
{
    let value = match slug {
        Some(slug) => {
            let record = collection
                .by_slug(slug)
                .ok_or_else(|| format!("not found: no {kind} record with slug '{slug}'"))?;
            serde_json::to_value(resolve(record, relations, store))?
        }
        None => serde_json::to_value(resolve_all(collection.items(), relations, store))?,
    };
    Ok(value)
}
