use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vitrine::export::{self, BuildError, CheckStatus};
use vitrine::shell::PageKind;
use vitrine::{config, layout, output};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Content hydration for small JSON-driven marketing sites")]
#[command(long_about = "\
Content hydration for small JSON-driven marketing sites

Every page region is filled from a JSON content document. Regions whose
container is missing from a page are skipped; a document that fails to load
shows its configured failure text instead of breaking the page.

Site structure:

  site/
  ├── site.toml                # Optional, overrides stock defaults
  ├── content/
  │   ├── home.json            # Hero, about teaser, featured sponsors/posts
  │   ├── about.json           # Free-form sections
  │   ├── sellers.json         # { title, intro, items: [...] }
  │   ├── sponsors.json
  │   ├── gallery.json
  │   ├── social.json
  │   └── contacts.json
  ├── partials/
  │   ├── header.html          # Injected into #site-header
  │   └── footer.html          # Injected into #site-footer (#year is filled)
  └── img/ css/ …              # Copied to the output as-is

Run 'vitrine gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site directory
    #[arg(long, default_value = "site", global = true)]
    site: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Hydrate every page into static HTML and copy assets
    Build,
    /// Print one hydrated page to stdout
    Render {
        /// Page name: home, about, sellers, sponsors, gallery, social, contacts
        page: String,
    },
    /// Fetch and validate every content document without building
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.site)?;
            init_thread_pool(&site_config.processing);
            println!(
                "==> Building {} \u{2192} {}",
                cli.site.display(),
                cli.output.display()
            );
            let result = export::build(
                &cli.site,
                &cli.output,
                &site_config,
                layout::current_year(),
            )?;
            output::print_build_output(&result);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Render { page } => {
            let page = PageKind::from_name(&page).ok_or(BuildError::UnknownPage(page))?;
            let site_config = config::load_config(&cli.site)?;
            let (html, _) =
                export::render_page(&cli.site, &site_config, page, layout::current_year());
            println!("{}", html);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.site)?;
            println!("==> Checking {}", cli.site.display());
            let checks = export::check(&cli.site, &site_config);
            output::print_check_output(&checks);
            let failed = checks
                .iter()
                .filter(|c| matches!(c.status, CheckStatus::Failed(_)))
                .count();
            if failed > 0 {
                return Err(BuildError::CheckFailed(failed).into());
            }
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
