//! Story Layout CLI
//!
//! Usage:
//!   story-layout [OPTIONS] [PROMPT]
//!
//! Options:
//!   -m, --style <MODE>         Style mode: minimal, bold or premium
//!   -b, --brand <NAME>         Brand handle used in the footer
//!   -c, --cta <TEXT>           Preferred call to action
//!   -s, --stylesheet <FILE>    Palettes and template ids per mode (TOML)
//!   -t, --templates <FILE>     Extra template catalog (TOML)
//!   -o, --out <FILE>           Write the page here instead of stdout
//!   --offline                  Skip the content generator
//!   --list-templates           Print known templates and exit
//!   -h, --help                 Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use story_layout::generator::{GeneratorConfig, OpenAiGenerator};
use story_layout::host::PageFormat;
use story_layout::{
    ContentGenerator, FileHost, Orchestrator, OrchestratorConfig, PageDimensions, Stylesheet,
    StoryRequest, TemplateRegistry, UnavailableGenerator,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Json,
}

impl From<Format> for PageFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Svg => PageFormat::Svg,
            Format::Json => PageFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "story-layout")]
#[command(about = "Generate Instagram Story pages from a one-line prompt")]
struct Cli {
    /// What the story is about (reads from stdin if not provided)
    prompt: Option<String>,

    /// Style mode: minimal, bold or premium
    #[arg(short = 'm', long, default_value = "minimal")]
    style: String,

    /// Brand handle used in the footer
    #[arg(short, long)]
    brand: Option<String>,

    /// Preferred call to action
    #[arg(short, long)]
    cta: Option<String>,

    /// Page width in pixels
    #[arg(long, default_value_t = 1080.0)]
    width: f64,

    /// Page height in pixels
    #[arg(long, default_value_t = 1920.0)]
    height: f64,

    /// Stylesheet file with palettes and template ids (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Extra template catalog (TOML format)
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Use the fallback planner only
    #[arg(long)]
    offline: bool,

    /// Seconds to wait for the content generator
    #[arg(long, default_value_t = 20)]
    timeout: u64,

    /// Fall back when the generator picks a template of another style mode
    #[arg(long)]
    strict_templates: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Print the plan used as JSON on stderr
    #[arg(long)]
    show_plan: bool,

    /// Print known templates and exit
    #[arg(long)]
    list_templates: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "story_layout=info",
        1 => "story_layout=debug",
        _ => "story_layout=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load stylesheet
    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };

    // Load templates
    let registry = match &cli.templates {
        Some(path) => match TemplateRegistry::with_builtin_and(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error loading templates '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => TemplateRegistry::builtin(),
    };

    if cli.list_templates {
        for template in registry.iter() {
            println!(
                "{:<12} {:<8} {}",
                template.id,
                template.style_mode.as_str(),
                template.name
            );
        }
        return;
    }

    // Read prompt
    let prompt = match cli.prompt.clone() {
        Some(prompt) => prompt,
        None if io::stdin().is_terminal() => {
            print_intro();
            return;
        }
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            buffer
        }
    };

    let generator = build_generator(&cli, &stylesheet);
    let host = FileHost::new(
        cli.out.clone(),
        Some(PageDimensions::new(cli.width, cli.height)),
    )
    .with_format(cli.format.into());

    let config = OrchestratorConfig::new()
        .with_generator_timeout(Duration::from_secs(cli.timeout))
        .with_require_template_family(cli.strict_templates);
    let orchestrator = Orchestrator::new(generator, Arc::new(host))
        .with_registry(Arc::new(registry))
        .with_stylesheet(&stylesheet)
        .with_config(config);

    let mut request = StoryRequest::new(prompt, cli.style.clone());
    if let Some(brand) = &cli.brand {
        request = request.with_brand(brand.clone());
    }
    if let Some(cta) = &cli.cta {
        request = request.with_cta(cta.clone());
    }

    match orchestrator.generate(&request).await {
        Ok(generated) => {
            debug!(trace = ?generated.trace, "request finished");
            if let Some(reason) = &generated.fallback_reason {
                warn!(%reason, "story used the fallback plan");
            }
            if cli.show_plan {
                eprintln!("{:#}", generated.plan.to_json());
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn build_generator(cli: &Cli, stylesheet: &Stylesheet) -> Arc<dyn ContentGenerator> {
    if cli.offline {
        return Arc::new(UnavailableGenerator::new("offline mode"));
    }
    match OpenAiGenerator::new(GeneratorConfig::from_env(), stylesheet) {
        Ok(generator) => Arc::new(generator),
        Err(e) => {
            warn!(error = %e, "content generator unavailable, stories will use the fallback plan");
            Arc::new(UnavailableGenerator::new(e.to_string()))
        }
    }
}

fn print_intro() {
    println!(
        r#"Story Layout - Instagram Story pages from a one-line prompt

USAGE:
    story-layout "Announce our new hoodie drop" --style bold --brand apex
    echo "Summer sale" | story-layout --style premium --out story.svg

STYLE MODES:
    minimal   dark page, green CTA pill, copy stacked top-left
    bold      dark page, purple accent bar above an oversized headline
    premium   near-black page, gold accent line

The content generator is used when OPENAI_API_KEY is set; otherwise, or with
--offline, a deterministic fallback plan is used.

Run with --help for all options."#
    );
}
