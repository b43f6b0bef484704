use anyhow::Context;
use atsfill::adapters::AdapterRegistry;
use atsfill::config::AtsfillConfig;
use atsfill::field::DetectionReport;
use atsfill::filler::FillSummary;
use atsfill::output::{DetectionOutput, FillOutput};
use atsfill::page::{PageModel, SnapshotPage};
use atsfill::profile::{FieldValues, Profile, ProfileFiller, ValueSource};
use clap::{ArgGroup, Args, ColorChoice, CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use is_terminal::IsTerminal;
use serde::Serialize;
use std::io::stdout;
use std::path::{Path, PathBuf};

/// Environment variable holding the log filter
const LOG_ENV: &str = "ATSFILL_LOG";

#[derive(Parser)]
#[command(
    name = "atsfill",
    about = "Detect and fill job application form fields",
    arg_required_else_help = true
)]
struct Cli {
    /// Disable color
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect form fields in a page snapshot
    Detect(DetectArgs),
    /// Detect fields, then fill them from a profile or explicit values
    Fill(FillArgs),
    /// List adapters in evaluation order
    Adapters(AdaptersArgs),
    /// Print the JSON Schema of `detect --json`
    Schema,
    /// Show the configuration file location and effective settings
    Config(ConfigArgs),
}

#[derive(Args, Clone)]
struct DetectArgs {
    /// Page snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// Output JSON (stable schema)
    #[arg(long)]
    json: bool,

    /// Exit with status 1 when no field is detected
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Clone)]
#[command(group(
    ArgGroup::new("values")
        .required(true)
        .multiple(true)
        .args(["profile", "set"])
))]
struct FillArgs {
    /// Page snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// Candidate profile (JSON)
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Explicit value, e.g. `--set email=ada@example.com`
    #[arg(long = "set", value_name = "TYPE=VALUE")]
    set: Vec<String>,

    /// Write the filled page to this snapshot file
    #[arg(long, value_name = "FILE")]
    write: Option<PathBuf>,

    /// Output JSON (stable schema)
    #[arg(long)]
    json: bool,

    /// Exit with status 1 when nothing was filled
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Clone)]
struct AdaptersArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct ConfigArgs {
    /// Write a default configuration file if none exists
    #[arg(long)]
    init: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn detect_color_choice() -> ColorChoice {
    // Scan args before clap so help/errors honor `--no-color`.
    // Mirror clap's parsing by stopping at `--` which terminates flags.
    let mut args = std::env::args_os();
    // Skip binary name
    args.next();
    let mut flag = false;
    for arg in args {
        if arg == "--" {
            break;
        }
        if arg == "--no-color" {
            flag = true;
            break;
        }
    }
    if flag || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn want_color(choice: ColorChoice, config: &AtsfillConfig) -> bool {
    config.output.color
        && !matches!(choice, ColorChoice::Never)
        && stdout().is_terminal()
        && supports_color::on(supports_color::Stream::Stdout).is_some()
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().cyan().to_string()
    } else {
        text.to_string()
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), i32> {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            Ok(())
        }
        Err(e) => {
            eprintln!("error: failed to serialize output: {}", e);
            Err(3)
        }
    }
}

fn report_error(error: anyhow::Error) -> i32 {
    eprintln!("error: {:#}", error);
    2
}

fn load_snapshot(path: &Path) -> anyhow::Result<SnapshotPage> {
    SnapshotPage::load(path).with_context(|| format!("cannot load snapshot {}", path.display()))
}

fn render_detection(page: &dyn PageModel, report: &DetectionReport, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&heading("Adapter:", color));
    out.push_str(&format!(" {} ({})", report.adapter, page.hostname()));
    out.push('\n');
    out.push_str(&heading("Fields:", color));
    if report.is_empty() {
        out.push_str(" none");
        return out;
    }
    for field in &report.fields {
        let field_type = if color {
            field.field_type.as_str().green().to_string()
        } else {
            field.field_type.as_str().to_string()
        };
        out.push('\n');
        out.push_str(&format!(
            "  {:<5} {} ({:.2})",
            field.element.to_string(),
            field_type,
            field.confidence
        ));
        if !field.label.is_empty() {
            out.push_str(&format!(" \"{}\"", field.label));
        }
    }
    out
}

fn render_fill(output: &FillOutput, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&heading("Adapter:", color));
    out.push_str(&format!(" {} ({})", output.adapter, output.hostname));
    out.push('\n');
    out.push_str(&heading("Filled:", color));
    out.push_str(&format!(" {} of {}", output.filled, output.attempted));
    for field in &output.fields {
        out.push('\n');
        let value = match field.checked {
            Some(checked) => checked.to_string(),
            None => field.value.clone(),
        };
        out.push_str(&format!(
            "  {:<5} {} = {}",
            field.element.to_string(),
            field.field_type,
            value
        ));
    }
    if !output.rejected.is_empty() {
        let rejected: Vec<String> = output.rejected.iter().map(|el| el.to_string()).collect();
        out.push('\n');
        let label = if color {
            "Rejected:".red().to_string()
        } else {
            "Rejected:".to_string()
        };
        out.push_str(&format!("{} {}", label, rejected.join(", ")));
    }
    out
}

fn run_detect(args: DetectArgs, color: bool, config: &AtsfillConfig) -> Result<(), i32> {
    let page = load_snapshot(&args.snapshot).map_err(report_error)?;
    let registry = AdapterRegistry::with_defaults(&config.detection);
    let report = registry.detect(&page);
    let found = !report.is_empty();

    if args.json {
        print_json(&DetectionOutput::new(&page, report))?;
    } else {
        println!("{}", render_detection(&page, &report, color));
    }

    if args.strict && !found { Err(1) } else { Ok(()) }
}

fn value_source(args: &FillArgs) -> anyhow::Result<Box<dyn ValueSource>> {
    let mut values = FieldValues::from_assignments(&args.set)?;
    match &args.profile {
        Some(path) if values.is_empty() => {
            let profile = Profile::load(path)
                .with_context(|| format!("cannot load profile {}", path.display()))?;
            Ok(Box::new(profile))
        }
        Some(path) => {
            // explicit values override the profile
            let profile = Profile::load(path)
                .with_context(|| format!("cannot load profile {}", path.display()))?;
            for field_type in atsfill::FieldType::ALL {
                if values.value_for(field_type).is_none()
                    && let Some(value) = profile.value_for(field_type)
                {
                    values.insert(field_type, value);
                }
            }
            Ok(Box::new(values))
        }
        None => Ok(Box::new(values)),
    }
}

fn run_fill(args: FillArgs, color: bool, config: &AtsfillConfig) -> Result<(), i32> {
    let page = load_snapshot(&args.snapshot).map_err(report_error)?;
    let source = value_source(&args).map_err(report_error)?;
    let registry = AdapterRegistry::with_defaults(&config.detection);

    let report = registry.detect(&page);
    let mut filler = ProfileFiller::new(source);
    let summary: FillSummary = filler.fill(&page, &report);
    let filled = summary.filled;

    if let Some(path) = &args.write {
        let json = serde_json::to_string_pretty(&page.to_snapshot()).map_err(|e| {
            eprintln!("error: failed to serialize snapshot: {}", e);
            3
        })?;
        std::fs::write(path, json)
            .with_context(|| format!("cannot write {}", path.display()))
            .map_err(report_error)?;
    }

    let output = FillOutput::new(&page, &report, summary);
    if args.json {
        print_json(&output)?;
    } else {
        println!("{}", render_fill(&output, color));
    }

    if args.strict && filled == 0 { Err(1) } else { Ok(()) }
}

fn run_adapters(args: AdaptersArgs, config: &AtsfillConfig) -> Result<(), i32> {
    let names = AdapterRegistry::with_defaults(&config.detection).adapter_names();
    if args.json {
        return print_json(&names);
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn run_schema() -> Result<(), i32> {
    print_json(&schemars::schema_for!(DetectionOutput))
}

fn run_config(args: ConfigArgs, config: &AtsfillConfig) -> Result<(), i32> {
    let path = AtsfillConfig::config_file_path();
    if args.init {
        if let Some(path) = path.as_ref().filter(|p| p.exists()) {
            eprintln!("error: {} already exists", path.display());
            return Err(2);
        }
        return match AtsfillConfig::default().save() {
            Ok(Some(written)) => {
                println!("wrote {}", written.display());
                Ok(())
            }
            Ok(None) => {
                eprintln!("error: no configuration directory available");
                Err(2)
            }
            Err(e) => Err(report_error(e.into())),
        };
    }

    match &path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no configuration file"),
    }
    match toml::to_string_pretty(config) {
        Ok(content) => {
            print!("{}", content);
            Ok(())
        }
        Err(e) => {
            eprintln!("error: failed to serialize configuration: {}", e);
            Err(3)
        }
    }
}

fn main() {
    init_tracing();
    let color = detect_color_choice();
    let matches = Cli::command().color(color).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let config = match AtsfillConfig::load() {
        Ok(config) => config,
        Err(e) => std::process::exit(report_error(e.into())),
    };
    let choice = if cli.no_color { ColorChoice::Never } else { color };
    let use_color = want_color(choice, &config);

    let result = match cli.command {
        Some(Commands::Detect(args)) => run_detect(args, use_color, &config),
        Some(Commands::Fill(args)) => run_fill(args, use_color, &config),
        Some(Commands::Adapters(args)) => run_adapters(args, &config),
        Some(Commands::Schema) => run_schema(),
        Some(Commands::Config(args)) => run_config(args, &config),
        None => Ok(()),
    };
    if let Err(code) = result {
        std::process::exit(code);
    }
}
