use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use widget_codegen::{
    generate_dir, BatchReport, CodeGenerator, GeneratorOptions, GlanceGenerator, SvelteGenerator,
    SwiftUIGenerator,
};
use widget_core::WidgetLayout;
use widget_html::data::{sample_data, select_sample};
use widget_html::{
    generate_samples, HtmlRenderer, RenderOptions, SampleSet, WidgetData, WidgetDimensions,
};

#[derive(Parser, Debug)]
#[command(name = "widgetc", version, about = "Compile JSON widget layouts")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate Kotlin Glance composables for every layout in a directory.
    Glance(GlanceArgs),
    /// Generate Svelte Native components.
    Svelte(BatchArgs),
    /// Generate SwiftUI widget views.
    Swift(BatchArgs),
    /// Render a layout to a static HTML preview.
    Preview(PreviewArgs),
    /// Print default/hot/storm sample data for a layout.
    Samples(SamplesArgs),
}

#[derive(Parser, Debug)]
struct GlanceArgs {
    /// Directory of layout JSON files.
    layouts: PathBuf,
    /// Output directory.
    out: PathBuf,
    /// Generator options JSON.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Kotlin package of generated files.
    #[arg(long)]
    package: Option<String>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory of layout JSON files.
    layouts: PathBuf,
    /// Output directory.
    out: PathBuf,
    /// Only generate this widget (file name without `.json`).
    widget: Option<String>,
    /// Generator options JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Layout JSON file.
    layout: PathBuf,
    /// Widget data JSON, or a samples file.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Sample set to use.
    #[arg(long, value_enum)]
    set: Option<SetArg>,
    /// Widget width; defaults to the first supported size.
    #[arg(long, requires = "height")]
    width: Option<f64>,
    #[arg(long, requires = "width")]
    height: Option<f64>,
    /// Emit only the widget fragment, not a full page.
    #[arg(long, default_value_t = false)]
    fragment: bool,
    /// Page background image.
    #[arg(long)]
    background: Option<String>,
    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SamplesArgs {
    /// Layout JSON file.
    layout: PathBuf,
    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SetArg {
    Default,
    Hot,
    Storm,
}

impl From<SetArg> for SampleSet {
    fn from(set: SetArg) -> Self {
        match set {
            SetArg::Default => SampleSet::Default,
            SetArg::Hot => SampleSet::Hot,
            SetArg::Storm => SampleSet::Storm,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Glance(args) => cmd_glance(args),
        Command::Svelte(args) => cmd_svelte(args),
        Command::Swift(args) => cmd_swift(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Samples(args) => cmd_samples(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(config: Option<&Path>) -> anyhow::Result<GeneratorOptions> {
    let Some(path) = config else {
        return Ok(GeneratorOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config '{}'", path.display()))
}

fn cmd_glance(args: GlanceArgs) -> anyhow::Result<()> {
    let mut options = load_options(args.config.as_deref())?;
    if let Some(package) = args.package {
        options.package = package;
    }
    let generator = GlanceGenerator::with_options(options)?;
    run_batch(&generator, &args.layouts, &args.out, None)
}

fn cmd_svelte(args: BatchArgs) -> anyhow::Result<()> {
    let options = load_options(args.config.as_deref())?;
    let generator = SvelteGenerator::with_options(options)?;
    run_batch(&generator, &args.layouts, &args.out, args.widget.as_deref())
}

fn cmd_swift(args: BatchArgs) -> anyhow::Result<()> {
    let options = load_options(args.config.as_deref())?;
    let generator = SwiftUIGenerator::with_options(options)?;
    run_batch(&generator, &args.layouts, &args.out, args.widget.as_deref())
}

fn run_batch(
    generator: &dyn CodeGenerator,
    layouts: &Path,
    out: &Path,
    only: Option<&str>,
) -> anyhow::Result<()> {
    let report = generate_dir(generator, layouts, out, only)
        .with_context(|| format!("generate from '{}'", layouts.display()))?;
    print_report(generator.framework_name(), out, &report);
    report.into_result()?;
    Ok(())
}

fn print_report(framework: &str, out: &Path, report: &BatchReport) {
    for (input, error) in &report.failed {
        eprintln!("failed {}: {error}", input.display());
    }
    eprintln!(
        "{framework}: generated {} of {} widgets ({} warnings) into {}",
        report.written.len(),
        report.total(),
        report.warnings,
        out.display()
    );
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let layout = WidgetLayout::from_path(&args.layout)?;
    let set = args.set.map(SampleSet::from);

    let data = match (&args.data, set) {
        (Some(path), set) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read data '{}'", path.display()))?;
            let json = serde_json::from_str(&text)
                .with_context(|| format!("parse data '{}'", path.display()))?;
            widget_core::Value::from(select_sample(json, set.unwrap_or_default()))
        }
        (None, Some(set)) => widget_core::Value::from(sample_data(&layout, set)),
        (None, None) => WidgetData::preview().to_value(),
    };

    let options = RenderOptions {
        size: args
            .width
            .zip(args.height)
            .map(|(w, h)| WidgetDimensions::new(w, h)),
        background_image: args.background,
        ..RenderOptions::default()
    };
    let renderer = HtmlRenderer::new(options)?;
    let rendered = if args.fragment {
        renderer.render(&layout, &data)
    } else {
        renderer.render_page(&layout, &data)?
    };
    if !rendered.warnings.is_empty() {
        eprintln!("{}: {} warnings", layout.name, rendered.warnings.len());
    }
    write_output(args.out.as_deref(), &rendered.html)
}

fn cmd_samples(args: SamplesArgs) -> anyhow::Result<()> {
    let layout = WidgetLayout::from_path(&args.layout)?;
    let samples = generate_samples(&layout);
    let text = serde_json::to_string_pretty(&samples)?;
    write_output(args.out.as_deref(), &text)
}

fn write_output(out: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
