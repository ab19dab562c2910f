//! grimoire-pdf CLI - PDF synthesis tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use grimoire_pdf::render::{to_json, to_text};
use grimoire_pdf::{DocumentRequest, JsonFormat, LayoutOptions, PageSize, PdfBytes, Synthesizer};

#[derive(Parser)]
#[command(name = "grimoire-pdf")]
#[command(author = "Templo do Abismo")]
#[command(version)]
#[command(about = "Synthesize minimal PDFs from HTML grimoires", long_about = None)]
struct Cli {
    /// Input HTML or JSON request file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a PDF from an HTML file or a JSON request
    Build {
        /// Input HTML or JSON request file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (derived from the title if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        request: RequestArgs,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Build PDFs for many JSON requests
    Batch {
        /// Input JSON request files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show how a document will be paginated
    Preview {
        /// Input HTML or JSON request file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        #[command(flatten)]
        request: RequestArgs,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Check the xref table, stream lengths and page tree of a PDF
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

/// Environment variable that supplies the author line.
const AUTHOR_ENV: &str = "GRIMOIRE_AUTHOR";

#[derive(Args, Default)]
struct RequestArgs {
    /// Treat the input as a JSON document request
    #[arg(long)]
    json_request: bool,

    /// Document title (defaults to the file name for HTML input)
    #[arg(long)]
    title: Option<String>,

    /// Author line
    #[arg(long, env = AUTHOR_ENV)]
    author: Option<String>,
}

#[derive(Args)]
struct LayoutArgs {
    /// Maximum lines per page
    #[arg(long, default_value_t = grimoire_pdf::DEFAULT_MAX_LINES_PER_PAGE)]
    lines: usize,

    /// Maximum characters per line
    #[arg(long, default_value_t = grimoire_pdf::DEFAULT_MAX_LINE_WIDTH)]
    width: usize,

    /// Page size
    #[arg(long, value_enum, default_value = "letter")]
    page_size: PageSizeArg,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSizeArg {
    /// US Letter (612 x 792 pt)
    Letter,
    /// ISO A4 (595 x 842 pt)
    A4,
}

impl RequestArgs {
    /// Arguments for the bare `grimoire-pdf <FILE>` form, which has no flags
    /// of its own but still honors the author variable.
    fn from_env() -> Self {
        Self {
            author: std::env::var(AUTHOR_ENV).ok().filter(|a| !a.is_empty()),
            ..Self::default()
        }
    }
}

impl From<PageSizeArg> for PageSize {
    fn from(size: PageSizeArg) -> Self {
        match size {
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::A4 => PageSize::A4,
        }
    }
}

impl LayoutArgs {
    fn synthesizer(&self) -> Synthesizer {
        Synthesizer::new().with_layout(
            LayoutOptions::new()
                .with_max_lines(self.lines)
                .with_line_width(self.width)
                .with_page_size(self.page_size.into()),
        )
    }
}

impl Default for LayoutArgs {
    fn default() -> Self {
        Self {
            lines: grimoire_pdf::DEFAULT_MAX_LINES_PER_PAGE,
            width: grimoire_pdf::DEFAULT_MAX_LINE_WIDTH,
            page_size: PageSizeArg::Letter,
        }
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            input,
            output,
            request,
            layout,
        }) => cmd_build(&input, output.as_deref(), &request, &layout),
        Some(Commands::Batch {
            inputs,
            output,
            layout,
        }) => cmd_batch(&inputs, output.as_deref(), &layout),
        Some(Commands::Preview {
            input,
            output,
            json,
            compact,
            request,
            layout,
        }) => cmd_preview(&input, output.as_deref(), json, compact, &request, &layout),
        Some(Commands::Inspect { input, json }) => cmd_inspect(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: build if input is provided
            if let Some(input) = cli.input {
                cmd_build(
                    &input,
                    cli.output.as_deref(),
                    &RequestArgs::from_env(),
                    &LayoutArgs::default(),
                )
            } else {
                println!("{}", "Usage: grimoire-pdf <FILE> [OUTPUT]".yellow());
                println!("       grimoire-pdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load a document request from an HTML file or a JSON request file.
///
/// JSON is used when asked for or when the file ends in `.json`; command
/// line title and author override the file's.
fn load_request(
    input: &Path,
    args: &RequestArgs,
) -> Result<DocumentRequest, Box<dyn std::error::Error>> {
    let source = fs::read_to_string(input)?;
    let is_json = args.json_request
        || input
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let mut request = if is_json {
        DocumentRequest::from_json(&source)?
    } else {
        let title = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string());
        DocumentRequest::new(title, source)
    };

    if let Some(ref title) = args.title {
        request.title = title.clone();
    }
    if let Some(ref author) = args.author {
        request.author = Some(author.clone());
    }

    log::debug!("Loaded request {:?} from {}", request.title, input.display());
    Ok(request)
}

fn cmd_build(
    input: &Path,
    output: Option<&Path>,
    request_args: &RequestArgs,
    layout: &LayoutArgs,
) -> CmdResult {
    let request = load_request(input, request_args)?;
    let pdf = layout.synthesizer().synthesize(&request)?;

    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(request.suggested_filename()));
    pdf.write_to(&path)?;

    print_summary(&path, &pdf);
    Ok(())
}

fn cmd_batch(inputs: &[PathBuf], output: Option<&Path>, layout: &LayoutArgs) -> CmdResult {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let synthesizer = layout.synthesizer();
    let request_args = RequestArgs {
        json_request: true,
        ..RequestArgs::from_env()
    };

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut failures = 0;
    for input in inputs {
        pb.set_message(input.display().to_string());

        let result = load_request(input, &request_args).and_then(|request| {
            let pdf = synthesizer.synthesize(&request)?;
            pdf.write_to(output_dir.join(request.suggested_filename()))?;
            Ok(())
        });

        if let Err(e) = result {
            failures += 1;
            pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    let built = inputs.len() - failures;
    println!(
        "\n{} {} built, {} failed",
        "Batch complete:".green().bold(),
        built,
        failures
    );

    if failures > 0 {
        return Err(format!("{} of {} requests failed", failures, inputs.len()).into());
    }
    Ok(())
}

fn cmd_preview(
    input: &Path,
    output: Option<&Path>,
    json: bool,
    compact: bool,
    request_args: &RequestArgs,
    layout: &LayoutArgs,
) -> CmdResult {
    let request = load_request(input, request_args)?;
    let doc = layout.synthesizer().paginate(&request);

    let rendered = if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        to_json(&doc, format)?
    } else {
        to_text(&doc)
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_inspect(input: &Path, json: bool) -> CmdResult {
    let report = grimoire_pdf::verify::verify_file(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Document Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), report.version);
    println!("{}: {}", "Objects".bold(), report.object_count);
    println!("{}: {}", "Pages".bold(), report.page_count);
    println!("{}: {}", "Xref offset".bold(), report.xref_offset);

    println!();
    println!("{}", "Content Streams".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for stream in &report.streams {
        println!("  {} {} bytes", format!("{} 0 obj", stream.object).dimmed(), stream.length);
    }

    println!("\n{}", "All offsets and lengths verified".green().bold());
    Ok(())
}

fn print_summary(path: &Path, pdf: &PdfBytes) {
    println!("{} {}", "Saved to".green(), path.display());
    println!(
        "  {} {} pages, {} bytes ({})",
        "└─".dimmed(),
        pdf.page_count(),
        pdf.len(),
        PdfBytes::MIME_TYPE
    );
}

fn cmd_version() {
    println!("{} {}", "grimoire-pdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Minimal PDF synthesis for HTML grimoires");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_html_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("liber-umbrarum.html");
        fs::write(&path, "<p>Texto</p>").unwrap();

        let request = load_request(&path, &RequestArgs::default()).unwrap();
        assert_eq!(request.title, "liber-umbrarum");
        assert_eq!(request.content, "<p>Texto</p>");
        assert_eq!(request.author(), grimoire_pdf::DEFAULT_AUTHOR);
    }

    #[test]
    fn test_load_json_request_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, r#"{"title": "Liber", "content": "<p>x</p>"}"#).unwrap();

        let args = RequestArgs {
            author: Some("Soror A.".to_string()),
            ..RequestArgs::default()
        };
        let request = load_request(&path, &args).unwrap();
        assert_eq!(request.title, "Liber");
        assert_eq!(request.author(), "Soror A.");
    }

    #[test]
    fn test_bare_form_reads_author_env() {
        std::env::set_var(AUTHOR_ENV, "Frater V.");
        let args = RequestArgs::from_env();
        std::env::remove_var(AUTHOR_ENV);

        assert_eq!(args.author.as_deref(), Some("Frater V."));
        assert!(args.title.is_none());
        assert!(!args.json_request);
    }

    #[test]
    fn test_layout_args_synthesizer() {
        let args = LayoutArgs {
            lines: 20,
            width: 60,
            page_size: PageSizeArg::A4,
        };
        let layout = args.synthesizer().layout().clone();
        assert_eq!(layout.max_lines_per_page, 20);
        assert_eq!(layout.max_line_width, 60);
        assert_eq!(layout.page_size, PageSize::A4);
    }

    #[test]
    fn test_build_writes_verified_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.html");
        let output = dir.path().join("out.pdf");
        fs::write(&input, "<h1>A</h1><p>b</p>").unwrap();

        cmd_build(&input, Some(&output), &RequestArgs::default(), &LayoutArgs::default()).unwrap();

        let report = grimoire_pdf::verify::verify_file(&output).unwrap();
        assert_eq!(report.page_count, 1);
    }
}
