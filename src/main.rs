use aipage::ai::GeminiClient;
use aipage::editor::{Direction, Editor};
use aipage::export::{self, CaptureParams, ChromeRasterizer};
use aipage::generate::{self, GenerateOptions};
use aipage::session::{DEFAULT_SESSION_DIR, Session};
use aipage::templates::{self, CategoryId};
use aipage::types::ProductInput;
use aipage::{builder, color, config, output, render};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const GENERATION_FAILED: &str = "생성 중 오류가 발생했습니다. 다시 시도해주세요.";
const IMAGE_EXPORT_FAILED: &str = "이미지 저장에 실패했습니다. 다시 시도해주세요.";

#[derive(Parser)]
#[command(name = "aipage")]
#[command(about = "AI product detail page generator")]
#[command(long_about = "\
AI product detail page generator

Describe a product and get a complete Korean e-commerce detail page: hero,
problem, solution, features, trust, details, reviews, and call to action.

Workflow:

  aipage generate --name \"Widget\" --features \"방수, 경량\" --category electronics
  aipage show                      # numbered section outline
  aipage show --section 0          # one section's fields
  aipage edit 0 hookingText \"새로운 헤드라인\"
  aipage style 0 backgroundColor \"#222222\"
  aipage move 3 up
  aipage undo
  aipage export-html
  aipage export-image --watermark

Copy and images come from Gemini when the key named by ai.api_key_env
(GEMINI_API_KEY by default) is set; otherwise placeholder content is used.

Run 'aipage gen-config' to generate a documented aipage.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding the generated page and edit history
    #[arg(long, default_value = DEFAULT_SESSION_DIR, global = true)]
    session_dir: PathBuf,

    /// Directory containing aipage.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Directory for exported files
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Short product description
    #[arg(long, default_value = "")]
    description: String,

    /// Comma separated feature keywords
    #[arg(long, default_value = "")]
    features: String,

    /// Competitor product page to analyze first
    #[arg(long, default_value = "")]
    competitor_url: String,

    /// Product photo (repeatable)
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Category template: beauty, health, fashion, electronics, food, lifestyle
    #[arg(long)]
    category: Option<CategoryId>,

    #[arg(long)]
    primary_color: Option<String>,

    #[arg(long)]
    secondary_color: Option<String>,

    #[arg(long)]
    background_color: Option<String>,

    #[arg(long)]
    font: Option<String>,

    /// Skip AI image generation
    #[arg(long)]
    no_images: bool,
}

impl GenerateArgs {
    fn has_color_overrides(&self) -> bool {
        self.primary_color.is_some()
            || self.secondary_color.is_some()
            || self.background_color.is_some()
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MoveDirection {
    Up,
    Down,
}

impl From<MoveDirection> for Direction {
    fn from(d: MoveDirection) -> Self {
        match d {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new page and start an editing session
    Generate(GenerateArgs),
    /// List category templates
    Templates,
    /// Show the section outline, or one section's fields
    Show {
        #[arg(long)]
        section: Option<usize>,
    },
    /// Select a section (affects preview highlighting)
    Select {
        index: Option<usize>,
    },
    /// Set a content field: `edit <index> <path> <value>` (e.g. `items.0.title`)
    Edit {
        index: usize,
        path: String,
        value: String,
    },
    /// Set a style field: backgroundColor, textColor, accentColor, fontFamily, padding
    Style {
        index: usize,
        field: String,
        value: String,
    },
    /// Delete a section
    Delete { index: usize },
    /// Move a section one position
    Move {
        index: usize,
        #[arg(value_enum)]
        direction: MoveDirection,
    },
    /// Undo the last edit
    Undo,
    /// Redo the last undone edit
    Redo,
    /// Write the editing preview (section labels, selection) as HTML
    Preview,
    /// Export the page as a standalone HTML file
    ExportHtml,
    /// Export the page as a PNG image
    ExportImage {
        /// Overlay the configured watermark and save as a sample
        #[arg(long)]
        watermark: bool,
    },
    /// Delete the editing session
    Discard,
    /// Print a stock aipage.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("AIPAGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let session = Session::new(&cli.session_dir);

    match cli.command {
        Command::Generate(args) => {
            let config = config::load_config(&cli.config_dir)?;
            let template = args.category.map(templates::get);

            let mut brand_guide = config.brand.to_brand_guide();
            if let Some(template) = template.filter(|_| !args.has_color_overrides()) {
                builder::apply_template_palette(&mut brand_guide, template);
            }
            for (value, target) in [
                (&args.primary_color, &mut brand_guide.primary_color),
                (&args.secondary_color, &mut brand_guide.secondary_color),
                (&args.background_color, &mut brand_guide.background_color),
            ] {
                if let Some(value) = value {
                    if !value.starts_with('#') || color::parse_hex(value).is_none() {
                        return Err(format!("invalid color '{value}' (expected #rgb or #rrggbb)").into());
                    }
                    *target = value.clone();
                }
            }
            if let Some(font) = &args.font {
                brand_guide.font_family = font.clone();
            }

            let input = ProductInput {
                product_name: args.name.clone(),
                description: args.description.clone(),
                features: args.features.clone(),
                competitor_url: args.competitor_url.clone(),
                images: args.images.clone(),
                brand_guide,
            };
            let client = GeminiClient::from_config(&config.ai);
            if !client.has_api_key() {
                println!(
                    "{} is not set; using placeholder content",
                    config.ai.api_key_env
                );
            }
            let options = GenerateOptions {
                generate_images: config.ai.generate_images && !args.no_images,
            };

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_generate_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let runtime = tokio::runtime::Runtime::new()?;
            let result = runtime.block_on(generate::generate_detail_page(
                &client,
                &input,
                template,
                options,
                Some(tx),
            ));
            printer.join().unwrap();

            match result {
                Ok(generated) => {
                    session.start(&generated.page)?;
                    println!();
                    output::print_generate_output(&generated);
                }
                Err(err) => {
                    warn!(error = %err, "generation failed");
                    eprintln!("{GENERATION_FAILED}");
                    std::process::exit(1);
                }
            }
        }
        Command::Templates => {
            output::print_templates(templates::all());
        }
        Command::Show { section } => {
            let editor = session.load_editor()?;
            match section {
                Some(index) => {
                    let section = editor.page().sections.get(index).ok_or_else(|| {
                        aipage::editor::EditError::SectionOutOfRange {
                            index,
                            len: editor.page().sections.len(),
                        }
                    })?;
                    output::print_section(index, section);
                }
                None => output::print_editor(&editor),
            }
        }
        Command::Select { index } => {
            edit_session(&session, |editor| editor.select(index))?;
        }
        Command::Edit { index, path, value } => {
            edit_session(&session, |editor| editor.edit_field(index, &path, &value))?;
        }
        Command::Style {
            index,
            field,
            value,
        } => {
            edit_session(&session, |editor| editor.edit_style(index, &field, &value))?;
        }
        Command::Delete { index } => {
            edit_session(&session, |editor| editor.delete_section(index))?;
        }
        Command::Move { index, direction } => {
            edit_session(&session, |editor| {
                if !editor.move_section(index, direction.into())? {
                    println!("Section {index} is already at the edge");
                }
                Ok(())
            })?;
        }
        Command::Undo => {
            edit_session(&session, |editor| {
                if !editor.undo() {
                    println!("Nothing to undo");
                }
                Ok(())
            })?;
        }
        Command::Redo => {
            edit_session(&session, |editor| {
                if !editor.redo() {
                    println!("Nothing to redo");
                }
                Ok(())
            })?;
        }
        Command::Preview => {
            let editor = session.load_editor()?;
            let page = editor.page();
            let mode = render::RenderMode::Edit {
                selected: editor.selected(),
            };
            std::fs::create_dir_all(&cli.output)?;
            let path = cli
                .output
                .join(export::file_name(&page.product_name, Some("preview"), "html"));
            std::fs::write(&path, render::render_document(page, mode).into_string())?;
            println!("Preview → {}", path.display());
        }
        Command::ExportHtml => {
            let editor = session.load_editor()?;
            let path = export::html::export_html(editor.page(), &cli.output)?;
            println!("Saved {}", path.display());
        }
        Command::ExportImage { watermark } => {
            let config = config::load_config(&cli.config_dir)?;
            let editor = session.load_editor()?;
            let params = CaptureParams::from_config(&config.export);
            let watermark = watermark.then_some(config.export.watermark_text.as_str());
            match export::image::export_image(
                editor.page(),
                &ChromeRasterizer::new(),
                &params,
                &cli.output,
                watermark,
            ) {
                Ok(path) => println!("Saved {}", path.display()),
                Err(err) => {
                    warn!(error = %err, "image export failed");
                    eprintln!("{IMAGE_EXPORT_FAILED}");
                    std::process::exit(1);
                }
            }
        }
        Command::Discard => {
            if session.discard()? {
                println!("Discarded {}", session.dir().display());
            } else {
                println!("No session at {}", session.dir().display());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the editor, apply `f`, save, and print the resulting outline.
///
/// Nothing is saved when `f` fails.
fn edit_session(
    session: &Session,
    f: impl FnOnce(&mut Editor) -> Result<(), aipage::editor::EditError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = session.load_editor()?;
    f(&mut editor)?;
    session.save_editor(&editor)?;
    output::print_editor(&editor);
    Ok(())
}
