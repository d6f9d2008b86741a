//! OG Image CLI - Design state from the command line
//!
//! Every command loads the persisted design, applies at most one mutation,
//! and prints JSON to stdout. Logs go to stderr.

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use ogimage_core::{
    has_template_inputs,
    logging::init_logging,
    model::parse_slug,
    render_state,
    templates::{TemplateEntry, TemplateSummary},
    AdvancedPatch, ContentPatch, ExportFormat, ExportPipeline, ExportTracker, ExtendedField,
    FileStorage, FontFamily, FontSize, InputForm, Layout, Persistence, Store, StudioConfig,
    StylePatch, TemplateCatalog, TemplateId,
};

#[derive(Parser)]
#[command(name = "ogimage-cli")]
#[command(about = "OG Image CLI - compose social preview images from templates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON config file
    #[arg(short, long, default_value = "ogimage.json")]
    config: PathBuf,

    /// Directory holding the persisted design (overrides config)
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Storage namespace key (overrides config)
    #[arg(long)]
    storage_key: Option<String>,

    /// Log level when RUST_LOG is unset (overrides config)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the template catalog
    Templates {
        /// Group by category
        #[arg(long)]
        by_category: bool,
    },

    /// Show the extra input fields of a template
    Fields {
        template: String,
    },

    /// Print the current design state
    Show,

    /// Merge content fields into the design
    SetContent {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// Extended field as key=value (e.g. episodeNumber="Ep. 4")
        #[arg(long = "field", value_parser = parse_field_assignment)]
        fields: Vec<(ExtendedField, String)>,
        /// Extended field to clear
        #[arg(long = "clear", value_parser = parse_value::<ExtendedField>)]
        clear: Vec<ExtendedField>,
    },

    /// Merge style colors into the design
    SetStyle {
        #[arg(long)]
        background: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        accent: Option<String>,
    },

    /// Merge advanced options into the design
    SetAdvanced {
        #[arg(long, value_parser = parse_value::<FontFamily>)]
        font_family: Option<FontFamily>,
        #[arg(long, value_parser = parse_value::<FontSize>)]
        font_size: Option<FontSize>,
        #[arg(long, value_parser = parse_value::<Layout>)]
        layout: Option<Layout>,
    },

    /// Switch template and apply its style preset
    LoadTemplate {
        template: String,
    },

    /// Restore every field to its default
    Reset,

    /// Print the rendered scene of the current design
    Render,

    /// Export the current design as an image
    Export {
        #[arg(short, long, default_value = "svg", value_parser = parse_value::<ExportFormat>)]
        format: ExportFormat,

        /// Write the image here instead of printing base64
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn parse_value<T: DeserializeOwned>(s: &str) -> Result<T, String> {
    parse_slug(s).ok_or_else(|| format!("unrecognized value: {s}"))
}

fn parse_field_assignment(s: &str) -> Result<(ExtendedField, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got: {s}"))?;
    let field = ExtendedField::from_key(key).ok_or_else(|| format!("unknown field: {key}"))?;
    Ok((field, value.to_string()))
}

fn print_json(value: &impl serde::Serialize) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", serde_json::json!({ "success": false, "error": e.to_string() }));
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match StudioConfig::load(Some(&cli.config)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
            return ExitCode::FAILURE;
        }
    };
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.storage_key {
        config.storage_key = key;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_logging(&config.log_level);

    let catalog = TemplateCatalog::new();
    let persistence = Persistence::with_key(FileStorage::new(&config.storage_dir), config.storage_key.clone());
    let mut store = Store::with_persistence(persistence);

    match cli.command {
        Commands::Templates { by_category } => {
            let summarize =
                |entry: &TemplateEntry| TemplateSummary::new(entry, &config.preview_base_url);

            if by_category {
                let groups: BTreeMap<&str, Vec<TemplateSummary>> = catalog
                    .group_by_category()
                    .into_iter()
                    .map(|(category, entries)| {
                        let entries: Vec<_> = entries.into_iter().map(summarize).collect();
                        (category.label(), entries)
                    })
                    .collect();
                print_json(&groups)
            } else {
                let entries: Vec<_> = catalog.list().iter().map(summarize).collect();
                print_json(&entries)
            }
        }

        Commands::Fields { template } => {
            let Some(id) = TemplateId::parse(&template) else {
                println!("{}", serde_json::json!({ "success": false, "error": format!("unknown template: {template}") }));
                return ExitCode::from(2);
            };
            let fields: Vec<_> = InputForm::for_template(id)
                .map(|form| form.bind(&store.state().content))
                .unwrap_or_default();
            print_json(&serde_json::json!({
                "template": id,
                "hasInputs": has_template_inputs(id),
                "fields": fields,
            }))
        }

        Commands::Show => print_json(store.state()),

        Commands::SetContent { title, description, icon, fields, clear } => {
            let mut patch = ContentPatch {
                title,
                description,
                icon,
                ..ContentPatch::default()
            };
            for (field, value) in fields {
                patch = patch.field(field, value);
            }
            for field in clear {
                patch = patch.clear(field);
            }
            store.set_content(patch);
            print_json(&store.state().content)
        }

        Commands::SetStyle { background, text, accent } => {
            store.set_style(StylePatch {
                template: None,
                background_color: background,
                text_color: text,
                accent_color: accent,
            });
            print_json(&store.state().style)
        }

        Commands::SetAdvanced { font_family, font_size, layout } => {
            store.set_advanced(AdvancedPatch { font_family, font_size, layout });
            print_json(&store.state().advanced)
        }

        Commands::LoadTemplate { template } => {
            store.load_template_slug(&template);
            print_json(&serde_json::json!({
                "style": store.state().style,
                "advanced": store.state().advanced,
            }))
        }

        Commands::Reset => {
            store.reset();
            print_json(store.state())
        }

        Commands::Render => print_json(&render_state(store.state())),

        Commands::Export { format, out } => {
            let pipeline = ExportPipeline::new();
            let mut tracker = ExportTracker::new();

            let Some(image) = tracker.run(&mut store, &pipeline, format) else {
                let error = store.state().ui.error.clone().unwrap_or_default();
                println!("{}", serde_json::json!({ "success": false, "error": error }));
                return ExitCode::from(2);
            };

            if let Some(path) = out {
                let written = image
                    .bytes()
                    .map_err(|e| e.to_string())
                    .and_then(|bytes| fs::write(&path, bytes).map_err(|e| e.to_string()));
                if let Err(e) = written {
                    println!("{}", serde_json::json!({ "success": false, "error": e }));
                    return ExitCode::FAILURE;
                }
                print_json(&serde_json::json!({
                    "success": true,
                    "path": path,
                    "id": image.id,
                    "designHash": image.design_hash,
                }))
            } else {
                print_json(&serde_json::json!({ "success": true, "image": image }))
            }
        }
    }
}
