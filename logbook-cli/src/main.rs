// Command-line interface for Logbook article content
//
// This binary exposes the logbook-babel library to the shell: rendering
// article Markdown the way the public page does, converting between the
// registered formats, checking and uploading images, and managing the
// article store on disk.
//
// Configuration comes from the embedded defaults, then `logbook.toml` in the
// working directory if present, then the file given with --config, then
// LOGBOOK_* environment variables (e.g. LOGBOOK_UPLOAD__ENDPOINT). Flags
// override all of them.
//
// Usage:
//  logbook render <input> [--variant standard|display] [--standalone] [-o FILE]
//  logbook convert <input> --to <format> [--from <format>] [-o FILE]
//  logbook font-split <text>
//  logbook check-image <path> [--mime TYPE]
//  logbook upload <path> [--endpoint URL] [--type KIND] [--alt TEXT]
//  logbook article list|show <slug>|save <json>|delete <slug> [--store DIR]
//
// Log output goes to stderr and is controlled with RUST_LOG (default: warn).

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use logbook_babel::assets::{mime_from_extension, HttpUploader, UploadFile, UploadOutcome};
use logbook_babel::fonts::{font_split_html, FontStyles};
use logbook_babel::{
    slugify, AdminToken, Article, AssetKind, AssetModal, ContentStore, FileContentStore,
    FormatRegistry, HtmlOptions, RenderVariant, UploadPolicy,
};
use logbook_config::{LogbookConfig, Loader};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("logbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render, convert and manage Logbook articles")
        .long_about(
            "logbook works with the Markdown articles behind the Logbook site.\n\n\
            Commands:\n  \
            - render:      Render article Markdown to display HTML\n  \
            - convert:     Convert between markdown, html, tree and json\n  \
            - font-split:  Show the display-font split for heading text\n  \
            - check-image: Check an image against the upload limits\n  \
            - upload:      Upload an image and print its Markdown snippet\n  \
            - article:     List, show, save and delete stored articles\n\n\
            Examples:\n  \
            logbook render post.md                     # Display HTML to stdout\n  \
            logbook render post.md --standalone -o p.html\n  \
            logbook convert draft.html --to markdown   # Editing surface to Markdown\n  \
            logbook article list --store content/articles",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a logbook.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render article Markdown to HTML")
                .arg(
                    Arg::new("input")
                        .help("Markdown file to render")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("variant")
                        .long("variant")
                        .help("Rendering rule set (defaults to the configured variant)")
                        .value_parser(["standard", "display"]),
                )
                .arg(
                    Arg::new("standalone")
                        .long("standalone")
                        .help("Wrap the markup in a complete HTML document")
                        .action(ArgAction::SetTrue),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats")
                .long_about(
                    "Convert documents between the registered formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Canonical article Markdown (.md)\n  \
                    - html:     Display markup; parsing reads editing-surface markup (.html)\n  \
                    - tree:     Tree visualization, output only (.tree)\n  \
                    - json:     Serialized document tree (.json)\n\n\
                    The source format is auto-detected from the file extension.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("font-split")
                .about("Print the display-font spans for a piece of heading text")
                .arg(
                    Arg::new("text")
                        .help("Heading text")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("check-image")
                .about("Check an image file against the upload size and type limits")
                .arg(
                    Arg::new("path")
                        .help("Image file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(mime_arg()),
        )
        .subcommand(
            Command::new("upload")
                .about("Upload an image and print the Markdown that embeds it")
                .arg(
                    Arg::new("path")
                        .help("Image file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("endpoint")
                        .long("endpoint")
                        .value_name("URL")
                        .help("Upload endpoint (defaults to upload.endpoint)")
                        .value_hint(ValueHint::Url),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_name("KIND")
                        .help("Value sent in the `type` form field (defaults to upload.type)"),
                )
                .arg(
                    Arg::new("alt")
                        .long("alt")
                        .value_name("TEXT")
                        .help("Alt text for the image"),
                )
                .arg(mime_arg()),
        )
        .subcommand(
            Command::new("article")
                .about("Manage stored articles")
                .subcommand_required(true)
                .arg(
                    Arg::new("store")
                        .long("store")
                        .value_name("DIR")
                        .help("Article directory (defaults to store.content_dir)")
                        .value_hint(ValueHint::DirPath)
                        .global(true),
                )
                .subcommand(Command::new("list").about("List articles, newest first"))
                .subcommand(
                    Command::new("show")
                        .about("Print an article as JSON")
                        .arg(slug_arg()),
                )
                .subcommand(
                    Command::new("save")
                        .about("Create or replace an article from a JSON file")
                        .arg(
                            Arg::new("json")
                                .help("Article JSON file")
                                .required(true)
                                .index(1)
                                .value_hint(ValueHint::FilePath),
                        ),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete an article")
                        .arg(slug_arg()),
                ),
        )
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn mime_arg() -> Arg {
    Arg::new("mime")
        .long("mime")
        .value_name("TYPE")
        .help("MIME type (guessed from the file extension if not specified)")
}

fn slug_arg() -> Arg {
    Arg::new("slug")
        .help("Article slug")
        .required(true)
        .index(1)
}

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();
    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("render", sub_matches)) => handle_render_command(sub_matches, &config),
        Some(("convert", sub_matches)) => handle_convert_command(sub_matches, &config),
        Some(("font-split", sub_matches)) => {
            let text = sub_matches
                .get_one::<String>("text")
                .expect("text is required");
            println!("{}", font_split_html(text, &FontStyles::from(&config.render)));
        }
        Some(("check-image", sub_matches)) => handle_check_image_command(sub_matches, &config),
        Some(("upload", sub_matches)) => handle_upload_command(sub_matches, &config),
        Some(("article", sub_matches)) => handle_article_command(sub_matches, &config),
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_cli_config(explicit_path: Option<&str>) -> LogbookConfig {
    let loader = Loader::new().with_optional_file("logbook.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .with_env()
        .build()
        .unwrap_or_else(|err| fail(&format!("Failed to load configuration: {err}")))
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches, config: &LogbookConfig) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let source = read_input(input);

    let mut options = HtmlOptions::from(&config.render);
    if let Some(variant) = matches.get_one::<String>("variant") {
        options.variant = variant
            .parse::<RenderVariant>()
            .unwrap_or_else(|e| fail(&format!("Error: {e}")));
    }

    let html = if matches.get_flag("standalone") {
        let registry = FormatRegistry::with_html_options(options);
        let doc = registry
            .parse(&source, "markdown")
            .unwrap_or_else(|e| fail(&format!("Parse error: {e}")));
        let mut params = HashMap::new();
        params.insert("standalone".to_string(), "true".to_string());
        params.insert("title".to_string(), document_title(input));
        registry
            .serialize_with_options(&doc, "html", &params)
            .unwrap_or_else(|e| fail(&format!("Serialization error: {e}")))
    } else {
        logbook_babel::render_markdown(&source, &options)
    };

    write_output(matches.get_one::<String>("output").map(|s| s.as_str()), &html);
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &LogbookConfig) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let to = matches.get_one::<String>("to").expect("to is required");
    let registry = FormatRegistry::with_html_options(HtmlOptions::from(&config.render));

    let from = match matches.get_one::<String>("from") {
        Some(from) => from.to_string(),
        None => registry
            .detect_format_from_filename(input)
            .unwrap_or_else(|| {
                fail(&format!(
                    "Error: Could not detect format from filename '{input}'\n\
                     Please specify --from explicitly"
                ))
            }),
    };

    for name in [from.as_str(), to.as_str()] {
        if let Err(e) = registry.get(name) {
            fail(&format!("Error: {e}"));
        }
    }

    let source = read_input(input);
    tracing::debug!(input, from = %from, to = %to, "Converting");
    let output = registry
        .convert(&source, &from, to, &HashMap::new())
        .unwrap_or_else(|e| fail(&format!("Conversion error: {e}")));

    write_output(matches.get_one::<String>("output").map(|s| s.as_str()), &output);
}

/// Handle the check-image command
fn handle_check_image_command(matches: &ArgMatches, config: &LogbookConfig) {
    let path = matches.get_one::<String>("path").expect("path is required");
    let size = fs::metadata(path)
        .map(|meta| meta.len())
        .unwrap_or_else(|e| fail(&format!("Error reading file '{path}': {e}")));
    let mime = resolve_mime(matches, path);

    let policy = UploadPolicy::from(&config.upload);
    match policy.validate_file(size, &mime) {
        Ok(()) => println!("{path}: ok ({size} bytes, {mime})"),
        Err(e) => fail(&format!("{path}: {e}")),
    }
}

/// Handle the upload command
fn handle_upload_command(matches: &ArgMatches, config: &LogbookConfig) {
    let path = matches.get_one::<String>("path").expect("path is required");
    let endpoint = matches
        .get_one::<String>("endpoint")
        .map(|s| s.as_str())
        .or_else(|| config.upload.endpoint())
        .unwrap_or_else(|| {
            fail("Error: No upload endpoint. Pass --endpoint or set upload.endpoint.")
        });
    let upload_type = matches
        .get_one::<String>("type")
        .cloned()
        .unwrap_or_else(|| config.upload.upload_type.clone());
    let alt = matches.get_one::<String>("alt").map(|s| s.as_str()).unwrap_or("");

    let uploader = HttpUploader::new(endpoint, upload_type)
        .unwrap_or_else(|e| fail(&format!("Error: {e}")));
    let bytes = fs::read(path).unwrap_or_else(|e| fail(&format!("Error reading file '{path}': {e}")));
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let file = UploadFile::new(name, resolve_mime(matches, path), bytes);

    let mut modal = AssetModal::new(AssetKind::Image);
    modal.open();
    modal.set_label(alt);
    let outcome = modal
        .upload_with(&uploader, &file, &UploadPolicy::from(&config.upload))
        .unwrap_or_else(|e| fail(&format!("{path}: {e}")));

    match outcome {
        UploadOutcome::Completed(request) => println!("{}", request.to_markdown()),
        UploadOutcome::Failed => fail(modal.error().unwrap_or("Upload failed.")),
        UploadOutcome::Discarded => fail("Upload was cancelled."),
    }
}

/// Handle the article subcommands
fn handle_article_command(matches: &ArgMatches, config: &LogbookConfig) {
    let root = matches
        .get_one::<String>("store")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.store.content_dir.clone());
    let mut store = FileContentStore::new(root);
    let token = AdminToken::from_authenticated_session("cli");

    match matches.subcommand() {
        Some(("list", _)) => {
            let articles = store
                .list()
                .unwrap_or_else(|e| fail(&format!("Error: {e}")));
            for article in articles {
                let status = if article.published { "published" } else { "draft" };
                println!("{}\t{}\t{}\t{}", article.date, article.slug, status, article.title);
            }
        }
        Some(("show", sub_matches)) => {
            let slug = sub_matches
                .get_one::<String>("slug")
                .expect("slug is required");
            let article = store
                .get(slug)
                .unwrap_or_else(|e| fail(&format!("Error: {e}")));
            let json = serde_json::to_string_pretty(&article)
                .unwrap_or_else(|e| fail(&format!("Error: {e}")));
            println!("{json}");
        }
        Some(("save", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("json")
                .expect("json is required");
            let mut article: Article = serde_json::from_str(&read_input(path))
                .unwrap_or_else(|e| fail(&format!("Error parsing '{path}': {e}")));
            if article.slug.is_empty() {
                article.slug = slugify(&article.title);
            }
            store
                .upsert(&token, &article)
                .unwrap_or_else(|e| fail(&format!("Error: {e}")));
            println!("Saved {}", article.slug);
        }
        Some(("delete", sub_matches)) => {
            let slug = sub_matches
                .get_one::<String>("slug")
                .expect("slug is required");
            store
                .delete(&token, slug)
                .unwrap_or_else(|e| fail(&format!("Error: {e}")));
            println!("Deleted {slug}");
        }
        _ => fail("Unknown article command. Use --help for usage information."),
    }
}

fn resolve_mime(matches: &ArgMatches, path: &str) -> String {
    match matches.get_one::<String>("mime") {
        Some(mime) => mime.clone(),
        None => mime_from_extension(path)
            .map(str::to_string)
            .unwrap_or_else(|| {
                fail(&format!(
                    "Error: Could not detect the type of '{path}'. Pass --mime explicitly."
                ))
            }),
    }
}

fn document_title(input: &str) -> String {
    Path::new(input)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Article".to_string())
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| fail(&format!("Error reading file '{path}': {e}")))
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => fs::write(path, text)
            .unwrap_or_else(|e| fail(&format!("Error writing file '{path}': {e}"))),
        None => println!("{text}"),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
