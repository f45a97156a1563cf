use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use tubeboost_core::{
    Backend, extract_metadata, fallback, format_result_readable, render_preview,
    request_remote_thumbnail, try_generate,
};

/// CLI wrapper for Backend enum (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliBackend {
    #[default]
    Remote,
    Local,
}

impl From<CliBackend> for Backend {
    fn from(cli: CliBackend) -> Self {
        match cli {
            CliBackend::Remote => Backend::Remote,
            CliBackend::Local => Backend::Local,
        }
    }
}

#[derive(Parser)]
#[command(name = "tubeboost")]
#[command(
    about = "Analyze a video URL and generate SEO tags, description, timestamps, titles and thumbnail concepts with AI"
)]
struct Cli {
    /// Video URL
    url: String,

    /// Output language for generated copy (e.g. "English", "Spanish")
    #[arg(short, long, default_value = "English")]
    lang: String,

    /// Model backend: OpenAI cloud or a local Ollama server
    #[arg(short, long, default_value = "remote")]
    backend: CliBackend,

    /// Model identifier (defaults: gpt-4o remote, llama3.1 local)
    #[arg(short, long)]
    model: Option<String>,

    /// Where to save the local thumbnail preview
    #[arg(long, default_value = "thumbnail_preview.png")]
    thumbnail: PathBuf,

    /// Skip thumbnail generation entirely
    #[arg(long)]
    no_thumbnail: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let backend: Backend = cli.backend.into();
    let model = cli
        .model
        .unwrap_or_else(|| backend.default_model().to_string());

    println!(
        "\n{}  {}\n",
        style("tubeboost").cyan().bold(),
        style("Video SEO Analyzer").dim()
    );

    // Step 1: metadata + transcript
    let spinner = create_spinner("Fetching video metadata...");
    let video = match extract_metadata(&cli.url).await {
        Ok(video) => {
            spinner.finish_with_message(format!(
                "{} Metadata: {}",
                style("✓").green().bold(),
                style(&video.title).dim()
            ));
            video
        }
        Err(err) => {
            spinner.finish_and_clear();
            eprintln!("{} {}", style("Error:").red().bold(), err);
            std::process::exit(1);
        }
    };

    if video.transcript_text.is_empty() {
        println!(
            "{} No transcript available, analysis will use metadata only",
            style("!").yellow().bold()
        );
    } else {
        println!(
            "{} Transcript: {} chars",
            style("✓").green().bold(),
            video.transcript_text.chars().count()
        );
    }

    // Step 2: generate the SEO plan (single attempt, fallback on failure)
    let spinner = create_spinner(&format!(
        "Generating {} SEO plan with {} ({})...",
        cli.lang,
        model,
        backend.name()
    ));
    let result = match try_generate(&video, &cli.lang, backend, &model).await {
        Ok(result) => {
            spinner.finish_with_message(format!(
                "{} SEO plan generated ({})",
                style("✓").green().bold(),
                backend.name()
            ));
            result
        }
        Err(err) => {
            spinner.finish_with_message(format!(
                "{} Generation failed: {}",
                style("!").yellow().bold(),
                err
            ));
            println!(
                "{} Using deterministic fallback output",
                style("!").yellow().bold()
            );
            fallback(&video, &cli.lang)
        }
    };

    // Step 3: thumbnail (remote image service is best-effort, then local)
    if !cli.no_thumbnail {
        if let Some(concept) = result.thumbnails.thumbnail_concepts.first() {
            let mut remote_url = None;
            if backend == Backend::Remote {
                if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                    let spinner = create_spinner("Requesting AI thumbnail...");
                    match request_remote_thumbnail(&key, concept, &video.title, &video.platform)
                        .await
                    {
                        Ok(url) => {
                            spinner.finish_with_message(format!(
                                "{} AI thumbnail generated",
                                style("✓").green().bold()
                            ));
                            remote_url = Some(url);
                        }
                        Err(err) => {
                            spinner.finish_with_message(format!(
                                "{} AI thumbnail failed ({}), rendering local preview",
                                style("!").yellow().bold(),
                                err
                            ));
                        }
                    }
                }
            }

            match remote_url {
                Some(url) => {
                    println!("{} {}", style("Thumbnail URL:").dim(), style(url).cyan());
                }
                None => {
                    let preview = render_preview(concept, None);
                    preview.save(&cli.thumbnail)?;
                    println!(
                        "{} Thumbnail preview saved to {}",
                        style("✓").green().bold(),
                        style(cli.thumbnail.display()).cyan()
                    );
                }
            }
        }
    }

    println!("\n{}", style("─".repeat(60)).dim());
    println!("{}", format_result_readable(&result));

    Ok(())
}
