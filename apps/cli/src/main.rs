use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;

use tubelens_core::{
    AnalysisReport, CaptionEntry, Comment, MAX_COMMENTS, Provider, Video, YouTubeClient,
    aggregate_comments, extract_video_id, format_analysis_readable, format_caption_preview,
    generate_insights, get_cache_dir, get_captions_path, get_comments_path, get_insights_path,
    get_report_path, get_video_path, load_captions, load_json, parse_caption_track, save_captions,
    save_json,
};

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliProvider {
    #[default]
    Grok,
    Openai,
    Gemini,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Grok => Provider::Grok,
            CliProvider::Openai => Provider::Openai,
            CliProvider::Gemini => Provider::Gemini,
        }
    }
}

#[derive(Parser)]
#[command(name = "tubelens")]
#[command(
    about = "Fetch YouTube comments, aggregate activity stats, and generate AI-powered insights"
)]
struct Cli {
    /// Video URL
    url: String,

    /// Insights output language (e.g., "en", "ru", "uk")
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// AI provider for comment insights
    #[arg(short, long, default_value = "grok")]
    provider: CliProvider,

    /// Also fetch and parse the video's caption track
    #[arg(short, long)]
    captions: bool,

    /// Skip the AI insights step
    #[arg(long)]
    skip_insights: bool,

    /// Force re-fetching even if cached files exist
    #[arg(short, long)]
    force: bool,
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

fn create_comment_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} Fetching comments {bar:30.cyan/blue} {pos}/{len}")
            .unwrap()
            .progress_chars("━╸─"),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let provider: Provider = cli.provider.into();

    // Validate API keys early
    let youtube = match YouTubeClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    if !cli.skip_insights {
        if let Err(e) = provider.api_key() {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }

    let video_id = extract_video_id(&cli.url)?;

    // Setup cache directory
    let cache_dir = get_cache_dir(&video_id);
    fs::create_dir_all(&cache_dir).await?;

    println!(
        "\n{}  {}\n",
        style("tubelens").cyan().bold(),
        style("Comment Analyzer").dim()
    );

    // Step 1: Video details (check cache)
    let video_path = get_video_path(&cache_dir);
    let video: Video = if !cli.force && video_path.exists() {
        let video = load_json(&video_path).await?;
        println!(
            "{} Video details {}",
            style("✓").green().bold(),
            style("(cached)").dim()
        );
        video
    } else {
        let spinner = create_spinner("Fetching video details...");
        let video = youtube.get_video_details(&video_id).await?;
        save_json(&video, &video_path).await?;
        spinner.finish_with_message(format!(
            "{} Video: {}",
            style("✓").green().bold(),
            style(&video.title).dim()
        ));
        video
    };

    // Step 2: Comments (check cache)
    let comments_path = get_comments_path(&cache_dir);
    let comments: Vec<Comment> = if !cli.force && comments_path.exists() {
        let comments: Vec<Comment> = load_json(&comments_path).await?;
        println!(
            "{} Comments fetched: {} {}",
            style("✓").green().bold(),
            comments.len(),
            style("(cached)").dim()
        );
        comments
    } else {
        let expected = (video.comment_count as usize).min(MAX_COMMENTS) as u64;
        let bar = create_comment_bar(expected.max(1));
        let comments = youtube
            .fetch_all_comments(&video_id, |fetched| bar.set_position(fetched as u64))
            .await?;
        save_json(&comments, &comments_path).await?;
        bar.finish_and_clear();
        println!(
            "{} Comments fetched: {}",
            style("✓").green().bold(),
            comments.len()
        );
        comments
    };

    // Step 3: Aggregate (always recomputed)
    let stats = aggregate_comments(&comments);
    println!(
        "{} Aggregated: {} comments from {} authors",
        style("✓").green().bold(),
        stats.total_comments,
        style(stats.unique_authors).yellow()
    );

    // Step 4: Captions (optional, check cache)
    let caption_entries: Option<Vec<CaptionEntry>> = if cli.captions {
        let captions_path = get_captions_path(&cache_dir);
        let raw = if !cli.force && captions_path.exists() {
            let raw = load_captions(&captions_path).await?;
            println!(
                "{} Captions downloaded {}",
                style("✓").green().bold(),
                style("(cached)").dim()
            );
            raw
        } else {
            let spinner = create_spinner("Downloading captions...");
            let raw = youtube.download_captions(&video_id, &cli.lang).await?;
            save_captions(&raw, &captions_path).await?;
            spinner.finish_with_message(format!(
                "{} Captions downloaded",
                style("✓").green().bold()
            ));
            raw
        };
        let entries = parse_caption_track(&raw)?;
        println!(
            "{} Captions parsed: {} lines",
            style("✓").green().bold(),
            entries.len()
        );
        Some(entries)
    } else {
        None
    };

    // Step 5: Insights (optional, check cache with provider+lang)
    let insights = if cli.skip_insights {
        None
    } else {
        let insights_path = get_insights_path(&cache_dir, &provider, &cli.lang);
        if !cli.force && insights_path.exists() {
            let insights = load_json(&insights_path).await?;
            println!(
                "{} Insights generated ({}) {}",
                style("✓").green().bold(),
                provider.name(),
                style("(cached)").dim()
            );
            Some(insights)
        } else {
            let spinner = create_spinner(&format!(
                "Generating {} insights with {}...",
                cli.lang,
                provider.name()
            ));
            let insights = generate_insights(&comments, &provider, &cli.lang).await?;
            save_json(&insights, &insights_path).await?;
            spinner.finish_with_message(format!(
                "{} Insights generated ({})",
                style("✓").green().bold(),
                provider.name()
            ));
            Some(insights)
        }
    };

    // Save the full report
    let report = AnalysisReport {
        video,
        stats,
        insights,
    };
    let report_path = get_report_path(&cache_dir, &provider, &cli.lang);
    save_json(&report, &report_path).await?;

    println!(
        "\n{} {}\n",
        style("Saved:").dim(),
        style(report_path.display()).cyan()
    );
    println!("{}", style("─".repeat(60)).dim());

    // Human-readable output
    let readable =
        format_analysis_readable(&report.video, &report.stats, report.insights.as_ref());
    println!("{}", readable);

    if let Some(entries) = &caption_entries {
        println!("## Captions (preview)\n");
        println!("{}\n", format_caption_preview(entries, 5));
    }

    Ok(())
}
