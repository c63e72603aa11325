use bunny_stream::{
    AddCaptionQuery, ListVideoQuery, StreamClient, StreamConfig, UpdateVideoQuery, Video,
};
use clap::{Parser, Subcommand};
use eyre::WrapErr;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Manage the videos of a Bunny Stream library.
///
/// The library is configured through BUNNY_STREAM_API_KEY and BUNNY_STREAM_LIBRARY_ID (and
/// optionally BUNNY_STREAM_BASE_URL), read from the environment or a `.env` file.
#[derive(Parser)]
#[command(name = "stream-cli", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of videos
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        per_page: u32,
        #[arg(long, default_value = "date")]
        sort_by: String,
        /// Only show videos whose title matches
        #[arg(long)]
        search: Option<String>,
        /// Only show videos in this collection
        #[arg(long)]
        collection: Option<String>,
    },
    /// Show a single video
    Get { video_id: String },
    /// Change the title and/or collection of a video
    Update {
        video_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        collection: Option<String>,
    },
    /// Create an empty video
    Create {
        title: String,
        #[arg(long, default_value = "")]
        collection: String,
    },
    /// Upload a file into an existing video
    Upload { video_id: String, file: PathBuf },
    /// Create a video and upload a file into it
    CreateUpload {
        title: String,
        file: PathBuf,
        #[arg(long, default_value = "")]
        collection: String,
    },
    /// Delete a video
    Delete { video_id: String },
    /// Have the API fetch the source of a video from a URL
    Fetch {
        video_id: String,
        url: String,
        /// Extra header for the download, as NAME=VALUE (repeatable)
        #[arg(long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
    /// Set the thumbnail of a video from an image URL
    Thumbnail { video_id: String, url: String },
    /// Add a caption track from a local caption file
    AddCaption {
        video_id: String,
        src_lang: String,
        file: PathBuf,
        #[arg(long)]
        label: Option<String>,
    },
    /// Remove the caption track for a language
    DeleteCaption { video_id: String, src_lang: String },
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // a missing .env is fine, the variables may come from the real environment
    let _ = dotenvy::dotenv();
    let config = StreamConfig::from_env().wrap_err("load Stream configuration")?;
    let stream = StreamClient::from_config(config);

    match cli.command {
        Command::List {
            page,
            per_page,
            sort_by,
            search,
            collection,
        } => {
            let mut query = ListVideoQuery::builder();
            query.page(page).per_page(per_page).sort_by(sort_by);
            if let Some(search) = search {
                query.search(search);
            }
            if let Some(collection) = collection {
                query.collection(collection);
            }
            let query = query.build().wrap_err("build list query")?;

            let response = stream.list_videos(&query).wrap_err("list videos")?;
            let videos = response.list().wrap_err("decode video list")?;
            eprintln!(
                "==> page {} ({} of {} videos)",
                response.current_page()?,
                videos.len(),
                response.total_items()?
            );
            for video in &videos {
                print_summary(video);
            }
        }
        Command::Get { video_id } => {
            let video = stream.get_video(&video_id).wrap_err("get video")?;
            println!("{video}");
        }
        Command::Update {
            video_id,
            title,
            collection,
        } => {
            let mut query = UpdateVideoQuery::builder(&video_id);
            if let Some(title) = title {
                query.title(title);
            }
            if let Some(collection) = collection {
                query.collection(collection);
            }
            let query = query.build().wrap_err("build update query")?;
            stream.update_video(&query).wrap_err("update video")?;
            eprintln!("updated {video_id}");
        }
        Command::Create { title, collection } => {
            let video = stream
                .create_video(&title, &collection)
                .wrap_err("create video")?;
            eprintln!("created video with GUID {}", video.guid());
            println!("{video}");
        }
        Command::Upload { video_id, file } => {
            stream
                .upload_video(&video_id, &file)
                .wrap_err_with(|| format!("upload {}", file.display()))?;
            eprintln!("uploaded {} to {video_id}", file.display());
        }
        Command::CreateUpload {
            title,
            file,
            collection,
        } => {
            let video = stream
                .create_and_upload_video(&title, &file, &collection)
                .wrap_err_with(|| format!("create and upload {}", file.display()))?;
            print_summary(&video);
        }
        Command::Delete { video_id } => {
            stream.delete_video(&video_id).wrap_err("delete video")?;
            eprintln!("deleted {video_id}");
        }
        Command::Fetch {
            video_id,
            url,
            headers,
        } => {
            let headers = (!headers.is_empty()).then_some(headers.as_slice());
            stream
                .fetch_video(&video_id, &url, headers)
                .wrap_err("fetch video")?;
            eprintln!("fetch of {url} into {video_id} requested");
        }
        Command::Thumbnail { video_id, url } => {
            stream
                .set_video_thumbnail(&video_id, &url)
                .wrap_err("set thumbnail")?;
            eprintln!("thumbnail of {video_id} set to {url}");
        }
        Command::AddCaption {
            video_id,
            src_lang,
            file,
            label,
        } => {
            let contents = std::fs::read(&file)
                .wrap_err_with(|| format!("read caption file {}", file.display()))?;
            let mut query = AddCaptionQuery::builder(&video_id, &src_lang);
            query.caption_contents(contents);
            if let Some(label) = label {
                query.label(label);
            }
            let query = query.build().wrap_err("build caption query")?;
            stream.add_caption(&query).wrap_err("add caption")?;
            eprintln!("added {src_lang} captions to {video_id}");
        }
        Command::DeleteCaption { video_id, src_lang } => {
            stream
                .delete_caption(&video_id, &src_lang)
                .wrap_err("delete caption")?;
            eprintln!("removed {src_lang} captions from {video_id}");
        }
    }

    Ok(())
}

fn print_summary(video: &Video) {
    println!(
        "{}  {:<40}  {:>4}x{:<4}  {:>3}%  {} views",
        video.guid(),
        video.title(),
        video.width(),
        video.height(),
        video.encode_progress(),
        video.views()
    );
}
