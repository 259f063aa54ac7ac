//! Mediacast Remote - command-line remote control for a Mediacast server.
//!
//! One-shot commands send a single request and exit. `watch` keeps the push
//! channels open and prints every event until interrupted.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mediacast_core::events::handler;
use mediacast_core::model::{PlaylistId, VideoId};
use mediacast_core::{EventName, LoggingNotifier, Session};
use serde_json::Value;
use tokio::signal;

use crate::config::RemoteConfig;

/// Mediacast Remote - control playback and playlists on a media server.
#[derive(Parser, Debug)]
#[command(name = "mediacast-remote")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (YAML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(short, long, default_value = "warn", env = "MEDIACAST_LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// Server address (overrides config file).
    #[arg(short, long, value_name = "URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the player state.
    Status,
    /// Download a URL and play it now.
    Stream { url: String },
    /// Download a URL and add it to the play queue.
    Queue { url: String },
    /// Play a library video.
    Play {
        video: String,
        /// Play it as part of this playlist.
        #[arg(short, long)]
        playlist: Option<String>,
    },
    /// Toggle pause.
    Pause,
    Stop,
    /// Seek to a position in seconds.
    Seek { position: f64 },
    /// Set the volume (0-100).
    Volume {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        value: u8,
    },
    #[command(subcommand)]
    Subtitles(SubtitleCommand),
    #[command(subcommand)]
    Videos(VideoCommand),
    #[command(subcommand)]
    Playlists(PlaylistCommand),
    /// List artists.
    Artists,
    /// List albums.
    Albums,
    /// Print pushed events until interrupted.
    Watch,
}

#[derive(Subcommand, Debug)]
enum SubtitleCommand {
    Toggle,
    /// Shift subtitles by a number of milliseconds.
    Delay {
        #[arg(allow_hyphen_values = true)]
        delay_ms: i64,
    },
}

#[derive(Subcommand, Debug)]
enum VideoCommand {
    List,
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum PlaylistCommand {
    List,
    /// Print a playlist's videos in play order.
    Show { id: String },
    Create {
        name: String,
        videos: Vec<String>,
    },
    Rename { id: String, name: String },
    Delete { id: String },
    /// Queue videos right after the one playing from this playlist.
    QueueNext {
        id: String,
        #[arg(required = true)]
        videos: Vec<String>,
    },
    /// Queue videos at the end of the playlist.
    QueueLast {
        id: String,
        #[arg(required = true)]
        videos: Vec<String>,
    },
    Shuffle { id: String },
    /// Move the entry at one index to another.
    Move { id: String, from: usize, to: usize },
    /// Remove a video from the playlist.
    Remove { id: String, video: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp_millis()
        .init();

    log::info!("Mediacast Remote v{}", env!("CARGO_PKG_VERSION"));

    let mut config =
        RemoteConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(server) = args.server {
        config.server_url = server;
    }

    let watching = matches!(args.command, Command::Watch);
    let session = Session::new(config.to_client_config(watching), Arc::new(LoggingNotifier))
        .context("Invalid configuration")?;

    run(&session, args.command).await
}

async fn run(session: &Session, command: Command) -> Result<()> {
    let api = session.api();
    let player = session.player_actions();

    match command {
        Command::Status => {
            let state = api.player_state().await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Command::Stream { url } => player.stream(&url).await?,
        Command::Queue { url } => player.queue(&url).await?,
        Command::Play { video, playlist } => {
            let playlist = playlist.map(PlaylistId::from);
            player.play(&VideoId::from(video), playlist.as_ref()).await?;
        }
        Command::Pause => player.pause().await?,
        Command::Stop => player.stop().await?,
        Command::Seek { position } => player.seek(position).await?,
        Command::Volume { value } => player.volume(value).await?,
        Command::Subtitles(SubtitleCommand::Toggle) => player.toggle_subtitles().await?,
        Command::Subtitles(SubtitleCommand::Delay { delay_ms }) => {
            player.seek_subtitles(delay_ms).await?;
        }
        Command::Videos(VideoCommand::List) => {
            for video in api.videos().await? {
                let status = if video.ready { "ready" } else { "downloading" };
                println!("{}\t{}\t{}", video.id, status, video.title);
            }
        }
        Command::Videos(VideoCommand::Delete { id }) => {
            api.delete_video(&VideoId::from(id)).await?;
        }
        Command::Playlists(command) => run_playlist(session, command).await?,
        Command::Artists => {
            for artist in api.artists().await? {
                println!("{}\t{} video(s)\t{}", artist.id, artist.ids.len(), artist.name);
            }
        }
        Command::Albums => {
            for album in api.albums().await? {
                println!("{}\t{} video(s)\t{}", album.id, album.ids.len(), album.name);
            }
        }
        Command::Watch => watch(session).await?,
    }
    Ok(())
}

async fn run_playlist(session: &Session, command: PlaylistCommand) -> Result<()> {
    let api = session.api();
    let actions = session.playlist_actions();

    match command {
        PlaylistCommand::List => {
            for playlist in api.playlists().await? {
                println!("{}\t{} video(s)\t{}", playlist.id, playlist.ids.len(), playlist.name);
            }
        }
        PlaylistCommand::Show { id } => {
            for (index, video) in api.playlist_videos(&PlaylistId::from(id)).await?.iter().enumerate() {
                println!("{}\t{}\t{}", index, video.id, video.title);
            }
        }
        PlaylistCommand::Create { name, videos } => {
            api.create_playlist(&name, to_ids(videos)).await?;
        }
        PlaylistCommand::Delete { id } => api.delete_playlist(&PlaylistId::from(id)).await?,
        PlaylistCommand::Rename { id, name } => {
            load_state(session).await?;
            actions.rename(&PlaylistId::from(id), &name).await?;
        }
        PlaylistCommand::QueueNext { id, videos } => {
            load_state(session).await?;
            let order = actions.queue_next(&PlaylistId::from(id), &to_ids(videos)).await?;
            print_order(&order);
        }
        PlaylistCommand::QueueLast { id, videos } => {
            load_state(session).await?;
            let order = actions.queue_last(&PlaylistId::from(id), &to_ids(videos)).await?;
            print_order(&order);
        }
        PlaylistCommand::Shuffle { id } => {
            load_state(session).await?;
            print_order(&actions.shuffle(&PlaylistId::from(id)).await?);
        }
        PlaylistCommand::Move { id, from, to } => {
            load_state(session).await?;
            print_order(&actions.move_video(&PlaylistId::from(id), from, to).await?);
        }
        PlaylistCommand::Remove { id, video } => {
            load_state(session).await?;
            let order = actions
                .remove_video(&PlaylistId::from(id), &VideoId::from(video))
                .await?;
            print_order(&order);
        }
    }
    Ok(())
}

/// Pages in server state; playlist actions compute from it.
async fn load_state(session: &Session) -> Result<()> {
    session.resync().await.context("Failed to load server state")
}

fn to_ids(raw: Vec<String>) -> Vec<VideoId> {
    raw.into_iter().map(VideoId::from).collect()
}

fn print_order(ids: &[VideoId]) {
    let order: Vec<&str> = ids.iter().map(VideoId::as_str).collect();
    println!("{}", order.join(" "));
}

/// Prints every pushed event until Ctrl+C or SIGTERM.
async fn watch(session: &Session) -> Result<()> {
    let printers = EventName::ALL.iter().map(|&name| {
        let h = handler(move |payload: &Value| {
            println!("{}\t{}", name, payload);
            Ok(())
        });
        (name, h)
    });
    let _printing = session.dispatcher().observe(printers, None);

    session.start().await.context("Failed to connect")?;
    log::info!(
        "Watching {} channel(s), press Ctrl+C to stop",
        session.channels().channel_count()
    );

    shutdown_signal().await;

    log::info!("Shutdown signal received, cleaning up...");
    session.shutdown().await;
    Ok(())
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
