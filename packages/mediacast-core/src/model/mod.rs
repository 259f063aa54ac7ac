//! Client-side records of server-owned entities.
//!
//! These are plain data: constructing one has no side effects. Keeping them
//! in sync with the backend is the job of [`crate::store`].

mod ids;
mod library;
mod player;
mod playlist;
mod video;

pub use ids::{AlbumId, ArtistId, EntityId, PlaylistId, VideoId};
pub use library::{Album, Artist};
pub use player::{Playback, PlayerState, SubtitleState};
pub use playlist::Playlist;
pub use video::{DownloadProgress, Video};
