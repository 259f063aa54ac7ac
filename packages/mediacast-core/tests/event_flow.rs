//! Raw frames through the dispatcher into the store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mediacast_core::events::HandlerError;
use mediacast_core::model::{Playback, Playlist, Video, VideoId};
use mediacast_core::{DispatchOutcome, Dispatcher, LibrarySnapshot, SharedStore};
use serde_json::Value;

fn frame(name: &str, event: Value) -> String {
    serde_json::json!({ "name": name, "event": event }).to_string()
}

fn ids(raw: &[&str]) -> Vec<VideoId> {
    raw.iter().map(|s| VideoId::from(*s)).collect()
}

fn seeded() -> (Dispatcher, SharedStore) {
    let store = SharedStore::new();
    store.load(LibrarySnapshot {
        videos: vec![Video::new("a", "Intro"), Video::new("b", "Outro")],
        playlists: vec![Playlist::new("p", "Mix", ids(&["a", "b"]))],
        ..Default::default()
    });
    (Dispatcher::new(), store)
}

#[test]
fn frames_update_the_store_in_order() {
    let (dispatcher, store) = seeded();
    let _attached = store.attach(&dispatcher);
    let before = store.revision();

    let frames = [
        frame("VideoCreated", serde_json::json!({"id": "c", "title": "Bonus"})),
        frame("PlaylistContentUpdated", serde_json::json!({"model_id": "p", "ids": ["c", "a", "b"]})),
        frame("PlaylistRenamed", serde_json::json!({"model_id": "p", "name": "Late mix"})),
        frame("PlayerVideoUpdated", serde_json::json!({"video_id": "c", "playlist_id": "p"})),
        frame("PlayerStateUpdated", serde_json::json!({"state": "playing"})),
        frame("VolumeUpdated", serde_json::json!({"volume": 40})),
        frame("VideoDeleted", serde_json::json!({"model_id": "a"})),
    ];
    for raw in &frames {
        assert!(dispatcher.dispatch_raw(raw).invoked() >= 1, "not delivered: {raw}");
    }

    let state = store.read();
    let playlist = state.playlist(&"p".into()).unwrap();
    assert_eq!(playlist.name, "Late mix");
    assert_eq!(playlist.ids, ids(&["c", "b"]));
    assert!(state.video(&"a".into()).is_none());
    assert_eq!(state.player().state, Playback::Playing);
    assert_eq!(state.player().volume, 40);
    assert_eq!(state.active_in(&"p".into()), Some(&VideoId::from("c")));
    drop(state);

    assert!(store.revision() > before);
}

#[test]
fn scoped_observers_only_see_their_entity() {
    let (dispatcher, store) = seeded();
    let _attached = store.attach(&dispatcher);

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let _watch_p = dispatcher.observe_one("PlaylistRenamed", Some("p"), move |_: &Value| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    dispatcher.dispatch_raw(&frame("PlaylistRenamed", serde_json::json!({"model_id": "q", "name": "x"})));
    dispatcher.dispatch_raw(&frame("PlaylistRenamed", serde_json::json!({"model_id": "p", "name": "y"})));

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(store.read().playlist(&"p".into()).unwrap().name, "y");
}

#[test]
fn bad_frames_do_not_disturb_the_store() {
    let (dispatcher, store) = seeded();
    let _attached = store.attach(&dispatcher);

    assert_eq!(dispatcher.dispatch_raw("{ nope"), DispatchOutcome::Malformed);
    assert_eq!(
        dispatcher.dispatch_raw(&frame("SomethingNew", serde_json::json!({}))),
        DispatchOutcome::Unhandled
    );

    // A payload the store cannot decode fails that handler only.
    let outcome = dispatcher.dispatch_raw(&frame("VolumeUpdated", serde_json::json!({"volume": "loud"})));
    assert_eq!(outcome.failed(), 1);

    assert_eq!(store.read().playlist(&"p".into()).unwrap().ids, ids(&["a", "b"]));
}

#[test]
fn failing_observer_does_not_block_the_store() {
    let (dispatcher, store) = seeded();
    let _broken = dispatcher.observe_one("VolumeUpdated", None, |_: &Value| {
        Err(HandlerError::Rejected("broken widget".into()))
    });
    let _attached = store.attach(&dispatcher);

    let outcome = dispatcher.dispatch_raw(&frame("VolumeUpdated", serde_json::json!({"volume": 15})));
    assert_eq!(outcome.invoked(), 1);
    assert_eq!(outcome.failed(), 1);
    assert_eq!(outcome.invoked() + outcome.failed(), 2);
    assert_eq!(store.read().player().volume, 15);
}

#[test]
fn dropping_the_attachment_freezes_the_store() {
    let (dispatcher, store) = seeded();
    let attached = store.attach(&dispatcher);
    drop(attached);

    let outcome = dispatcher.dispatch_raw(&frame("VolumeUpdated", serde_json::json!({"volume": 90})));
    assert_eq!(outcome, DispatchOutcome::Unhandled);
    assert_eq!(store.read().player().volume, 0);
}
