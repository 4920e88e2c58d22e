use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::state::{reduce, AppState, Intent, Notice, Snapshot};
use crate::error::Result;

const NOTICE_CAPACITY: usize = 16;

/// Owner of the live state.
///
/// State is replaced wholesale on every dispatch and published as an
/// immutable `Arc<AppState>`; observers never see a mutable reference.
pub struct Store {
    state: Arc<AppState>,
    state_tx: watch::Sender<Arc<AppState>>,
    notice_tx: broadcast::Sender<Notice>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        let state = Arc::new(initial);
        let (state_tx, _) = watch::channel(Arc::clone(&state));
        let (notice_tx, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            state,
            state_tx,
            notice_tx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Snapshot::from_state(&self.state)
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.state_tx.subscribe()
    }

    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notice_tx.subscribe()
    }

    /// Apply `intent`. On error the state is left as it was.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Option<Notice>> {
        let before = self.state.player.current_track_id.clone();
        let transition = reduce(&self.state, intent).inspect_err(|e| warn!("intent rejected: {e}"))?;

        if transition.state != *self.state {
            self.state = Arc::new(transition.state);
            if self.state.player.current_track_id != before {
                info!(track = %self.state.player.current_track_id, "track changed");
            }
            // send_replace keeps the value even when nobody is subscribed
            self.state_tx.send_replace(Arc::clone(&self.state));
        }

        if let Some(notice) = &transition.notice {
            info!(%notice, "notice");
            // no receivers is fine
            let _ = self.notice_tx.send(notice.clone());
        }
        Ok(transition.notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlayerError;
    use crate::player::demo::demo_tracks;

    fn store() -> Store {
        Store::new(AppState::new(demo_tracks()).unwrap())
    }

    #[tokio::test]
    async fn subscribers_see_each_change() {
        let mut store = store();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.dispatch(Intent::Next).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().player.current_track_id, "2");

        // a tick while stopped changes nothing and publishes nothing
        store.dispatch(Intent::Tick).unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn notices_are_broadcast_once_per_edit() {
        let mut store = store();
        let mut notices = store.notices();
        let notice = store.dispatch(Intent::CreatePlaylist("Drive".into())).unwrap();
        assert!(matches!(notice, Some(Notice::PlaylistCreated { .. })));
        assert!(matches!(notices.recv().await.unwrap(), Notice::PlaylistCreated { .. }));
        assert!(notices.try_recv().is_err());
    }

    #[test]
    fn rejected_intent_keeps_state() {
        let mut store = store();
        let before = store.state().clone();
        let err = store.dispatch(Intent::DeletePlaylist("pl-404".into())).unwrap_err();
        assert_eq!(err, PlayerError::PlaylistNotFound("pl-404".into()));
        assert_eq!(*store.state(), before);
    }

    #[test]
    fn snapshot_tracks_dispatches() {
        let mut store = store();
        store.dispatch(Intent::SelectTrack("3".into())).unwrap();
        let snap = store.snapshot().unwrap();
        assert_eq!(snap.track.title, "Digital Horizon");
        assert!(snap.playing);
    }
}
