use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, Result};

/// A named list of track ids. Ids are weak references into the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub track_ids: Vec<String>,
    /// Unix time in milliseconds.
    pub created_at: u64,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn clean_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlayerError::EmptyPlaylistName);
    }
    Ok(name.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistBook {
    playlists: Vec<Playlist>,
    next_id: u64,
}

impl PlaylistBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, name: &str, track_ids: Vec<String>) -> Result<&Playlist> {
        let name = clean_name(name)?;
        self.next_id += 1;
        self.playlists.push(Playlist {
            id: format!("pl-{}", self.next_id),
            name,
            track_ids,
            created_at: now_millis(),
        });
        Ok(&self.playlists[self.playlists.len() - 1])
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<()> {
        let name = clean_name(name)?;
        self.get_mut(id)?.name = name;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Playlist> {
        let index = self
            .playlists
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PlayerError::PlaylistNotFound(id.to_string()))?;
        Ok(self.playlists.remove(index))
    }

    pub fn add_track(&mut self, id: &str, track_id: &str) -> Result<()> {
        self.get_mut(id)?.track_ids.push(track_id.to_string());
        Ok(())
    }

    /// Remove every occurrence of `track_id`.
    pub fn remove_track(&mut self, id: &str, track_id: &str) -> Result<()> {
        self.get_mut(id)?.track_ids.retain(|t| t != track_id);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PlayerError::PlaylistNotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}
