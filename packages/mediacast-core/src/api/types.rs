//! Request bodies sent to the backend.

use serde::Serialize;

use crate::model::VideoId;

/// Body of `POST /playlists/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistCreate {
    pub name: String,
    pub ids: Vec<VideoId>,
}

/// Body of `PATCH /playlists/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaylistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<VideoId>>,
}

impl PlaylistUpdate {
    #[must_use]
    pub fn ids(ids: Vec<VideoId>) -> Self {
        Self {
            ids: Some(ids),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_omits_unset_fields() {
        let body = serde_json::to_string(&PlaylistUpdate::name("Road trip")).unwrap();
        assert_eq!(body, r#"{"name":"Road trip"}"#);

        let body = serde_json::to_string(&PlaylistUpdate::ids(vec!["1".into()])).unwrap();
        assert_eq!(body, r#"{"ids":["1"]}"#);
    }
}
