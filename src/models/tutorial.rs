use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub tutorial_type: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Tutorial {
    /// YouTube video id from a watch, share or embed URL.
    pub fn youtube_id(&self) -> Option<String> {
        youtube_video_id(self.video_url.as_deref()?)
    }
}

pub fn youtube_video_id(video_url: &str) -> Option<String> {
    let parsed = url::Url::parse(video_url.trim()).ok()?;
    let host = parsed.host_str()?.trim_start_matches("www.");

    let id = match host {
        "youtu.be" => parsed.path_segments()?.next().map(str::to_string),
        "youtube.com" | "m.youtube.com" => {
            let mut segments = parsed.path_segments()?;
            match segments.next() {
                Some("watch") => parsed
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned()),
                Some("embed") | Some("shorts") => segments.next().map(str::to_string),
                _ => None,
            }
        }
        _ => None,
    }?;

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_id_variants() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=abc123&t=10").as_deref(),
            Some("abc123")
        );
        assert_eq!(youtube_video_id("https://youtu.be/xyz789").as_deref(), Some("xyz789"));
        assert_eq!(
            youtube_video_id("https://youtube.com/embed/emb456").as_deref(),
            Some("emb456")
        );
        assert!(youtube_video_id("https://vimeo.com/1234").is_none());
        assert!(youtube_video_id("not a url").is_none());
    }
}
