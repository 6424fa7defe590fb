use super::error::ValidationError;

/// Embed link shown before the user has picked anything
pub const DEFAULT_EMBED_LINK: &str =
    "https://open.spotify.com/embed/album/72sG7hFVmyFlxg9e7PfV0K?utm_source=generator";

const ALBUM_PREFIX: &str = "https://open.spotify.com/album/";
const PLAYLIST_PREFIX: &str = "https://open.spotify.com/playlist/";

/// Turn a pasted album/playlist share link into its embeddable form.
///
/// Purely syntactic: the first `/album/` (or, failing that, `/playlist/`)
/// segment gains an `/embed` prefix and everything else, query string
/// included, is kept verbatim. The link is never fetched.
pub fn normalize(input: &str) -> Result<String, ValidationError> {
    if !input.contains(ALBUM_PREFIX) && !input.contains(PLAYLIST_PREFIX) {
        return Err(ValidationError::InvalidSpotifyLink);
    }

    let embed = if input.contains("/album/") {
        input.replacen("/album/", "/embed/album/", 1)
    } else {
        input.replacen("/playlist/", "/embed/playlist/", 1)
    };
    Ok(embed)
}

/// State of the Spotify widget: the stored embed link plus the paste box
#[derive(Debug, Clone)]
pub struct SpotifyWidget {
    pub link: String,
    pub input: String,
    pub error: Option<ValidationError>,
}

impl SpotifyWidget {
    pub fn new(link: String) -> Self {
        Self {
            link,
            input: String::new(),
            error: None,
        }
    }

    /// Validate the paste box. On success the link is replaced and the
    /// input and error are cleared; on failure only the error changes.
    pub fn submit(&mut self) -> Result<&str, ValidationError> {
        match normalize(&self.input) {
            Ok(embed) => {
                log::info!("spotify embed link set to {}", embed);
                self.link = embed;
                self.input.clear();
                self.error = None;
                Ok(&self.link)
            }
            Err(e) => {
                log::debug!("rejected spotify link input {:?}", self.input);
                self.error = Some(e);
                Err(e)
            }
        }
    }
}

impl Default for SpotifyWidget {
    fn default() -> Self {
        Self::new(DEFAULT_EMBED_LINK.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_album() {
        assert_eq!(
            normalize("https://open.spotify.com/album/72sG7hFVmyFlxg9e7PfV0K").unwrap(),
            "https://open.spotify.com/embed/album/72sG7hFVmyFlxg9e7PfV0K"
        );
    }

    #[test]
    fn test_normalize_playlist_keeps_query() {
        assert_eq!(
            normalize("https://open.spotify.com/playlist/abc?x=1").unwrap(),
            "https://open.spotify.com/embed/playlist/abc?x=1"
        );
    }

    #[test]
    fn test_normalize_rejects_other_hosts() {
        assert_eq!(
            normalize("https://example.com/foo"),
            Err(ValidationError::InvalidSpotifyLink)
        );
        assert_eq!(
            normalize("https://open.spotify.com/track/123"),
            Err(ValidationError::InvalidSpotifyLink)
        );
        assert_eq!(normalize(""), Err(ValidationError::InvalidSpotifyLink));
    }

    #[test]
    fn test_normalize_rewrites_first_occurrence_only() {
        assert_eq!(
            normalize("https://open.spotify.com/album/abc?ref=/album/x").unwrap(),
            "https://open.spotify.com/embed/album/abc?ref=/album/x"
        );
    }

    #[test]
    fn test_submit_success_clears_input_and_error() {
        let mut widget = SpotifyWidget::default();
        widget.error = Some(ValidationError::InvalidSpotifyLink);
        widget.input = "https://open.spotify.com/playlist/xyz".to_string();

        widget.submit().unwrap();
        assert_eq!(widget.link, "https://open.spotify.com/embed/playlist/xyz");
        assert!(widget.input.is_empty());
        assert_eq!(widget.error, None);
    }

    #[test]
    fn test_submit_failure_keeps_link() {
        let mut widget = SpotifyWidget::default();
        widget.input = "not a link".to_string();

        assert!(widget.submit().is_err());
        assert_eq!(widget.link, DEFAULT_EMBED_LINK);
        assert_eq!(widget.input, "not a link");
        assert_eq!(widget.error, Some(ValidationError::InvalidSpotifyLink));
    }
}
