use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static SHORT_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"youtu\.be/([^?&]+)").unwrap());

static VIDEO_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap());

/// Pull the video id out of a `youtube.com/watch?v=` or `youtu.be/` link.
///
/// A missing scheme is tolerated. Anything else yields `None`.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    if let Some(captures) = SHORT_LINK.captures(url) {
        return Some(captures[1].to_string());
    }

    let with_scheme = if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };
    let parsed = Url::parse(&with_scheme).ok()?;

    match parsed.host_str()? {
        "youtu.be" => {
            let id = parsed.path().trim_start_matches('/');
            (!id.is_empty()).then(|| id.to_string())
        }
        "www.youtube.com" | "youtube.com" => parsed
            .query_pairs()
            .find(|(name, _)| name == "v")
            .map(|(_, value)| value.into_owned()),
        _ => None,
    }
}

/// True when the link carries a well-formed 11-character video id
pub fn is_valid_youtube_url(url: &str) -> bool {
    extract_video_id(url).is_some_and(|id| VIDEO_ID.is_match(&id))
}

/// Accept only absolute http(s) URLs, returning a message fit for the user otherwise
pub fn validate_url(raw: &str) -> Result<Url, &'static str> {
    if raw.trim().is_empty() {
        return Err("Please enter a URL");
    }
    let candidate = Url::parse(raw.trim())
        .map_err(|_| "Please enter a valid URL (e.g., https://example.com)")?;
    if !candidate.scheme().starts_with("http") {
        return Err("URL must start with http:// or https://");
    }
    Ok(candidate)
}
