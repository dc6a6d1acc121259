/// Maps stored media URLs to the URLs a page should load.
///
/// Consulted for every image, video, poster and avatar the renderer emits.
/// Hosting and transformation happen elsewhere; this is only the seam.
pub trait AssetResolver {
    fn resolve(&self, url: &str) -> String;
}

/// Leaves every URL as stored
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughAssets;

impl AssetResolver for PassthroughAssets {
    fn resolve(&self, url: &str) -> String {
        url.to_string()
    }
}

/// Prefixes relative paths with a CDN base; absolute and data URLs pass through
#[derive(Debug, Clone)]
pub struct CdnAssets {
    base_url: String,
}

impl CdnAssets {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl AssetResolver for CdnAssets {
    fn resolve(&self, url: &str) -> String {
        if url.is_empty()
            || url.starts_with("http://")
            || url.starts_with("https://")
            || url.starts_with("data:")
            || url.starts_with("//")
        {
            return url.to_string();
        }
        format!("{}/{}", self.base_url, url.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdn_rewrites_relative_paths() {
        let cdn = CdnAssets::new("https://cdn.example.com/");
        assert_eq!(cdn.resolve("img/cat.png"), "https://cdn.example.com/img/cat.png");
        assert_eq!(cdn.resolve("/img/cat.png"), "https://cdn.example.com/img/cat.png");
    }

    #[test]
    fn test_cdn_keeps_absolute_urls() {
        let cdn = CdnAssets::new("https://cdn.example.com");
        assert_eq!(cdn.resolve("https://other.org/a.png"), "https://other.org/a.png");
        assert_eq!(cdn.resolve("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
        assert_eq!(cdn.resolve(""), "");
    }
}
