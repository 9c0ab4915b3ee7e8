//! Listing page URL construction

use url::Url;

/// Builds `<base>?page=<n>` URLs from a listing base URL
///
/// Query parameters already present on the base are kept; an existing
/// `page` parameter is replaced.
#[derive(Debug, Clone)]
pub struct PageUrls {
    base: Url,
}

impl PageUrls {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn parse(base: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(base)?))
    }

    /// URL of listing page `page`
    pub fn url_for(&self, page: u32) -> Url {
        let kept: Vec<(String, String)> = self
            .base
            .query_pairs()
            .filter(|(key, _)| key != "page")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut url = self.base.clone();
        url.set_query(None);
        url.query_pairs_mut()
            .extend_pairs(kept)
            .append_pair("page", &page.to_string());
        url
    }
}
