//! Service URL normalization and request URL assembly.

use url::Url;

use crate::config::Credential;
use crate::constants::query;
use crate::error::{AnalystError, AnalystResult};

/// Normalize a raw base URL
///
/// Surrounding whitespace and trailing slashes are dropped. An empty input
/// means "no service configured" and yields `Ok(None)`.
pub fn format_base_url(raw: &str) -> AnalystResult<Option<Url>> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(trimmed).map_err(|e| AnalystError::invalid_url(raw, e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(AnalystError::invalid_url(raw, "URL cannot be used as a base"));
    }

    Ok(Some(url))
}

/// Base URL plus the credential attached to every request
#[derive(Debug, Clone)]
pub struct Endpoint {
    base: Url,
    credential: Option<Credential>,
}

impl Endpoint {
    pub fn new(base: Url, credential: Option<Credential>) -> Self {
        Self { base, credential }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build `{base}/{segments...}?asynchronousReturn=false&returnContent=true[&credential]`
    ///
    /// Each segment is percent-encoded on its own, so dataset names containing
    /// `/` or spaces stay a single path segment.
    pub fn service_url(&self, segments: &[&str]) -> AnalystResult<Url> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .map_err(|_| AnalystError::invalid_url(self.base.as_str(), "URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair(query::ASYNCHRONOUS_RETURN, "false")
                .append_pair(query::RETURN_CONTENT, "true");
            if let Some(credential) = &self.credential {
                pairs.append_pair(&credential.name, &credential.value);
            }
        }

        Ok(url)
    }
}
