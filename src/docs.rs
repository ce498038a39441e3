use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Errors from the documentation collaborator. Never fatal: the converter
/// falls back to the finding's own message text.
#[derive(Debug, thiserror::Error)]
pub enum DocFetchError {
    #[error("failed to initialize HTTP client: {0}")]
    ClientInit(reqwest::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(u16),
}

/// Source of rule documentation text, keyed by rule code.
pub trait DocSource {
    fn fetch(&self, code: &str) -> Result<String, DocFetchError>;
}

/// Fetches `<base_url>/<CODE>.md` from the ShellCheck wiki. Only a 200
/// response counts as success.
pub struct WikiDocSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl WikiDocSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DocFetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DocFetchError::ClientInit)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl DocSource for WikiDocSource {
    fn fetch(&self, code: &str) -> Result<String, DocFetchError> {
        let url = format!("{}/{}.md", self.base_url, code);
        debug!(%url, "fetching rule documentation");
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DocFetchError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}

/// Per-run documentation cache over an optional source. Only successful
/// fetches are cached, so a transient failure does not suppress retries
/// for later findings with the same code.
pub struct RuleDocs {
    source: Option<Box<dyn DocSource>>,
    cache: HashMap<String, String>,
}

impl RuleDocs {
    pub fn with_source(source: Box<dyn DocSource>) -> Self {
        Self {
            source: Some(source),
            cache: HashMap::new(),
        }
    }

    /// A cache that never fetches; every lookup misses.
    pub fn disabled() -> Self {
        Self {
            source: None,
            cache: HashMap::new(),
        }
    }

    pub fn lookup(&mut self, code: &str) -> Option<String> {
        if let Some(text) = self.cache.get(code) {
            debug!(code, "rule documentation cache hit");
            return Some(text.clone());
        }

        let source = self.source.as_ref()?;
        match source.fetch(code) {
            Ok(text) => {
                self.cache.insert(code.to_string(), text.clone());
                Some(text)
            }
            Err(error) => {
                warn!(code, %error, "rule documentation fetch failed; using finding message");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct ScriptedSource {
        responses: RefCell<Vec<Result<String, DocFetchError>>>,
        calls: Cell<usize>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<String, DocFetchError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                calls: Cell::new(0),
            }
        }
    }

    impl DocSource for ScriptedSource {
        fn fetch(&self, _code: &str) -> Result<String, DocFetchError> {
            self.calls.set(self.calls.get() + 1);
            self.responses.borrow_mut().remove(0)
        }
    }

    #[test]
    fn successful_fetch_is_cached() {
        let source = ScriptedSource::new(vec![Ok("doc text".to_string())]);
        let mut docs = RuleDocs::with_source(Box::new(source));

        assert_eq!(docs.lookup("SC2086").as_deref(), Some("doc text"));
        // second lookup must come from the cache; the scripted source
        // would panic on a second call
        assert_eq!(docs.lookup("SC2086").as_deref(), Some("doc text"));
    }

    #[test]
    fn failed_fetch_is_not_cached() {
        let source = ScriptedSource::new(vec![
            Err(DocFetchError::Status(404)),
            Ok("late doc".to_string()),
        ]);
        let mut docs = RuleDocs::with_source(Box::new(source));

        assert!(docs.lookup("SC1090").is_none());
        assert_eq!(docs.lookup("SC1090").as_deref(), Some("late doc"));
    }

    #[test]
    fn disabled_docs_always_miss() {
        let mut docs = RuleDocs::disabled();
        assert!(docs.lookup("SC2086").is_none());
        assert!(docs.lookup("SC2086").is_none());
    }
}
