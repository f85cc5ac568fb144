//! Widget Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dispatch::Dispatcher;
use crate::error::{ReceptionError, Result};
use crate::format::FormatPolicy;
use crate::timer::Timer;
use crate::transport::{HttpTransport, ReceptionTransport};
use crate::wire::ASK_ENDPOINT;

/// Widget settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Endpoint path (resolved against the page origin) or absolute URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Give up on a request after this many seconds; `None` waits forever
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: Option<u64>,

    /// Formatting applied to message text
    #[serde(default)]
    pub format: FormatPolicy,

    /// Canned questions offered as one-click buttons
    #[serde(default = "default_quick_questions")]
    pub quick_questions: Vec<String>,
}

fn default_endpoint() -> String {
    ASK_ENDPOINT.into()
}

#[allow(clippy::unnecessary_wraps)]
const fn default_timeout_secs() -> Option<u64> {
    Some(120)
}

fn default_quick_questions() -> Vec<String> {
    [
        "How many hospitals are there?",
        "List all hospitals and their locations",
        "What dates are available?",
        "How far apart are the hospitals?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            format: FormatPolicy::default(),
            quick_questions: default_quick_questions(),
        }
    }
}

impl WidgetConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(ReceptionError::Config("endpoint must not be empty".into()));
        }
        if self.timeout_secs == Some(0) {
            return Err(ReceptionError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// HTTP transport for a page served from `origin`
    pub fn transport(&self, origin: &str) -> Result<HttpTransport> {
        self.validate()?;
        Ok(HttpTransport::new(resolve_endpoint(origin, &self.endpoint)))
    }

    /// Dispatcher over `transport` bounded by the configured timeout
    pub fn dispatcher<T: ReceptionTransport, S: Timer>(&self, transport: T, timer: S) -> Dispatcher<T, S> {
        Dispatcher::new(transport, timer).with_timeout(self.timeout())
    }
}

/// Join a relative endpoint path onto an origin; absolute URLs pass through
pub fn resolve_endpoint(origin: &str, endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return endpoint.to_string();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
