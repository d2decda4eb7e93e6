use reqwest::Client;
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a plain HTTP client. Snapshot requests are never retried; the
    /// next poll tick is the retry.
    pub fn create_client(timeout: Duration) -> Client {
        Client::builder()
            .pool_max_idle_per_host(2)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}

/// Replaces the first `:name` placeholder for each parameter. A placeholder
/// only matches as a whole word, so `:date` never rewrites `:dates`.
pub fn interpolate_url_template(template: &str, params: &[(&str, &str)]) -> String {
    let mut interpolated = template.to_string();
    for (name, value) in params {
        let placeholder = format!(":{}", name);
        if let Some(start) = find_placeholder(&interpolated, &placeholder) {
            interpolated.replace_range(start..start + placeholder.len(), value);
        }
    }
    interpolated
}

fn find_placeholder(haystack: &str, placeholder: &str) -> Option<usize> {
    haystack.match_indices(placeholder).map(|(i, _)| i).find(|&i| {
        haystack[i + placeholder.len()..]
            .chars()
            .next()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
    })
}
