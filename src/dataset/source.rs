use anyhow::Context;

/// Reads a data source into memory. Sources are either local paths or
/// http(s) URLs; URL fetches happen once, at load time.
pub fn read_to_string(source: &str) -> anyhow::Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::blocking::get(source)
            .with_context(|| format!("Failed to fetch {source}"))?
            .error_for_status()
            .with_context(|| format!("Request for {source} failed"))?;
        response
            .text()
            .with_context(|| format!("Failed to read response body from {source}"))
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {source}"))
    }
}
