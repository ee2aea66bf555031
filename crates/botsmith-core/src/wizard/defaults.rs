//! Canned content for the knowledge step.

/// Default FAQ content restored by "Revert to Default FAQ".
pub const DEFAULT_FAQ: &str = "Default FAQ content...";

/// Format fetched website content as the import summary written into
/// `companyInformation`. Presentation detail, not a correctness contract.
pub fn import_summary(url: &str, content: &str) -> String {
    format!("## Content imported from: {url}\n\n{content}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_summary_carries_source_url() {
        let summary = import_summary("https://example.com/about", "About Us");
        assert!(summary.starts_with("## Content imported from: https://example.com/about"));
        assert!(summary.ends_with("About Us"));
    }
}
