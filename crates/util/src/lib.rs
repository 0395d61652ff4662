pub mod date_handling;
pub mod settings;

use once_cell::sync::Lazy;
use regex::Regex;

static REDACTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Master key riding as a query parameter.
        r"(?i)(code=)([^&\s]+)",
        r"(?i)(authorization: )([\w\-\.=:/+]+)",
        r"(?i)([A-Z0-9_]*?(KEY|TOKEN|SECRET|PASSWORD))=([^\s]+)",
    ]
    .iter()
    .map(|pat| Regex::new(pat).expect("static redaction pattern"))
    .collect()
});

/// Redacts values that look like secrets in a string.
///
/// Applied to anything that might reach logs or user-visible error text,
/// most importantly URLs carrying the `code` master-key parameter.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for re in REDACTION_PATTERNS.iter() {
        redacted = re
            .replace_all(&redacted, |caps: &regex::Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{}<redacted>", prefix)
            })
            .to_string();
    }
    redacted
}
