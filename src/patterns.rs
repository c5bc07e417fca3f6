//! Static pattern library: suspicious-script regex and version grammar.

use once_cell::sync::Lazy;
use regex::Regex;

/// Indicators of dangerous lifecycle scripts: remote-fetch tools, shell
/// interpreters, dynamic evaluation, process spawning, and outbound HTTP
/// verbs.
///
/// Deliberately broad. A missed install-time backdoor costs far more than
/// a noisy warning, so this pattern trades precision for recall. Do not
/// narrow it to silence false positives.
pub static SUSPICIOUS_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(curl|wget|nc|ncat|netcat|iwr|invoke-webrequest|certutil|bitsadmin|bash|sh|zsh|eval|exec|spawn|fork|child_process|powershell|base64|GET|POST|PUT|DELETE)\b|https?://|node\s+-e|python\s+-c",
    )
    .expect("suspicious-script pattern must compile")
});

/// Accepted dependency version grammar: exact `MAJOR.MINOR.PATCH`,
/// optionally prefixed with `^` or `~`. Anything else is reported.
pub static VERSION_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\^~]?\d+\.\d+\.\d+$").expect("version-spec pattern must compile")
});
