//! Credential config fragment generation.
//!
//! Pure text transformation: takes the `git config --global --get-regexp
//! ^credential` output and produces the helper config fragment that puts
//! Netlify's helper first while re-declaring everything that was already
//! configured.

/// One parsed `credential.*` setting.
///
/// `scope` is the section the key lives in: `credential` for the global
/// section, `credential.<url>` for a host-scoped one. Splitting the key off
/// the end (rather than splitting on every dot) keeps URLs with dots intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSetting {
    pub scope: String,
    pub key: String,
    pub value: String,
}

/// Parse `--get-regexp` output lines into settings.
///
/// Each line is `<dotted.key> <value>`; the value may itself contain spaces
/// (e.g. `cache --timeout 30`). Lines that don't look like a key/value pair
/// are ignored.
pub fn parse_credential_lines(lines: &[String]) -> Vec<CredentialSetting> {
    lines
        .iter()
        .filter_map(|line| {
            let (full_key, value) = line.split_once(' ')?;
            let (scope, key) = full_key.rsplit_once('.')?;
            if scope != "credential" && !scope.starts_with("credential.") {
                return None;
            }
            Some(CredentialSetting {
                scope: scope.to_string(),
                key: key.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

/// Build the helper config fragment.
///
/// The first section resets the helper list so Netlify's helper is consulted
/// first; previously configured scopes follow in their original order,
/// grouped under one header per scope.
pub fn merge_credential_config(existing_lines: &[String]) -> String {
    let mut config = String::from(
        "\n# The first line resets the list of helpers so we can check Netlify's first.\n[credential]\n  helper = \"\"\n\n[credential]\n  helper = netlify\n  useHttpPath = true\n",
    );

    let mut section = String::from("credential");
    for setting in parse_credential_lines(existing_lines) {
        if setting.scope != section {
            match setting.scope.strip_prefix("credential.") {
                Some(host) => config.push_str(&format!("\n[credential \"{}\"]\n", host)),
                None => config.push_str("\n[credential]\n"),
            }
            section = setting.scope.clone();
        }
        config.push_str(&format!("  {}={}\n", setting.key, setting.value));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input_yields_reset_and_helper_only() {
        let config = merge_credential_config(&[]);
        assert!(config.contains("helper = \"\""));
        assert!(config.contains("helper = netlify"));
        assert!(config.contains("useHttpPath = true"));
        // No per-host sections
        assert!(!config.contains("[credential \""));
    }

    #[test]
    fn helper_reset_comes_before_netlify_helper() {
        let config = merge_credential_config(&[]);
        let reset = config.find("helper = \"\"").unwrap();
        let netlify = config.find("helper = netlify").unwrap();
        assert!(reset < netlify);
    }

    #[test]
    fn global_settings_are_re_declared_after_the_helper() {
        let config = merge_credential_config(&lines(&["credential.helper osxkeychain"]));
        let netlify = config.find("helper = netlify").unwrap();
        let prior = config.find("helper=osxkeychain").unwrap();
        assert!(netlify < prior);
    }

    #[test]
    fn host_scoped_settings_get_their_own_section() {
        let config = merge_credential_config(&lines(&[
            "credential.https://example.com.helper mycred",
            "credential.https://example.com.username deploy",
        ]));
        assert!(config.contains("[credential \"https://example.com\"]"));
        assert!(config.contains("  helper=mycred"));
        assert!(config.contains("  username=deploy"));
        // One header for both keys of the scope
        assert_eq!(config.matches("[credential \"https://example.com\"]").count(), 1);
    }

    #[test]
    fn host_urls_with_dots_survive_intact() {
        let config =
            merge_credential_config(&lines(&["credential.https://git.company.co.uk.helper x"]));
        assert!(config.contains("[credential \"https://git.company.co.uk\"]"));
    }

    #[test]
    fn values_with_spaces_are_preserved() {
        let config = merge_credential_config(&lines(&["credential.helper cache --timeout 30"]));
        assert!(config.contains("helper=cache --timeout 30"));
    }

    #[test]
    fn scope_order_is_preserved() {
        let config = merge_credential_config(&lines(&[
            "credential.https://a.example.helper one",
            "credential.https://b.example.helper two",
        ]));
        let a = config.find("https://a.example").unwrap();
        let b = config.find("https://b.example").unwrap();
        assert!(a < b);
    }

    #[test]
    fn malformed_lines_are_ignored() {
        let config = merge_credential_config(&lines(&["notacredentialline", ""]));
        assert!(!config.contains("notacredentialline"));
    }

    #[test]
    fn parse_splits_key_off_the_end() {
        let parsed = parse_credential_lines(&lines(&[
            "credential.https://example.com.helper mycred",
        ]));
        assert_eq!(
            parsed,
            vec![CredentialSetting {
                scope: "credential.https://example.com".into(),
                key: "helper".into(),
                value: "mycred".into(),
            }]
        );
    }
}
