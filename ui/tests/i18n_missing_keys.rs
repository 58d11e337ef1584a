//! Locale parity: every non-fallback locale defines exactly the fallback's
//! message ids, and each message uses the same `{ $variables }`. A missing
//! variable renders as a literal placeholder at runtime, which the
//! compile-time key check does not see.
//!
//! Adding a locale: create `ui/i18n/<locale>/worklet-dash-ui.ftl` and register
//! it in `LOCALES`.

use std::collections::{BTreeMap, BTreeSet};

const FALLBACK: &str = include_str!("../i18n/en-US/worklet-dash-ui.ftl");

const LOCALES: &[(&str, &str)] = &[(
    "es-ES",
    include_str!("../i18n/es-ES/worklet-dash-ui.ftl"),
)];

/// Message id → variables referenced in its value.
fn messages(ftl: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut out = BTreeMap::new();
    for line in ftl.lines() {
        if line.starts_with(char::is_whitespace) || line.starts_with('#') || line.starts_with('-')
        {
            continue;
        }
        let Some((id, value)) = line.split_once('=') else {
            continue;
        };
        let id = id.trim();
        if id.is_empty() || id.contains(' ') {
            continue;
        }
        let previous = out.insert(id.to_string(), variables(value));
        assert!(previous.is_none(), "message `{id}` is defined twice");
    }
    out
}

fn variables(value: &str) -> BTreeSet<String> {
    value
        .split('$')
        .skip(1)
        .filter_map(|tail| {
            let name: String = tail
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect();
            (!name.is_empty()).then_some(name)
        })
        .collect()
}

#[test]
fn every_locale_matches_the_fallback() {
    let fallback = messages(FALLBACK);
    assert!(!fallback.is_empty(), "fallback (en-US) contains no messages");

    let mut failures = Vec::new();
    for (locale, source) in LOCALES {
        let translated = messages(source);

        for (id, vars) in &fallback {
            match translated.get(id) {
                None => failures.push(format!("{locale}: missing `{id}`")),
                Some(found) if found != vars => failures.push(format!(
                    "{locale}: `{id}` uses {found:?}, fallback uses {vars:?}"
                )),
                Some(_) => {}
            }
        }
        for id in translated.keys().filter(|id| !fallback.contains_key(*id)) {
            failures.push(format!("{locale}: `{id}` does not exist in en-US"));
        }
    }

    assert!(
        failures.is_empty(),
        "translation parity check failed:\n  {}",
        failures.join("\n  ")
    );
}

#[test]
fn export_messages_carry_their_placeholders() {
    let fallback = messages(FALLBACK);
    let saved = &fallback["export-saved"];
    assert!(saved.contains("format") && saved.contains("path"));
    assert!(fallback["export-failed"].contains("reason"));
}
