use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Translation completeness checks for `vacancyscope-ui`.
///
/// - every key referenced through `t!("...")` in `src/` exists in en-US;
/// - every other locale defines every en-US key, without duplicates.
///
/// Key extraction is a line heuristic (`key = ...`), enough for our catalogs.
/// To add a locale, create `i18n/<locale>/vacancyscope-ui.ftl` with all keys
/// from en-US and register it in `LOCALES`.
const EN_US: &str = include_str!("../i18n/en-US/vacancyscope-ui.ftl");
const LOCALES: &[(&str, &str)] = &[("ru-RU", include_str!("../i18n/ru-RU/vacancyscope-ui.ftl"))];

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Message keys in definition order; duplicates included.
fn key_lines(src: &str) -> Vec<String> {
    src.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('.'))
        .filter(|line| !line.starts_with('-') && !line.starts_with('*') && !line.starts_with('['))
        .filter_map(|line| {
            let (left, _) = line.split_once('=')?;
            let key = left.trim();
            (!key.is_empty() && key.chars().all(valid_key_char)).then(|| key.to_string())
        })
        .collect()
}

fn extract_keys(src: &str) -> HashSet<String> {
    key_lines(src).into_iter().collect()
}

fn assert_no_dup_keys(src: &str, locale: &str) {
    let mut seen = HashSet::new();
    let dups: BTreeSet<String> = key_lines(src)
        .into_iter()
        .filter(|key| !seen.insert(key.clone()))
        .collect();
    assert!(
        dups.is_empty(),
        "Duplicate key definitions in {locale}:\n  {}",
        dups.into_iter().collect::<Vec<_>>().join("\n  ")
    );
}

/// Literal first arguments of `t!("...")` under `root`.
fn referenced_keys(root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|e| e.path()));
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        for chunk in content.split("t!(\"").skip(1) {
            if let Some(end) = chunk.find('"') {
                let key = &chunk[..end];
                if !key.is_empty() && key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
            }
        }
    }

    found
}

#[test]
fn referenced_keys_exist_in_fallback() {
    let fallback = extract_keys(EN_US);
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let referenced = referenced_keys(&src_root);
    assert!(!referenced.is_empty(), "no t!(...) usages found under {src_root:?}");

    let missing: Vec<&String> = referenced.iter().filter(|k| !fallback.contains(*k)).collect();
    assert!(
        missing.is_empty(),
        "Referenced translation keys missing in en-US ({}):\n{}",
        missing.len(),
        missing.iter().map(|k| k.as_str()).collect::<Vec<_>>().join("\n")
    );
}

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback_keys = extract_keys(EN_US);
    assert!(!fallback_keys.is_empty(), "Fallback (en-US) contains no keys.");
    assert_no_dup_keys(EN_US, "en-US");

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        assert_no_dup_keys(src, locale);

        let keys = extract_keys(src);
        let missing: BTreeSet<&String> = fallback_keys.iter().filter(|k| !keys.contains(*k)).collect();
        if !missing.is_empty() {
            failures.push(format!(
                "Locale {locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing.into_iter().cloned().collect::<Vec<_>>().join("\n  ")
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "Translation completeness check failed:\n\n{}\n\nHint: copy the missing keys from en-US, then translate.",
            failures.join("\n\n")
        );
    }
}

#[test]
fn locale_folders_match_registered_locales() {
    let i18n_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("i18n");
    let mut on_disk: Vec<String> = fs::read_dir(&i18n_root)
        .expect("i18n directory")
        .flatten()
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    on_disk.sort();

    let mut registered: Vec<String> = LOCALES.iter().map(|(l, _)| l.to_string()).collect();
    registered.push("en-US".into());
    registered.sort();

    assert_eq!(on_disk, registered);
}
