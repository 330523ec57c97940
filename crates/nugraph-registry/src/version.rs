//! Mapping an identity's version string to the concrete version a feed stores.
//!
//! Identities keep whatever the manifest declared (often a range). Feeds are
//! addressed by normalized exact versions, so a range is mapped to its
//! inclusive lower bound, which is the version NuGet itself would pick.

/// Normalize an exact NuGet version the way the flat container expects it.
///
/// Lowercases, drops build metadata, strips leading zeros, pads to three
/// components and drops a zero fourth component:
/// `1.0` → `1.0.0`, `1.02.3.0` → `1.2.3`, `1.0.0-Beta+sha` → `1.0.0-beta`.
pub fn normalize(version: &str) -> String {
    let version = version.trim();
    let without_meta = version.split('+').next().unwrap_or(version);
    let (release, pre) = match without_meta.split_once('-') {
        Some((r, p)) => (r, Some(p)),
        None => (without_meta, None),
    };

    let mut parts: Vec<String> = release
        .split('.')
        .map(|p| match p.parse::<u64>() {
            Ok(n) => n.to_string(),
            Err(_) => p.to_string(),
        })
        .collect();
    while parts.len() < 3 {
        parts.push("0".to_string());
    }
    if parts.len() == 4 && parts[3] == "0" {
        parts.truncate(3);
    }

    let mut out = parts.join(".");
    if let Some(pre) = pre {
        out.push('-');
        out.push_str(pre);
    }
    out.to_ascii_lowercase()
}

/// The normalized version to fetch for a declared version or range.
///
/// Returns an error message for specs with no inclusive lower bound
/// (`(1.0, )`, `(, 2.0]`), floating versions (`1.*`), or an empty spec.
pub fn fetch_version(spec: &str) -> Result<String, String> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err("no version specified".to_string());
    }
    if spec.contains('*') {
        return Err(format!("floating version `{spec}` has no fixed version"));
    }

    match spec.chars().next() {
        Some('[') => {
            let inner = spec
                .trim_start_matches('[')
                .trim_end_matches([']', ')'])
                .trim();
            let lower = inner.split(',').next().unwrap_or("").trim();
            if lower.is_empty() {
                Err(format!("range `{spec}` has no lower bound"))
            } else {
                Ok(normalize(lower))
            }
        }
        Some('(') => Err(format!("range `{spec}` has no inclusive lower bound")),
        _ => Ok(normalize(spec)),
    }
}
