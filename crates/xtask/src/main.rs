use anyhow::Context;
use serde::Deserialize;

/// Crates whose presence in the domain crate means I/O or UI leaked in.
const FORBIDDEN_DOMAIN_DEPS: &[&str] = &[
    "dioxus",
    "dioxus-desktop",
    "reqwest",
    "tokio",
    "sysinfo",
    "directories",
    "tracing-subscriber",
];

const DOMAIN_CRATE: &str = "questlens-domain";

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata output")?;

    let violations = domain_violations(&metadata)?;
    if !violations.is_empty() {
        anyhow::bail!(
            "{DOMAIN_CRATE} must stay free of I/O and UI crates, found: {}",
            violations.join(", ")
        );
    }

    println!("arch-check passed: {DOMAIN_CRATE} has no forbidden dependencies");
    Ok(())
}

fn domain_violations(metadata: &Metadata) -> anyhow::Result<Vec<String>> {
    let domain = metadata
        .packages
        .iter()
        .find(|p| p.name == DOMAIN_CRATE)
        .with_context(|| format!("{DOMAIN_CRATE} not found in workspace"))?;

    Ok(domain
        .dependencies
        .iter()
        .filter(|dep| FORBIDDEN_DOMAIN_DEPS.contains(&dep.name.as_str()))
        .map(|dep| dep.name.clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(deps: &[&str]) -> Metadata {
        let deps: Vec<_> = deps.iter().map(|d| serde_json::json!({ "name": d })).collect();
        serde_json::from_value(serde_json::json!({
            "packages": [
                { "name": "questlens-overlay", "dependencies": [{ "name": "dioxus" }] },
                { "name": DOMAIN_CRATE, "dependencies": deps },
            ]
        }))
        .expect("metadata")
    }

    #[test]
    fn clean_domain_passes() {
        let violations = domain_violations(&metadata(&["serde", "thiserror"])).expect("check");
        assert!(violations.is_empty());
    }

    #[test]
    fn leaked_runtime_crates_are_reported() {
        let violations =
            domain_violations(&metadata(&["serde", "tokio", "reqwest"])).expect("check");
        assert_eq!(violations, vec!["tokio".to_string(), "reqwest".to_string()]);
    }

    #[test]
    fn missing_domain_crate_is_an_error() {
        let empty = Metadata {
            packages: Vec::new(),
        };
        assert!(domain_violations(&empty).is_err());
    }
}
