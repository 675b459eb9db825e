//! Configuration discovery and effective settings resolution.
//!
//! shlint scans the requested directory (default: the current directory) and
//! reads `shlint.toml|yaml|yml` from it or its closest ancestor holding one
//! (or a `.git`). The file is merged with CLI flags into an `Effective` config.
//! Defaults:
//! - `tools`: `shfmt`, `shellcheck`, `reviewdog`, `patch`, `git`
//! - `output`: `human`
//! - `linter.external_sources`: true (`shellcheck -x`)
//! - `discover.vcs`: true
//! - `reporter`: `shellcheck` / `github-pr-review` / `warning`
//! - `fix.strip`: 1
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use crate::reporter::ReporterSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_TOML: &str = "shlint.toml";
const CONFIG_YAML: [&str; 2] = ["shlint.yaml", "shlint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Tool names or paths under `[tools]`.
pub struct ToolsCfg {
    pub formatter: Option<String>,
    pub linter: Option<String>,
    pub reporter: Option<String>,
    pub patch: Option<String>,
    pub git: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Linter invocation under `[linter]`.
pub struct LinterCfg {
    #[serde(default)]
    pub args: Option<Vec<String>>,
    /// Pass `-x` so sourced files are followed.
    pub external_sources: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Script discovery under `[discover]`.
pub struct DiscoverCfg {
    /// Ask git for ignore rules when the root is a work tree.
    pub vcs: Option<bool>,
    /// Extra globs, relative to the scanned directory, that are never linted.
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Review reporter settings under `[reporter]`.
pub struct ReporterCfg {
    pub name: Option<String>,
    pub reporter: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Autofix settings under `[fix]`.
pub struct FixCfg {
    /// Leading path components `patch` strips from the linter diff.
    pub strip: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `shlint.toml|yaml`.
pub struct ShlintConfig {
    pub output: Option<String>,
    #[serde(default)]
    pub tools: Option<ToolsCfg>,
    #[serde(default)]
    pub linter: Option<LinterCfg>,
    #[serde(default)]
    pub discover: Option<DiscoverCfg>,
    #[serde(default)]
    pub reporter: Option<ReporterCfg>,
    #[serde(default)]
    pub fix: Option<FixCfg>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Resolved executable names.
pub struct ToolNames {
    pub formatter: String,
    pub linter: String,
    pub reporter: String,
    pub patch: String,
    pub git: String,
}

impl Default for ToolNames {
    fn default() -> Self {
        Self {
            formatter: "shfmt".to_string(),
            linter: "shellcheck".to_string(),
            reporter: "reviewdog".to_string(),
            patch: "patch".to_string(),
            git: "git".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    /// Directory whose scripts are discovered, linted, and fixed.
    pub scan_root: PathBuf,
    /// Directory the config file was looked up in.
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub output: String,
    pub tools: ToolNames,
    pub linter_args: Vec<String>,
    pub external_sources: bool,
    pub use_vcs: bool,
    pub exclude: Vec<String>,
    pub reporter: ReporterSettings,
    pub strip: u32,
}

impl Effective {
    /// Defaults for scanning `root` with no config file.
    pub fn defaults(root: PathBuf) -> Self {
        Self {
            scan_root: root.clone(),
            repo_root: root,
            config_found: false,
            output: "human".to_string(),
            tools: ToolNames::default(),
            linter_args: Vec::new(),
            external_sources: true,
            use_vcs: true,
            exclude: Vec::new(),
            reporter: ReporterSettings::default(),
            strip: 1,
        }
    }
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `shlint.toml|yaml|yml` or a `.git` entry is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if has_config(cur) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

fn has_config(dir: &Path) -> bool {
    dir.join(CONFIG_TOML).exists() || CONFIG_YAML.iter().any(|y| dir.join(y).exists())
}

/// Load `ShlintConfig` from `shlint.toml` or `shlint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<ShlintConfig>> {
    let toml_path = root.join(CONFIG_TOML);
    if toml_path.exists() {
        let s = read(&toml_path)?;
        let cfg = toml::from_str(&s).map_err(|e| Error::Config {
            path: toml_path.clone(),
            details: e.message().to_string(),
        })?;
        return Ok(Some(cfg));
    }
    for yml in CONFIG_YAML {
        let p = root.join(yml);
        if p.exists() {
            let s = read(&p)?;
            let cfg = serde_yaml::from_str(&s).map_err(|e| Error::Config {
                path: p.clone(),
                details: e.to_string(),
            })?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// A relative `cli_repo_root` is taken from the current directory.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_no_vcs: bool,
) -> Result<Effective> {
    let cwd = std::env::current_dir().map_err(|e| Error::Discovery {
        details: format!("cannot read the current directory: {e}"),
    })?;
    resolve_effective_in(&cwd, cli_repo_root, cli_output, cli_no_vcs)
}

/// Same as [`resolve_effective`] with relative roots taken from `base`.
pub fn resolve_effective_in(
    base: &Path,
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_no_vcs: bool,
) -> Result<Effective> {
    let requested = base.join(cli_repo_root.unwrap_or("."));
    let scan_root = requested.canonicalize().map_err(|e| Error::Discovery {
        details: format!("cannot resolve {}: {e}", requested.display()),
    })?;
    let repo_root = detect_repo_root(&scan_root);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();
    let mut eff = Effective::defaults(scan_root);
    eff.repo_root = repo_root;
    eff.config_found = config_found;

    if let Some(output) = cli_output.map(str::to_string).or(cfg.output) {
        eff.output = output;
    }

    let tools = cfg.tools.unwrap_or_default();
    let defaults = ToolNames::default();
    eff.tools = ToolNames {
        formatter: tools.formatter.unwrap_or(defaults.formatter),
        linter: tools.linter.unwrap_or(defaults.linter),
        reporter: tools.reporter.unwrap_or(defaults.reporter),
        patch: tools.patch.unwrap_or(defaults.patch),
        git: tools.git.unwrap_or(defaults.git),
    };

    if let Some(linter) = cfg.linter {
        eff.linter_args = linter.args.unwrap_or_default();
        eff.external_sources = linter.external_sources.unwrap_or(true);
    }

    let discover = cfg.discover.unwrap_or_default();
    eff.use_vcs = !cli_no_vcs && discover.vcs.unwrap_or(true);
    eff.exclude = discover.exclude.unwrap_or_default();

    if let Some(rep) = cfg.reporter {
        let d = ReporterSettings::default();
        eff.reporter = ReporterSettings {
            name: rep.name.unwrap_or(d.name),
            reporter: rep.reporter.unwrap_or(d.reporter),
            level: rep.level.unwrap_or(d.level),
        };
    }

    eff.strip = cfg.fix.and_then(|f| f.strip).unwrap_or(1);
    Ok(eff)
}
