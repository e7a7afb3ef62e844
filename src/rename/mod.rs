use anyhow::{Context, Result, bail};
use fs_err as fs;
use std::{
    fmt,
    path::{Path, PathBuf},
};

pub mod rules;

pub use rules::{RENAME_RULES, RenameRule};

/// What happened to a single rule during a rename run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// No file in the directory matched any of the rule's patterns
    NotFound,
    /// The matched file already carries the canonical name
    AlreadyRenamed,
    /// A different file already occupies the canonical name
    TargetExists { matched: String },
    /// The matched file was moved to the canonical name
    Renamed { from: String },
}

#[derive(Debug, Default)]
pub struct RenameReport {
    pub outcomes: Vec<(RenameRule, RuleOutcome)>,
}

impl RenameReport {
    pub fn renamed(&self) -> usize {
        self.count(|outcome| matches!(outcome, RuleOutcome::Renamed { .. }))
    }

    pub fn not_found(&self) -> usize {
        self.count(|outcome| matches!(outcome, RuleOutcome::NotFound))
    }

    fn count(&self, pred: impl Fn(&RuleOutcome) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| pred(outcome))
            .count()
    }
}

impl fmt::Display for RenameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Renamed: {}", self.renamed())?;
        write!(f, "Not found: {}", self.not_found())
    }
}

/// Extensions that restrict which files a rule may claim. Targets with any
/// other extension (notably `.jpg`) match regardless of the file's extension.
const FILTERED_EXTENSIONS: &[&str] = &["png", "txt"];

fn required_suffix(target: &str) -> Option<String> {
    Path::new(target)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| FILTERED_EXTENSIONS.contains(ext))
        .map(|ext| format!(".{ext}"))
}

/// Finds the first file in `dir` whose name contains any of the rule's
/// patterns, ignoring case.
///
/// Entries are visited in the order the filesystem returns them, so when
/// several files could match, the platform decides which one wins.
pub fn find_match(dir: &Path, rule: &RenameRule) -> Result<Option<PathBuf>> {
    let suffix = required_suffix(rule.target);
    let patterns: Vec<String> = rule.patterns.iter().map(|p| p.to_lowercase()).collect();

    for entry in fs::read_dir(dir)? {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            log::debug!("Skipping non UTF-8 file name {}", path.display());
            continue;
        };
        let lowered = file_name.to_lowercase();

        if let Some(suffix) = &suffix {
            if !lowered.ends_with(suffix.as_str()) {
                continue;
            }
        }

        if patterns.iter().any(|pattern| lowered.contains(pattern.as_str())) {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

fn apply_rule(dir: &Path, rule: &RenameRule) -> Result<RuleOutcome> {
    let Some(found) = find_match(dir, rule)? else {
        log::warn!("File not found for: {} -> {}", rule.label(), rule.target);
        return Ok(RuleOutcome::NotFound);
    };

    let found_name = found
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if found_name == rule.target {
        log::info!("Already renamed: {}", rule.target);
        return Ok(RuleOutcome::AlreadyRenamed);
    }

    let target = dir.join(rule.target);
    if target.exists() {
        log::warn!(
            "Target already exists: {} (leaving {} in place)",
            rule.target,
            found_name
        );
        return Ok(RuleOutcome::TargetExists {
            matched: found_name,
        });
    }

    fs::rename(&found, &target)?;
    log::info!("Renamed: {} -> {}", found_name, rule.target);

    Ok(RuleOutcome::Renamed { from: found_name })
}

/// Applies every rule in order against `dir`, re-scanning the directory for
/// each rule.
///
/// Fails before touching anything if `dir` does not exist. A failed rename
/// aborts the remaining rules.
pub fn rename_assets(dir: &Path, rules: &[RenameRule]) -> Result<RenameReport> {
    if !dir.is_dir() {
        bail!(
            "Asset directory not found: {}. Check the path to the asset folder.",
            dir.display()
        );
    }

    log::info!(
        "Searching for files in {}",
        std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf()).display()
    );

    let mut report = RenameReport::default();
    for rule in rules {
        let outcome = apply_rule(dir, rule)
            .with_context(|| format!("Failed to apply rename rule for {}", rule.target))?;
        report.outcomes.push((*rule, outcome));
    }

    Ok(report)
}
