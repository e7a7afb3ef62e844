/// Maps any file whose name contains one of `patterns` (case-insensitively)
/// to the canonical `target` name.
#[derive(Debug, Clone, Copy)]
pub struct RenameRule {
    pub patterns: &'static [&'static str],
    pub target: &'static str,
}

impl RenameRule {
    pub const fn new(patterns: &'static [&'static str], target: &'static str) -> Self {
        Self { patterns, target }
    }

    /// First pattern, used to identify the rule in reports.
    pub fn label(&self) -> &'static str {
        self.patterns.first().copied().unwrap_or(self.target)
    }
}

/// Applied top to bottom. A file claimed by an earlier rule has already been
/// renamed by the time later rules scan the directory.
pub const RENAME_RULES: &[RenameRule] = &[
    RenameRule::new(&["Внешний вид", "Экстерьер1"], "exterior-01.jpg"),
    RenameRule::new(&["Экстерьер2"], "exterior-02.jpg"),
    RenameRule::new(&["Экстерьер3"], "exterior-03.jpg"),
    RenameRule::new(&["Экстерьер4"], "exterior-04.jpg"),
    RenameRule::new(&["экстерьер5"], "exterior-05.jpg"),
    RenameRule::new(&["Экстерьер 6", "Экстерьер6"], "exterior-06.jpg"),
    RenameRule::new(&["Интерьер1"], "interior-01.jpg"),
    RenameRule::new(&["Интерьер2"], "interior-02.jpg"),
    RenameRule::new(&["Интерьер3"], "interior-03.jpg"),
    RenameRule::new(&["Интерьер4"], "interior-04.jpg"),
    RenameRule::new(&["Лого"], "logo-kaltan.png"),
    RenameRule::new(&["Политика"], "privacy-policy.txt"),
    RenameRule::new(&["Пользовательское"], "user-agreement.txt"),
];
