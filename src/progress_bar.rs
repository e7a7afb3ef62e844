use indicatif::{MultiProgress, ProgressStyle};

const TEMPLATE: &str = "{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Per-file progress, drawn on the same `MultiProgress` the logger writes
/// through so log lines never tear the bar.
pub struct ProgressBar {
    inner: indicatif::ProgressBar,
}

impl ProgressBar {
    pub fn new(multi_progress: MultiProgress, prefix: &str, len: usize) -> Self {
        let inner = multi_progress.add(indicatif::ProgressBar::new(len as u64));

        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        inner.set_style(style);
        inner.set_prefix(prefix.to_string());

        Self { inner }
    }

    pub fn set_msg(&self, msg: &str) {
        self.inner.set_message(msg.to_string());
    }

    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    pub fn finish(&self) {
        self.inner.finish_and_clear();
    }
}
