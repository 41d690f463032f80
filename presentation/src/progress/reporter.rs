//! Progress reporting for review batches

use audit_application::ports::progress::ProgressNotifier;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a review with one bar per batch
pub struct ProgressReporter {
    multi: MultiProgress,
    batch_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            batch_bar: Mutex::new(None),
        }
    }

    fn batch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_batch_start(&self, batch: usize, total_batches: usize, batch_size: usize) {
        let pb = self.multi.add(ProgressBar::new(batch_size as u64));
        pb.set_style(Self::batch_style());
        pb.set_prefix(format!("Batch {}/{}", batch, total_batches));
        pb.set_message("Assessing...");

        if let Ok(mut slot) = self.batch_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_record_complete(&self, index: usize, success: bool) {
        if let Ok(slot) = self.batch_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} record {}", "v".green(), index + 1)
            } else {
                format!("{} record {}", "x".red(), index + 1)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_batch_complete(&self, batch: usize) {
        if let Ok(mut slot) = self.batch_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{}", format!("Batch {} complete", batch).green()));
        }
    }

    fn on_pii_checked(&self, issue_count: usize, blocked: bool) {
        if blocked {
            let _ = self
                .multi
                .println(format!("{} PII check failed ({} issue(s))", "x".red(), issue_count));
        } else {
            let _ = self.multi.println(format!("{} PII check passed", "v".green()));
        }
    }
}
