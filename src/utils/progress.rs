// file: src/utils/progress.rs
// description: progress reporting while chunks are embedded into the index
// reference: uses indicatif for progress bars and tracks embedding counts

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub chunks_embedded: usize,
    pub chunks_total: usize,
    pub duration_secs: u64,
}

impl IndexStats {
    pub fn chunks_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.chunks_embedded as f64 / self.duration_secs as f64
    }
}

/// Progress bar over the chunks being embedded. Hidden unless explicitly enabled.
pub struct IndexProgress {
    bar: ProgressBar,
    total: usize,
    chunks_embedded: Arc<AtomicUsize>,
    start_time: Instant,
}

impl IndexProgress {
    pub fn new(total_chunks: usize, visible: bool) -> Self {
        let bar = ProgressBar::new(total_chunks as u64);
        if visible {
            bar.set_draw_target(ProgressDrawTarget::stderr());
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({eta}) {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▓▒░"),
            );
        } else {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }

        Self {
            bar,
            total: total_chunks,
            chunks_embedded: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_embedded(&self, source: &str) {
        self.chunks_embedded.fetch_add(1, Ordering::SeqCst);
        self.bar.set_message(source.to_string());
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Index built");
    }

    pub fn get_stats(&self) -> IndexStats {
        IndexStats {
            chunks_embedded: self.chunks_embedded.load(Ordering::SeqCst),
            chunks_total: self.total,
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }
}
