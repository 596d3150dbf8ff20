//! Simulation statistics collection and reporting.
//!
//! This module aggregates per-request responses over a run. It provides:
//! 1. **Cost:** Total and average cost units per request.
//! 2. **Hit breakdown:** Local, peer, coordinator-cache and disk outcomes.
//! 3. **Summary health:** Stale peer probes and summary refreshes.

use std::fmt::Write as _;
use std::time::Instant;

use crate::cluster::{Response, ServedBy};
use crate::common::constants::REPORT_RULE_WIDTH;

/// Simulation statistics structure tracking run-level metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Requests resolved.
    pub requests: u64,
    /// Sum of every request's cost, saturating at `u64::MAX`.
    pub total_cost: u64,
    /// Requests answered from the requester's own cache.
    pub local_hits: u64,
    /// Requests answered by a peer or the coordinator cache.
    pub global_hits: u64,
    /// Global hits answered by a peer.
    pub peer_hits: u64,
    /// Global hits answered by the coordinator cache.
    pub coordinator_hits: u64,
    /// Requests that went to disk.
    pub misses: u64,
    /// Peer probes that found a stale summary entry.
    pub stale_probes: u64,
    /// Summary refreshes, including the initial refresh after warm-up.
    pub summary_refreshes: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            requests: 0,
            total_cost: 0,
            local_hits: 0,
            global_hits: 0,
            peer_hits: 0,
            coordinator_hits: 0,
            misses: 0,
            stale_probes: 0,
            summary_refreshes: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"hits"`, `"cluster"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "hits", "cluster"];

/// `part / whole` as a percentage, zero when `whole` is zero.
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

impl SimStats {
    /// Folds one response into the totals.
    pub fn record(&mut self, response: &Response) {
        self.requests += 1;
        self.total_cost = self.total_cost.saturating_add(response.cost());
        self.local_hits += u64::from(response.local_hits());
        self.global_hits += u64::from(response.global_hits());
        self.misses += u64::from(response.misses());
        match response.served_by {
            ServedBy::Peer(_) => self.peer_hits += 1,
            ServedBy::Coordinator => self.coordinator_hits += 1,
            ServedBy::Local | ServedBy::Disk => {}
        }
    }

    /// Average cost per request (zero before any request).
    pub fn average_cost(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.total_cost as f64 / self.requests as f64
        }
    }

    /// Share of requests answered locally, in percent.
    pub fn local_hit_ratio(&self) -> f64 {
        percent(self.local_hits, self.requests)
    }

    /// Share of requests answered by a peer or the coordinator cache, in percent.
    pub fn global_hit_ratio(&self) -> f64 {
        percent(self.global_hits, self.requests)
    }

    /// Share of requests that went to disk, in percent.
    pub fn miss_ratio(&self) -> f64 {
        percent(self.misses, self.requests)
    }

    /// Renders the requested sections of the report.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"hits"` or
    /// `"cluster"`. An empty slice renders every section.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let heavy = "=".repeat(REPORT_RULE_WIDTH);
        let light = "-".repeat(REPORT_RULE_WIDTH);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "\n{heavy}");
        let _ = writeln!(out, "COOPERATIVE CACHING SIMULATION STATISTICS");
        let _ = writeln!(out, "{heavy}");

        if want("summary") {
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_requests             {}", self.requests);
            let _ = writeln!(out, "sim_cost                 {}", self.total_cost);
            let _ = writeln!(out, "sim_avg_cost             {:.4}", self.average_cost());
            let _ = writeln!(out, "{light}");
        }
        if want("hits") {
            let _ = writeln!(out, "HIT BREAKDOWN");
            let _ = writeln!(
                out,
                "  hits.local             {} ({:.2}%)",
                self.local_hits,
                self.local_hit_ratio()
            );
            let _ = writeln!(
                out,
                "  hits.global            {} ({:.2}%)",
                self.global_hits,
                self.global_hit_ratio()
            );
            let _ = writeln!(
                out,
                "    via.peer             {} ({:.2}%)",
                self.peer_hits,
                percent(self.peer_hits, self.requests)
            );
            let _ = writeln!(
                out,
                "    via.coordinator      {} ({:.2}%)",
                self.coordinator_hits,
                percent(self.coordinator_hits, self.requests)
            );
            let _ = writeln!(
                out,
                "  misses                 {} ({:.2}%)",
                self.misses,
                self.miss_ratio()
            );
            let _ = writeln!(out, "{light}");
        }
        if want("cluster") {
            let probes = self.peer_hits + self.stale_probes;
            let _ = writeln!(out, "CONTENT SUMMARIES");
            let _ = writeln!(out, "  probes.total           {probes}");
            let _ = writeln!(
                out,
                "  probes.stale           {} ({:.2}%)",
                self.stale_probes,
                percent(self.stale_probes, probes)
            );
            let _ = writeln!(out, "  summary.refreshes      {}", self.summary_refreshes);
        }
        let _ = writeln!(out, "{heavy}");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
