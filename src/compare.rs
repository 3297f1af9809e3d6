//! Side-by-side comparison of reports produced by different implementations.
//!
//! Reports are matched by test name. A skipped entry (error present or negative
//! duration) is carried with `-1` in every field and never counts as fastest.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{BenchError, Result};
use crate::output::load_report;
use crate::schema::{Report, SystemInfo};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub duration_ms: f64,
    pub memory_bytes: i64,
    pub ops_per_sec: f64,
    pub speed_ratio: f64,
}

impl TestResult {
    const UNMEASURED: TestResult = TestResult {
        duration_ms: -1.0,
        memory_bytes: -1,
        ops_per_sec: -1.0,
        speed_ratio: -1.0,
    };

    pub fn is_measured(&self) -> bool {
        self.duration_ms >= 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestComparison {
    pub test: String,
    pub results: BTreeMap<String, TestResult>,
    /// Empty when no implementation measured the test.
    pub fastest: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub total_time: f64,
    pub system: SystemInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub fastest_overall: String,
    pub slowest_overall: String,
    pub speed_difference: f64,
    pub total_times: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub timestamp: String,
    pub languages: BTreeMap<String, LanguageInfo>,
    pub test_comparisons: Vec<TestComparison>,
    pub summary: Summary,
}

/// Label part of `benchmark_<label>_<date>_<time>.json`.
pub fn label_from_filename(file_name: &str) -> Option<&str> {
    let stem = file_name.strip_prefix("benchmark_")?.strip_suffix(".json")?;
    let mut parts = stem.rsplitn(3, '_');
    let _time = parts.next()?;
    let _date = parts.next()?;
    parts.next().filter(|label| !label.is_empty())
}

/// Newest report file per label under each directory (searched two levels deep).
pub fn discover_reports(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut newest: BTreeMap<String, (SystemTime, PathBuf)> = BTreeMap::new();

    for dir in dirs {
        for entry in WalkDir::new(dir).max_depth(2).follow_links(false) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(label) = entry.file_name().to_str().and_then(label_from_filename) else {
                continue;
            };
            let modified = entry
                .metadata()?
                .modified()
                .unwrap_or(SystemTime::UNIX_EPOCH);

            // Equal mtimes fall back to the name, whose timestamp sorts chronologically.
            let candidate = (modified, entry.path().to_path_buf());
            let keep = newest.get(label).map_or(true, |seen| candidate > *seen);
            if keep {
                newest.insert(label.to_string(), candidate);
            }
        }
    }

    if newest.is_empty() {
        return Err(BenchError::NoReports);
    }
    Ok(newest.into_values().map(|(_, path)| path).collect())
}

/// Load every path; unreadable files are logged and left out.
pub fn load_reports(paths: &[PathBuf]) -> Vec<Report> {
    paths
        .iter()
        .filter_map(|path| match load_report(path) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping report");
                None
            }
        })
        .collect()
}

pub fn compare_reports(reports: &[Report]) -> Comparison {
    let mut languages = BTreeMap::new();
    let mut total_times = BTreeMap::new();
    for report in reports {
        languages.insert(
            report.language.clone(),
            LanguageInfo {
                total_time: report.total_time_seconds,
                system: report.system.clone(),
            },
        );
        total_times.insert(report.language.clone(), report.total_time_seconds);
    }

    // First-seen order keeps the suite order of the first report.
    let mut test_names: Vec<&str> = Vec::new();
    for report in reports {
        for test in &report.tests {
            if !test_names.contains(&test.name.as_str()) {
                test_names.push(&test.name);
            }
        }
    }

    let test_comparisons = test_names
        .into_iter()
        .map(|name| compare_test(name, reports))
        .collect();

    Comparison {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        languages,
        test_comparisons,
        summary: summarize(total_times),
    }
}

fn compare_test(name: &str, reports: &[Report]) -> TestComparison {
    let mut results = BTreeMap::new();
    let mut fastest: Option<(&str, f64)> = None;

    for report in reports {
        let Some(test) = report.tests.iter().find(|t| t.name == name) else {
            continue;
        };
        if test.is_skipped() {
            results.insert(report.language.clone(), TestResult::UNMEASURED);
            continue;
        }

        let duration_ms = test.duration_ns as f64 / 1e6;
        results.insert(
            report.language.clone(),
            TestResult {
                duration_ms,
                memory_bytes: test.memory_bytes,
                ops_per_sec: test.ops_per_sec,
                speed_ratio: 0.0,
            },
        );
        if fastest.map_or(true, |(_, best)| duration_ms < best) {
            fastest = Some((report.language.as_str(), duration_ms));
        }
    }

    if let Some((_, best)) = fastest {
        for result in results.values_mut().filter(|r| r.is_measured()) {
            result.speed_ratio = if best > 0.0 {
                result.duration_ms / best
            } else {
                1.0
            };
        }
    }

    TestComparison {
        test: name.to_string(),
        results,
        fastest: fastest.map(|(lang, _)| lang.to_string()).unwrap_or_default(),
    }
}

fn summarize(total_times: BTreeMap<String, f64>) -> Summary {
    let fastest = total_times
        .iter()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(lang, t)| (lang.clone(), *t));
    let slowest = total_times
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(lang, t)| (lang.clone(), *t));

    let (fastest_overall, min_time) = fastest.unwrap_or_default();
    let (slowest_overall, max_time) = slowest.unwrap_or_default();
    let speed_difference = if min_time > 0.0 {
        max_time / min_time
    } else {
        0.0
    };

    Summary {
        fastest_overall,
        slowest_overall,
        speed_difference,
        total_times,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_comparison(comp: &Comparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== LANGUAGE PERFORMANCE COMPARISON ===");
    let _ = writeln!(out, "Generated: {}\n", comp.timestamp);

    let _ = writeln!(out, "## Overall Results");
    let min_time = comp
        .summary
        .total_times
        .get(&comp.summary.fastest_overall)
        .copied()
        .unwrap_or(0.0);
    let mut by_time: Vec<(&String, &f64)> = comp.summary.total_times.iter().collect();
    by_time.sort_by(|a, b| a.1.total_cmp(b.1));
    for (lang, time) in by_time {
        let ratio = if min_time > 0.0 { time / min_time } else { 0.0 };
        let _ = writeln!(out, "{:<10}: {:.3}s (x{:.2})", capitalize(lang), time, ratio);
    }
    let _ = writeln!(out, "\nFastest: {}", capitalize(&comp.summary.fastest_overall));
    let _ = writeln!(out, "Speed difference: x{:.2}\n", comp.summary.speed_difference);

    let _ = writeln!(out, "## Test-by-Test Comparison");
    for test in &comp.test_comparisons {
        let _ = writeln!(out, "\n### {}", test.test);
        let _ = writeln!(out, "Fastest: {}", capitalize(&test.fastest));

        // Measured entries by duration, unmeasured ones last.
        let mut rows: Vec<(&String, &TestResult)> = test.results.iter().collect();
        rows.sort_by(|a, b| match (a.1.is_measured(), b.1.is_measured()) {
            (true, true) => a.1.duration_ms.total_cmp(&b.1.duration_ms),
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            (false, false) => std::cmp::Ordering::Equal,
        });

        for (lang, r) in rows {
            if r.is_measured() {
                let _ = writeln!(
                    out,
                    "{:<10}: {:>8.2}ms (x{:.2}) | {:>10} bytes | {:>12.0} ops/sec",
                    capitalize(lang),
                    r.duration_ms,
                    r.speed_ratio,
                    r.memory_bytes,
                    r.ops_per_sec
                );
            } else {
                let _ = writeln!(out, "{:<10}: not measured (skipped)", capitalize(lang));
            }
        }
    }
    out
}

/// `comparison_<YYYYmmdd_HHMMSS>.json` in `dir`.
pub fn comparison_path(dir: &Path) -> PathBuf {
    dir.join(format!("comparison_{}.json", Utc::now().format("%Y%m%d_%H%M%S")))
}
