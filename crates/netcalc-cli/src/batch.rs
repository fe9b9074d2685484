//! Parallel batch processing using Rayon
//!
//! Each input line is calculated independently:
//! - `ip/prefix` lines go through CIDR parsing
//! - `ip mask` lines go through the mask form
//! - a failing line yields an error entry and never stops the batch
//!
//! Results come back in input order.

use anyhow::Result;
use rayon::prelude::*;
use std::io::BufRead;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use netcalc_cidr::{SubnetCalculator, SubnetRecord};
use netcalc_core::NetcalcError;

/// Outcome for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub input: String,
    pub result: Result<SubnetRecord, String>,
}

impl BatchResult {
    fn new(input: String, result: netcalc_core::Result<SubnetRecord>) -> Self {
        Self {
            input,
            result: result.map_err(|e| e.to_string()),
        }
    }
}

/// Calculate a single CIDR argument
pub fn calculate_cidr(calculator: &SubnetCalculator, cidr: &str) -> BatchResult {
    let result = calculator.calculate(cidr).map(SubnetRecord::from);
    BatchResult::new(cidr.to_string(), result)
}

/// Calculate a single address/mask pair
pub fn calculate_pair(calculator: &SubnetCalculator, address: &str, mask: &str) -> BatchResult {
    let result = calculator
        .calculate_pair(address, mask)
        .map(SubnetRecord::from);
    BatchResult::new(format!("{} {}", address, mask), result)
}

/// Calculate one batch line, either `ip/prefix` or `ip mask`
pub fn calculate_line(calculator: &SubnetCalculator, line: &str) -> BatchResult {
    let mut parts = line.split_whitespace();

    let result = match (parts.next(), parts.next(), parts.next()) {
        (Some(cidr), None, _) => calculator.calculate(cidr),
        (Some(address), Some(mask), None) => calculator.calculate_pair(address, mask),
        _ => Err(NetcalcError::InvalidNotation(format!(
            "{} (expected 'ip/prefix' or 'ip mask')",
            line.trim()
        ))),
    };

    BatchResult::new(line.trim().to_string(), result.map(SubnetRecord::from))
}

/// Collect input lines, skipping blanks and `#` comments
pub fn read_inputs<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        inputs.push(trimmed.to_string());
    }
    Ok(inputs)
}

/// Batch processor with parallel execution
pub struct BatchProcessor {
    calculator: SubnetCalculator,
    thread_pool: rayon::ThreadPool,
}

impl BatchProcessor {
    /// Create a new batch processor
    ///
    /// # Arguments
    ///
    /// * `calculator` - Calculator (and policy) applied to every line
    /// * `num_threads` - Number of threads (default: CPU cores)
    pub fn new(calculator: SubnetCalculator, num_threads: Option<usize>) -> Result<Self> {
        let num_threads = num_threads.unwrap_or_else(num_cpus::get).max(1);

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        Ok(Self {
            calculator,
            thread_pool,
        })
    }

    /// Process batch lines in parallel
    pub fn process(&self, lines: Vec<String>) -> Vec<BatchResult> {
        let total = lines.len();
        let processed = AtomicUsize::new(0);

        self.thread_pool.install(|| {
            lines
                .into_par_iter()
                .map(|line| {
                    let result = calculate_line(&self.calculator, &line);

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % 1000 == 0 || count == total {
                        debug!("Processed {}/{} inputs", count, total);
                    }

                    result
                })
                .collect()
        })
    }

    /// Get thread pool info
    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}
