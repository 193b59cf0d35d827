//! Project-wide totals and month-by-month production trends.

use std::collections::HashSet;

use dredge_core::models::{DredgeRecord, MaterialTally, MaterialVolume};
use serde::Serialize;

/// Dashboard totals over every record of a project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub total_volume: f64,
    pub avg_depth: f64,
    pub record_count: usize,
    /// Distinct vessel names
    pub vessel_count: usize,
    /// Volume per material in first-appearance order
    pub material_distribution: Vec<MaterialVolume>,
}

pub fn project_summary(records: &[DredgeRecord]) -> ProjectSummary {
    let mut tally = MaterialTally::new();
    let mut vessels = HashSet::new();
    let mut total_volume = 0.0;
    let mut depth_sum = 0.0;

    for record in records {
        total_volume += record.volume;
        depth_sum += record.depth;
        vessels.insert(record.vessel_name.as_str());
        tally.add(record.material, record.volume);
    }

    let avg_depth = if records.is_empty() { 0.0 } else { depth_sum / records.len() as f64 };

    ProjectSummary {
        total_volume,
        avg_depth,
        record_count: records.len(),
        vessel_count: vessels.len(),
        material_distribution: tally.entries().to_vec(),
    }
}

/// Production within one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    /// `YYYY-MM` in UTC
    pub month: String,
    pub volume: f64,
    /// Running total including this month
    pub cumulative_volume: f64,
    pub avg_depth: f64,
    pub count: usize,
    pub materials: Vec<MaterialVolume>,
}

/// Records grouped by calendar month, oldest month first
pub fn monthly_trends(records: &[DredgeRecord]) -> Vec<MonthlyTrend> {
    let mut sorted: Vec<&DredgeRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.timestamp);

    let mut trends: Vec<MonthlyTrend> = Vec::new();
    let mut tallies: Vec<MaterialTally> = Vec::new();
    let mut depth_sums: Vec<f64> = Vec::new();
    let mut cumulative = 0.0;

    for record in sorted {
        let month = record.timestamp.format("%Y-%m").to_string();
        if trends.last().map(|trend| trend.month.as_str()) != Some(month.as_str()) {
            trends.push(MonthlyTrend {
                month,
                volume: 0.0,
                cumulative_volume: 0.0,
                avg_depth: 0.0,
                count: 0,
                materials: Vec::new(),
            });
            tallies.push(MaterialTally::new());
            depth_sums.push(0.0);
        }

        cumulative += record.volume;
        let index = trends.len() - 1;
        let trend = &mut trends[index];
        trend.volume += record.volume;
        trend.cumulative_volume = cumulative;
        trend.count += 1;
        depth_sums[index] += record.depth;
        tallies[index].add(record.material, record.volume);
    }

    for ((trend, tally), depth_sum) in trends.iter_mut().zip(tallies).zip(depth_sums) {
        trend.avg_depth = depth_sum / trend.count as f64;
        trend.materials = tally.entries().to_vec();
    }

    trends
}

/// Month with the largest volume; on ties the later month wins
pub fn peak_month(trends: &[MonthlyTrend]) -> Option<&MonthlyTrend> {
    trends.iter().reduce(|peak, trend| if peak.volume > trend.volume { peak } else { trend })
}

/// Total volume spread evenly over the months that have data
pub fn average_monthly_volume(trends: &[MonthlyTrend]) -> f64 {
    if trends.is_empty() {
        return 0.0;
    }
    trends.iter().map(|trend| trend.volume).sum::<f64>() / trends.len() as f64
}
