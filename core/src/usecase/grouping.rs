use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::model::health_day::DailyHealthRecord;
use crate::model::summary::{MonthlySummary, WeeklySummary};
use crate::time::{MonthKey, WeekKey};

fn date_span(days: &[DailyHealthRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let first = days.iter().map(|d| d.date).min()?;
    let last = days.iter().map(|d| d.date).max()?;
    Some((first, last))
}

/// Buckets days by ISO week in one pass and summarises each week, oldest first.
pub fn group_by_week(days: Vec<DailyHealthRecord>) -> Result<Vec<WeeklySummary>> {
    let Some(span) = date_span(&days) else {
        return Ok(Vec::new());
    };

    // Keys order like their Mondays.
    let mut weeks: BTreeMap<WeekKey, Vec<DailyHealthRecord>> = BTreeMap::new();
    for day in days {
        weeks.entry(day.week()).or_default().push(day);
    }

    let mut summaries = Vec::with_capacity(weeks.len());
    for (key, mut week_days) in weeks {
        week_days.sort_by_key(|d| d.date);
        summaries.push(WeeklySummary::new(key, week_days, span)?);
    }
    summaries.sort_by_key(|w| w.first_day);

    debug!(weeks = summaries.len(), "grouped days into weeks");
    Ok(summaries)
}

pub fn group_by_month(days: Vec<DailyHealthRecord>) -> Result<Vec<MonthlySummary>> {
    let Some(span) = date_span(&days) else {
        return Ok(Vec::new());
    };

    let mut months: BTreeMap<MonthKey, Vec<DailyHealthRecord>> = BTreeMap::new();
    for day in days {
        months.entry(MonthKey::of(day.date)).or_default().push(day);
    }

    let mut summaries = Vec::with_capacity(months.len());
    for (key, mut month_days) in months {
        month_days.sort_by_key(|d| d.date);
        summaries.push(MonthlySummary::new(key, month_days, span)?);
    }

    debug!(months = summaries.len(), "grouped days into months");
    Ok(summaries)
}
