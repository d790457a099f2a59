//! Overdue/wait calculator: how long since an operator was last on a
//! featured or shop banner, and how often that normally happens.

use crate::db::DataRepository;
use crate::models::{
    days_since, delta_to_days, BannerCategory, Elapsed, Operator, Region, Timestamp,
};

/// One row of an overdue ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverdueEntry<'a> {
    pub operator: &'a Operator,
    pub wait: Elapsed,
    /// Wait is longer than the category average.
    pub exceeds_average: bool,
}

/// Whether `wait` is past `average` days. `Never` exceeds any average; with
/// no average nothing is flagged.
pub fn exceeds_average(wait: Elapsed, average: Option<f64>) -> bool {
    match (wait, average) {
        (_, None) => false,
        (Elapsed::Never, Some(_)) => true,
        (Elapsed::Days(days), Some(avg)) => days as f64 > avg,
    }
}

/// Days since the end of the operator's last `category` banner in `region`,
/// `Never` if it has not appeared there.
pub fn last_occurrence_wait(
    op: &Operator,
    region: Region,
    category: BannerCategory,
    now: Timestamp,
) -> Elapsed {
    op.appearances(region, category)
        .last()
        .map_or(Elapsed::Never, |banner| {
            Elapsed::Days(days_since(banner.end, now))
        })
}

/// Non-limited operators of `rarity` released in `region`, most overdue
/// first. Equal waits keep chronological order. Entries waiting longer than
/// [`category_average`] are flagged.
pub fn overdue_set<R>(
    repo: &R,
    region: Region,
    rarity: u8,
    category: BannerCategory,
    now: Timestamp,
) -> Vec<OverdueEntry<'_>>
where
    R: DataRepository + ?Sized,
{
    let average = category_average(repo, region, rarity, category);
    let mut entries: Vec<OverdueEntry<'_>> = repo
        .chronological(region)
        .into_iter()
        .filter(|op| op.rarity == rarity && !op.limited)
        .map(|op| {
            let wait = last_occurrence_wait(op, region, category, now);
            OverdueEntry {
                operator: op,
                wait,
                exceeds_average: exceeds_average(wait, average),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.wait.cmp(&a.wait));
    entries
}

/// Average whole days between consecutive `category` appearances, measured
/// from the first banner's start to the last banner's end. `None` with fewer
/// than two appearances.
pub fn average_interval(op: &Operator, region: Region, category: BannerCategory) -> Option<i64> {
    let appearances = op.appearances(region, category);
    let (first, last) = (appearances.first()?, appearances.last()?);
    let gaps = appearances.len() as i64 - 1;
    if gaps < 1 {
        return None;
    }
    let span = last.end.millis().saturating_sub(first.start.millis());
    Some(delta_to_days(span.div_euclid(gaps)))
}

/// Mean of the per-operator average intervals over non-limited operators of
/// `rarity` with at least two appearances. `None` when no operator qualifies.
pub fn category_average<R>(
    repo: &R,
    region: Region,
    rarity: u8,
    category: BannerCategory,
) -> Option<f64>
where
    R: DataRepository + ?Sized,
{
    let samples: Vec<i64> = repo
        .chronological(region)
        .into_iter()
        .filter(|op| op.rarity == rarity && !op.limited)
        .filter_map(|op| average_interval(op, region, category))
        .collect();
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<i64>() as f64 / samples.len() as f64)
}
