//! Day-valued series over banners: banner durations, shop-debut waits and
//! regional release delays.

use log::debug;

use crate::api::{NumericPoint, ReleaseDelay};
use crate::db::DataRepository;
use crate::models::{days_between, Operator, Region};

/// Durations of rotating banners in whole days.
///
/// With `debut_only` the series holds the banners that carried a 6-star shop
/// debut, labelled with the first debuting operator; otherwise the remaining
/// rotating banners, unlabelled.
pub fn banner_duration_series<R>(repo: &R, region: Region, debut_only: bool) -> Vec<NumericPoint>
where
    R: DataRepository + ?Sized,
{
    repo.banners(region)
        .iter()
        .filter(|b| b.is_rotating && b.is_shop_debut() == debut_only)
        .map(|b| NumericPoint {
            time: b.start,
            value: b.duration_days(),
            label: if debut_only {
                b.shop_debut_6star.first().cloned()
            } else {
                None
            },
        })
        .collect()
}

/// Days from regional release to first certificate-shop appearance, for
/// operators of `rarity` that have reached the shop, ordered by debut date.
pub fn shop_debut_delay_series<R>(repo: &R, region: Region, rarity: u8) -> Vec<NumericPoint>
where
    R: DataRepository + ?Sized,
{
    let mut debuts: Vec<(&Operator, NumericPoint)> = repo
        .operators()
        .values()
        .filter(|op| op.rarity == rarity)
        .filter_map(|op| {
            let info = op.release_info(region)?;
            let debut = info.shop_debut()?;
            Some((
                op,
                NumericPoint {
                    time: debut.start,
                    value: days_between(info.released, debut.start),
                    label: Some(op.id.clone()),
                },
            ))
        })
        .collect();
    debuts.sort_by_key(|(_, point)| point.time);
    debuts.into_iter().map(|(_, point)| point).collect()
}

/// Days each `region` release trailed its CN release, in release order.
/// Operators without a CN release are skipped.
pub fn release_delay_series<R>(repo: &R, region: Region) -> Vec<NumericPoint>
where
    R: DataRepository + ?Sized,
{
    let ordered = repo.chronological(region);
    let total = ordered.len();
    let series: Vec<NumericPoint> = ordered
        .into_iter()
        .filter_map(|op| {
            let released = op.released(region)?;
            let reference = op.released(Region::Cn)?;
            Some(NumericPoint {
                time: released,
                value: days_between(reference, released),
                label: Some(op.id.clone()),
            })
        })
        .collect();
    if series.len() < total {
        debug!(
            "Release delay for {}: {} of {} operators have no CN release",
            region,
            total - series.len(),
            total
        );
    }
    series
}

/// Delay behind CN of the newest release in `region`.
pub fn latest_release_delay<R>(repo: &R, region: Region) -> Option<ReleaseDelay>
where
    R: DataRepository + ?Sized,
{
    let latest = repo.latest_operators(region);
    let op = latest.first()?;
    let released = op.released(region)?;
    let reference = op.released(Region::Cn)?;
    Some(ReleaseDelay {
        operator_id: op.id.clone(),
        name: op.name.clone(),
        released,
        days: days_between(reference, released),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Timestamp, DAY_MS};
    use crate::test_support::{banner, banner_on_day, operator, store, store_with_banners};

    #[test]
    fn test_debut_banner_duration() {
        let mut debut = banner(1000, 1000 + 3 * DAY_MS);
        debut.shop_debut_6star = vec!["A".to_string()];
        let regular = banner(0, 36 * 3600 * 1000);
        let mut standard = banner(5000, 5000 + 10 * DAY_MS);
        standard.is_rotating = false;
        let store = store_with_banners(vec![], Region::En, vec![debut, regular, standard]);

        let debuts = banner_duration_series(&store, Region::En, true);
        assert_eq!(
            debuts,
            vec![NumericPoint {
                time: Timestamp::from_millis(1000),
                value: 3,
                label: Some("A".to_string()),
            }]
        );

        let others = banner_duration_series(&store, Region::En, false);
        assert_eq!(others.len(), 1);
        // 1.5 days floors to 1.
        assert_eq!(others[0].value, 1);
        assert_eq!(others[0].label, None);
    }

    #[test]
    fn test_shop_debut_delay_series() {
        let mut late = operator("late", 6, 0);
        late.en.as_mut().unwrap().shop.push(banner_on_day(200));
        let mut early = operator("early", 6, 50 * DAY_MS);
        early.en.as_mut().unwrap().shop.push(banner_on_day(120));
        let mut five = operator("five", 5, 0);
        five.en.as_mut().unwrap().shop.push(banner_on_day(30));
        let store = store(vec![late, early, five, operator("waiting", 6, 0)]);

        let series = shop_debut_delay_series(&store, Region::En, 6);
        let values: Vec<(i64, Option<&str>)> = series
            .iter()
            .map(|p| (p.value, p.label.as_deref()))
            .collect();
        assert_eq!(values, vec![(70, Some("early")), (200, Some("late"))]);
        assert_eq!(shop_debut_delay_series(&store, Region::En, 5)[0].value, 30);
    }

    #[test]
    fn test_release_delay_uses_cn_reference() {
        let mut op = operator("a", 6, 0);
        op.cn.as_mut().unwrap().released = Timestamp::from_millis(0);
        op.en.as_mut().unwrap().released = Timestamp::from_millis(180 * DAY_MS);
        let mut en_only = operator("b", 6, 200 * DAY_MS);
        en_only.cn = None;
        let store = store(vec![op, en_only]);

        let series = release_delay_series(&store, Region::En);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 180);
        assert_eq!(series[0].time.millis(), 180 * DAY_MS);

        // CN against itself is always zero.
        assert!(release_delay_series(&store, Region::Cn)
            .iter()
            .all(|p| p.value == 0));
    }

    #[test]
    fn test_latest_release_delay() {
        let mut newest = operator("newest", 6, 300 * DAY_MS);
        newest.cn.as_mut().unwrap().released = Timestamp::from_millis(100 * DAY_MS);
        let store = store(vec![operator("old", 6, 0), newest]);

        let delay = latest_release_delay(&store, Region::En).unwrap();
        assert_eq!(delay.operator_id, "newest");
        assert_eq!(delay.days, 200);
        assert!(latest_release_delay(&crate::test_support::store(vec![]), Region::En).is_none());
    }
}
