#[cfg(test)]
mod tests {
    use crate::models::{BannerCategory, Elapsed, Operator, Region, Timestamp, DAY_MS};
    use crate::services::overdue::*;
    use crate::test_support::{banner, operator, store};

    fn with_featured(id: &str, rarity: u8, spans: &[(i64, i64)]) -> Operator {
        let mut op = operator(id, rarity, 0);
        let info = op.en.as_mut().unwrap();
        for &(start_day, end_day) in spans {
            info.featured.push(banner(start_day * DAY_MS, end_day * DAY_MS));
        }
        op
    }

    fn day(n: i64) -> Timestamp {
        Timestamp::from_millis(n * DAY_MS)
    }

    #[test]
    fn test_last_occurrence_wait() {
        let op = with_featured("a", 6, &[(10, 24), (50, 64)]);
        assert_eq!(
            last_occurrence_wait(&op, Region::En, BannerCategory::Featured, day(100)),
            Elapsed::Days(36)
        );
        assert_eq!(
            last_occurrence_wait(&op, Region::En, BannerCategory::Shop, day(100)),
            Elapsed::Never
        );
    }

    #[test]
    fn test_wait_is_negative_while_banner_runs() {
        let op = with_featured("a", 6, &[(90, 104)]);
        let wait = last_occurrence_wait(&op, Region::En, BannerCategory::Featured, day(100));
        assert_eq!(wait, Elapsed::Days(-4));

        // Partial days floor toward the past.
        let later = Timestamp::from_millis(104 * DAY_MS - 1);
        assert_eq!(
            last_occurrence_wait(&op, Region::En, BannerCategory::Featured, later),
            Elapsed::Days(-1)
        );
    }

    #[test]
    fn test_overdue_set_ordering() {
        let mut limited = with_featured("limited", 6, &[]);
        limited.limited = true;
        let store = store(vec![
            with_featured("recent", 6, &[(80, 94)]),
            with_featured("old", 6, &[(10, 24)]),
            with_featured("never", 6, &[]),
            with_featured("five", 5, &[]),
            limited,
        ]);

        let set = overdue_set(&store, Region::En, 6, BannerCategory::Featured, day(100));
        let ids: Vec<&str> = set.iter().map(|e| e.operator.id.as_str()).collect();
        assert_eq!(ids, vec!["never", "old", "recent"]);
        assert!(set.windows(2).all(|w| w[0].wait >= w[1].wait));
        assert_eq!(set[1].wait, Elapsed::Days(76));
    }

    #[test]
    fn test_average_interval() {
        let once = with_featured("a", 6, &[(0, 14)]);
        assert_eq!(average_interval(&once, Region::En, BannerCategory::Featured), None);

        let twice = with_featured("b", 6, &[(0, 14), (100, 114)]);
        assert_eq!(
            average_interval(&twice, Region::En, BannerCategory::Featured),
            Some(114)
        );

        let thrice = with_featured("c", 6, &[(0, 14), (50, 64), (100, 115)]);
        // (115 - 0) / 2 = 57.5 -> 57
        assert_eq!(
            average_interval(&thrice, Region::En, BannerCategory::Featured),
            Some(57)
        );
    }

    #[test]
    fn test_category_average_excludes_single_appearance() {
        let g1 = 40;
        let g2 = 90;
        let store = store(vec![
            with_featured("single", 6, &[(0, 14)]),
            with_featured("one", 6, &[(0, 14), (26, g1)]),
            with_featured("two", 6, &[(0, 14), (76, g2)]),
        ]);
        let avg = category_average(&store, Region::En, 6, BannerCategory::Featured).unwrap();
        assert_eq!(avg, (g1 + g2) as f64 / 2.0);
    }

    #[test]
    fn test_category_average_none_without_samples() {
        let store = store(vec![with_featured("single", 6, &[(0, 14)])]);
        assert_eq!(
            category_average(&store, Region::En, 6, BannerCategory::Featured),
            None
        );
    }

    #[test]
    fn test_category_average_ignores_limited() {
        let mut limited = with_featured("limited", 6, &[(0, 14), (0, 1000)]);
        limited.limited = true;
        let store = store(vec![with_featured("std", 6, &[(0, 14), (10, 20)]), limited]);
        assert_eq!(
            category_average(&store, Region::En, 6, BannerCategory::Featured),
            Some(20.0)
        );
    }

    #[test]
    fn test_exceeds_average() {
        assert!(exceeds_average(Elapsed::Never, Some(30.0)));
        assert!(exceeds_average(Elapsed::Days(31), Some(30.0)));
        assert!(!exceeds_average(Elapsed::Days(30), Some(30.0)));
        assert!(!exceeds_average(Elapsed::Days(-2), Some(30.0)));
        assert!(!exceeds_average(Elapsed::Never, None));
        assert!(!exceeds_average(Elapsed::Days(500), None));
    }

    #[test]
    fn test_overdue_set_flags_waits_past_average() {
        // Intervals: steady 50, other 100 -> category average 75.
        let store = store(vec![
            with_featured("steady", 6, &[(0, 14), (36, 50)]),
            with_featured("other", 6, &[(0, 14), (86, 100)]),
            with_featured("never", 6, &[]),
        ]);

        let set = overdue_set(&store, Region::En, 6, BannerCategory::Featured, day(130));
        let flags: Vec<(&str, bool)> = set
            .iter()
            .map(|e| (e.operator.id.as_str(), e.exceeds_average))
            .collect();
        // Waits: never, steady 80, other 30.
        assert_eq!(
            flags,
            vec![("never", true), ("steady", true), ("other", false)]
        );
    }

    #[test]
    fn test_overdue_set_flags_nothing_without_average() {
        let store = store(vec![
            with_featured("once", 6, &[(0, 14)]),
            with_featured("never", 6, &[]),
        ]);
        let set = overdue_set(&store, Region::En, 6, BannerCategory::Featured, day(500));
        assert!(set.iter().all(|e| !e.exceeds_average));
    }
}
