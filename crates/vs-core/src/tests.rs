//! Unit tests for vs-core primitives.

#[cfg(test)]
pub(crate) fn sample_config() -> crate::ElectionConfig {
    crate::ElectionConfig {
        seed:                42,
        day_length_hours:    2,
        mean_service_secs:   300,
        min_expected_voters: 1,
        max_expected_voters: 1_000,
        too_long_minutes:    30,
        iterations:          5,
        arrival_zero_pct:    10.0,
        arrival_pct_by_hour: vec![50.0, 40.0],
        service_times_secs:  vec![120, 300, 600],
    }
}

#[cfg(test)]
mod ids {
    use crate::{PrecinctId, StationId, VoterSeq};

    #[test]
    fn index_roundtrip() {
        let id = StationId(7);
        assert_eq!(id.index(), 7);
        assert_eq!(StationId::try_from(7usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(VoterSeq(0) < VoterSeq(1));
        assert!(PrecinctId(100) > PrecinctId(99));
    }

    #[test]
    fn display() {
        assert_eq!(StationId(3).to_string(), "StationId(3)");
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;
    use crate::time::whole_minutes;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5);
    }

    #[test]
    fn hour_start() {
        assert_eq!(Tick::hour_start(0), Tick::ZERO);
        assert_eq!(Tick::hour_start(3), Tick(10_800));
    }

    #[test]
    fn advance() {
        let mut t = Tick::ZERO;
        t.advance();
        t.advance();
        assert_eq!(t, Tick(2));
    }

    #[test]
    fn minutes_round_down() {
        assert_eq!(whole_minutes(0), 0);
        assert_eq!(whole_minutes(59), 0);
        assert_eq!(whole_minutes(60), 1);
        assert_eq!(whole_minutes(1_799), 29);
    }

    #[test]
    fn display() {
        assert_eq!(Tick(3_723).to_string(), "T3723 (1:02:03)");
    }
}

#[cfg(test)]
mod rng {
    use crate::{PrecinctId, RandomSource, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.uniform_int(0, 1_000), r2.uniform_int(0, 1_000));
            assert_eq!(r1.exponential_int(0.01), r2.exponential_int(0.01));
        }
    }

    #[test]
    fn different_precincts_differ() {
        let mut r0 = SimRng::for_precinct(1, PrecinctId(0));
        let mut r1 = SimRng::for_precinct(1, PrecinctId(1));
        let a = r0.uniform_int(0, u64::MAX);
        let b = r1.uniform_int(0, u64::MAX);
        assert_ne!(a, b, "seeds for adjacent precincts should diverge");
    }

    #[test]
    fn precinct_stream_is_reproducible() {
        let mut a = SimRng::for_precinct(9, PrecinctId(17));
        let mut b = SimRng::for_precinct(9, PrecinctId(17));
        for _ in 0..50 {
            assert_eq!(a.exponential_int(0.5), b.exponential_int(0.5));
        }
    }

    #[test]
    fn uniform_int_inclusive_bounds() {
        let mut rng = SimRng::new(0);
        let mut seen = [false; 3];
        for _ in 0..1_000 {
            let v = rng.uniform_int(0, 2);
            assert!(v <= 2);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every value in [0, 2] should be drawn");
        assert_eq!(rng.uniform_int(5, 5), 5);
        assert_eq!(rng.uniform_int(5, 4), 5);
    }

    #[test]
    fn uniform_double_in_bounds() {
        let mut rng = SimRng::new(3);
        for _ in 0..1_000 {
            let v = rng.uniform_double(2.0, 3.0);
            assert!((2.0..3.0).contains(&v));
        }
        assert_eq!(rng.uniform_double(1.0, 1.0), 1.0);
    }

    #[test]
    fn uniform_double_unbounded_range_returns_lower() {
        let mut rng = SimRng::new(3);
        assert_eq!(rng.uniform_double(0.0, f64::INFINITY), 0.0);
        assert_eq!(rng.uniform_double(f64::NEG_INFINITY, 0.0), f64::NEG_INFINITY);
        assert_eq!(rng.uniform_double(-f64::MAX, f64::MAX), -f64::MAX);
        assert!(rng.uniform_double(0.0, f64::NAN) == 0.0);
    }

    #[test]
    fn exponential_guards_bad_rate() {
        let mut rng = SimRng::new(0);
        assert_eq!(rng.exponential_int(0.0), 0);
        assert_eq!(rng.exponential_int(-1.0), 0);
        assert_eq!(rng.exponential_int(f64::NAN), 0);
    }

    #[test]
    fn exponential_mean_is_plausible() {
        let mut rng = SimRng::new(7);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| rng.exponential_int(1.0 / 100.0)).sum();
        let mean = total as f64 / n as f64;
        // Truncation shaves ~0.5 s off the true mean of 100 s.
        assert!((mean - 99.5).abs() < 5.0, "got {mean}");
    }

    #[test]
    fn normal_guards_bad_dev() {
        let mut rng = SimRng::new(0);
        assert_eq!(rng.normal(4.0, -1.0), 4.0);
        assert_eq!(rng.normal(4.0, f64::INFINITY), 4.0);
        let v = rng.normal(0.0, 1.0);
        assert!(v.is_finite());
    }
}

#[cfg(test)]
mod config {
    use super::sample_config;
    use crate::{CoreError, RandomSource};

    /// Always returns the upper bound of a uniform int draw.
    struct Max;
    impl RandomSource for Max {
        fn exponential_int(&mut self, _rate: f64) -> u64 { 0 }
        fn uniform_int(&mut self, _lower: u64, upper: u64) -> u64 { upper }
        fn uniform_double(&mut self, lower: f64, _upper: f64) -> f64 { lower }
        fn normal(&mut self, mean: f64, _dev: f64) -> f64 { mean }
    }

    #[test]
    fn valid_config_passes() {
        sample_config().validate().unwrap();
    }

    #[test]
    fn derived_lengths() {
        assert_eq!(sample_config().day_length_secs(), 7_200);
    }

    #[test]
    fn study_range_is_inclusive() {
        let cfg = sample_config();
        assert!(cfg.in_study_range(1));
        assert!(cfg.in_study_range(1_000));
        assert!(!cfg.in_study_range(0));
        assert!(!cfg.in_study_range(1_001));
    }

    #[test]
    fn sample_service_uses_table() {
        let cfg = sample_config();
        assert_eq!(cfg.sample_service_secs(&mut Max), 600);
    }

    fn rejects(mutate: impl FnOnce(&mut crate::ElectionConfig)) {
        let mut cfg = sample_config();
        mutate(&mut cfg);
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_mismatched_hour_table() {
        rejects(|c| c.arrival_pct_by_hour.push(10.0));
        rejects(|c| c.arrival_pct_by_hour.clear());
    }

    #[test]
    fn rejects_empty_or_zero_service_table() {
        rejects(|c| c.service_times_secs.clear());
        rejects(|c| c.service_times_secs[1] = 0);
    }

    #[test]
    fn rejects_zero_day_and_iterations() {
        rejects(|c| {
            c.day_length_hours = 0;
            c.arrival_pct_by_hour.clear();
        });
        rejects(|c| c.iterations = 0);
    }

    #[test]
    fn rejects_inverted_range_and_bad_pct() {
        rejects(|c| c.min_expected_voters = 2_000);
        rejects(|c| c.arrival_zero_pct = -1.0);
        rejects(|c| c.arrival_pct_by_hour[0] = f64::NAN);
    }
}

#[cfg(test)]
mod voter {
    use crate::{StationId, Tick, Voter, VoterSeq};

    #[test]
    fn unadmitted_voter_has_no_wait() {
        let v = Voter::new(VoterSeq(0), Tick(10), 300);
        assert_eq!(v.wait_secs(), None);
        assert_eq!(v.completion(), None);
    }

    #[test]
    fn admitted_voter_derives_times() {
        let mut v = Voter::new(VoterSeq(0), Tick(10), 300);
        v.admit(StationId(2), Tick(190));
        assert_eq!(v.station, Some(StationId(2)));
        assert_eq!(v.wait_secs(), Some(180));
        assert_eq!(v.wait_minutes(), Some(3));
        assert_eq!(v.completion(), Some(Tick(490)));
    }
}

#[cfg(test)]
mod precinct {
    use std::collections::BTreeSet;

    use crate::{Precinct, PrecinctId};

    #[test]
    fn report_set_lookup_and_display() {
        let p = Precinct {
            id:                PrecinctId(12),
            name:              "Ward 3".into(),
            turnout:           0.61,
            registered_voters: 2_000,
            expected_voters:   1_220,
            expected_per_hour: 94,
            stations_hint:     6,
            minority_pct:      23.5,
            report_stations:   BTreeSet::from([7, 5, 6, 5]),
        };
        assert!(p.reports_histogram(5));
        assert!(!p.reports_histogram(8));
        let s = p.to_string();
        assert!(s.starts_with("  12 Ward 3"));
        assert!(s.ends_with("   5   6   7 HH"));
    }
}
