//! Unit tests for qs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EntityId, PoolId, StageId};

    #[test]
    fn index_roundtrip() {
        let id = EntityId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(EntityId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(EntityId(0) < EntityId(1));
        assert!(PoolId(3) > PoolId(2));
    }

    #[test]
    fn stage_id_rejects_overflow() {
        assert!(StageId::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(PoolId(7).to_string(), "PoolId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{Delay, QsError, SimClock, SimTime};

    #[test]
    fn delay_rejects_negative_and_non_finite() {
        assert_eq!(Delay::new(-0.5), Err(QsError::InvalidDelay(-0.5)));
        assert!(Delay::new(f64::NAN).is_err());
        assert!(Delay::new(f64::INFINITY).is_err());
        assert_eq!(Delay::new(0.0).unwrap(), Delay::ZERO);
    }

    #[test]
    fn try_from_f64_validates() {
        assert_eq!(SimTime::try_from(-2.0), Err(QsError::InvalidTime(-2.0)));
        assert_eq!(Delay::try_from(-2.0), Err(QsError::InvalidDelay(-2.0)));
        assert_eq!(f64::from(Delay::try_from(1.25).unwrap()), 1.25);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_rejects_invalid_values() {
        assert!(serde_json::from_str::<SimTime>("-1.0").is_err());
        assert!(serde_json::from_str::<Delay>("-0.5").is_err());
        let t: SimTime = serde_json::from_str("12.5").unwrap();
        assert_eq!(t.as_f64(), 12.5);
        assert_eq!(serde_json::to_string(&t).unwrap(), "12.5");
    }

    #[test]
    fn sim_time_rejects_negative() {
        assert_eq!(SimTime::new(-1.0), Err(QsError::InvalidTime(-1.0)));
        assert_eq!(SimTime::new(3.5).unwrap().as_f64(), 3.5);
    }

    #[test]
    fn time_plus_delay() {
        let t = SimTime::new(10.0).unwrap() + Delay::new(2.5).unwrap();
        assert_eq!(t.as_f64(), 12.5);
        assert_eq!(t.since(SimTime::new(10.0).unwrap()), 2.5);
    }

    #[test]
    fn since_never_negative() {
        let a = SimTime::new(1.0).unwrap();
        let b = SimTime::new(4.0).unwrap();
        assert_eq!(a.since(b), 0.0);
    }

    #[test]
    fn ordering_is_total() {
        let mut v = vec![
            SimTime::new(3.0).unwrap(),
            SimTime::ZERO,
            SimTime::new(1.5).unwrap(),
        ];
        v.sort();
        let raw: Vec<f64> = v.iter().map(|t| t.as_f64()).collect();
        assert_eq!(raw, vec![0.0, 1.5, 3.0]);
    }

    #[test]
    fn clock_is_monotonic() {
        let mut clock = SimClock::new();
        clock.advance_to(SimTime::new(5.0).unwrap()).unwrap();
        clock.advance_to(SimTime::new(5.0).unwrap()).unwrap();
        let err = clock.advance_to(SimTime::new(4.0).unwrap()).unwrap_err();
        assert!(matches!(err, QsError::ClockRegression { .. }));
        assert_eq!(clock.now().as_f64(), 5.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::StreamRng;

    #[test]
    fn same_seed_same_stream_is_deterministic() {
        let mut a = StreamRng::new(42, 3);
        let mut b = StreamRng::new(42, 3);
        let xs: Vec<u64> = (0..8).map(|_| a.gen_range(0..u64::MAX)).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.gen_range(0..u64::MAX)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn streams_are_independent() {
        let mut a = StreamRng::new(42, 0);
        let mut b = StreamRng::new(42, 1);
        let xs: Vec<u64> = (0..8).map(|_| a.gen_range(0..u64::MAX)).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.gen_range(0..u64::MAX)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn gen_range_stays_in_bounds() {
        let mut r = StreamRng::new(7, 0);
        for _ in 0..1_000 {
            let x: f64 = r.gen_range(4.0..6.0);
            assert!((4.0..6.0).contains(&x));
            let y: f64 = r.gen_range(4.0..=4.0);
            assert_eq!(y, 4.0);
        }
    }
}
