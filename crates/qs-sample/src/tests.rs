//! Unit tests for qs-sample.

use qs_core::{QsError, StreamRng};

use crate::{
    Clamped, DistributionSpec, Exponential, Fixed, NegativeSamples, Normal, SampleError, Sampler,
    Uniform, from_fn,
};

fn rng() -> StreamRng {
    StreamRng::new(42, 0)
}

#[cfg(test)]
mod dist_tests {
    use super::*;

    #[test]
    fn fixed_returns_its_value() {
        let mut s = Fixed(10.0);
        let mut r = rng();
        assert_eq!(s.sample(&mut r), 10.0);
        assert_eq!(s.sample_delay(&mut r).unwrap().as_f64(), 10.0);
    }

    #[test]
    fn uniform_stays_in_closed_interval() {
        let mut s = Uniform::new(4.0, 6.0).unwrap();
        let mut r = rng();
        for _ in 0..2_000 {
            let x = s.sample(&mut r);
            assert!((4.0..=6.0).contains(&x), "{x}");
        }
    }

    #[test]
    fn uniform_degenerate_interval_is_allowed() {
        let mut s = Uniform::new(3.0, 3.0).unwrap();
        assert_eq!(s.sample(&mut rng()), 3.0);
    }

    #[test]
    fn uniform_rejects_inverted_bounds() {
        let err = Uniform::new(6.0, 4.0).unwrap_err();
        assert!(matches!(err, SampleError::InvalidParameter { kind: "uniform", .. }));
    }

    #[test]
    fn exponential_mean_is_close() {
        let mut s = Exponential::with_mean(2.0).unwrap();
        let mut r = rng();
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| s.sample(&mut r)).sum::<f64>() / n as f64;
        assert!((mean - 2.0).abs() < 0.1, "mean {mean}");
    }

    #[test]
    fn exponential_rejects_non_positive_mean() {
        assert!(Exponential::with_mean(0.0).is_err());
        assert!(Exponential::with_mean(-1.0).is_err());
    }

    #[test]
    fn normal_rejects_negative_std_dev() {
        assert!(Normal::new(5.0, -1.0).is_err());
        assert!(Normal::new(5.0, f64::NAN).is_err());
        assert!(Normal::new(5.0, f64::INFINITY).is_err());
        assert!(Normal::new(5.0, 0.0).is_ok());
    }

    #[test]
    fn same_stream_reproduces_draws() {
        let mut a = Exponential::with_mean(1.5).unwrap();
        let mut b = Exponential::with_mean(1.5).unwrap();
        let (mut ra, mut rb) = (StreamRng::new(9, 4), StreamRng::new(9, 4));
        let xs: Vec<f64> = (0..16).map(|_| a.sample(&mut ra)).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.sample(&mut rb)).collect();
        assert_eq!(xs, ys);
    }
}

#[cfg(test)]
mod policy_tests {
    use super::*;

    #[test]
    fn negative_draw_is_invalid_delay() {
        let mut s = Fixed(-2.0);
        assert_eq!(s.sample_delay(&mut rng()), Err(QsError::InvalidDelay(-2.0)));
    }

    #[test]
    fn clamped_floors_at_zero() {
        let mut s = Clamped(Fixed(-2.0));
        assert_eq!(s.sample_delay(&mut rng()).unwrap().as_f64(), 0.0);
    }

    #[test]
    fn clamped_keeps_nan_invalid() {
        let mut s = Clamped(Fixed(f64::NAN));
        assert!(s.sample_delay(&mut rng()).is_err());
    }

    #[test]
    fn policy_apply() {
        let mut rejecting = NegativeSamples::Reject.apply(Box::new(Fixed(-1.0)));
        let mut clamping = NegativeSamples::Clamp.apply(Box::new(Fixed(-1.0)));
        assert!(rejecting.sample_delay(&mut rng()).is_err());
        assert_eq!(clamping.sample_delay(&mut rng()).unwrap().as_f64(), 0.0);
    }

    #[test]
    fn closure_sampler_replays_sequence() {
        let mut steps = [1.0, 2.0, 3.0].into_iter();
        let mut s = from_fn(move |_| steps.next().unwrap_or(0.0));
        let mut r = rng();
        let xs: Vec<f64> = (0..4).map(|_| s.sample(&mut r)).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0, 0.0]);
    }
}

#[cfg(test)]
mod spec_tests {
    use super::*;

    #[derive(serde::Deserialize)]
    struct Holder {
        d: DistributionSpec,
    }

    fn parse(s: &str) -> DistributionSpec {
        serde_json::from_str::<Holder>(s).unwrap().d
    }

    #[test]
    fn parses_tagged_kinds() {
        assert_eq!(
            parse(r#"{"d": {"kind": "uniform", "low": 4.0, "high": 6.0}}"#),
            DistributionSpec::Uniform { low: 4.0, high: 6.0 }
        );
        assert_eq!(
            parse(r#"{"d": {"kind": "exponential", "mean": 1.8}}"#),
            DistributionSpec::Exponential { mean: 1.8 }
        );
        assert_eq!(
            parse(r#"{"d": {"kind": "fixed", "value": 10}}"#),
            DistributionSpec::Fixed { value: 10.0 }
        );
    }

    #[test]
    fn build_validates_parameters() {
        assert!(DistributionSpec::Uniform { low: 5.0, high: 1.0 }.validate().is_err());
        assert!(DistributionSpec::Exponential { mean: 0.0 }.build().is_err());
        assert!(DistributionSpec::Fixed { value: f64::INFINITY }.build().is_err());
        assert!(DistributionSpec::Normal { mean: 3.0, std_dev: 0.5 }.build().is_ok());
    }

    #[test]
    fn negative_std_dev_fails_validation() {
        let spec = parse(r#"{"d": {"kind": "normal", "mean": 5.0, "std_dev": -1.0}}"#);
        assert!(matches!(
            spec.validate(),
            Err(SampleError::InvalidParameter { kind: "normal", .. })
        ));
    }

    #[test]
    fn built_fixed_sampler_draws_value() {
        let mut s = DistributionSpec::Fixed { value: 5.0 }.build().unwrap();
        assert_eq!(s.sample(&mut rng()), 5.0);
    }
}
