#![no_main]
use libfuzzer_sys::fuzz_target;
use printstate_core::StabilityEstimator;

fuzz_target!(|input: (u8, u8, Vec<f64>)| {
    let (window, countdown, samples) = input;
    let Ok(mut est) = StabilityEstimator::new(usize::from(window), u64::from(countdown), 0.5)
    else {
        return;
    };
    for s in samples {
        let before = est.count();
        match est.update(s) {
            Ok(_) => {
                assert_eq!(est.count(), before + 1);
                assert!(est.sum_total().is_finite());
                for v in [
                    est.average_total(),
                    est.average_total_rolling(),
                    est.average_distance(),
                ]
                .into_iter()
                .flatten()
                {
                    assert!(v.is_finite(), "getter left the finite range: {v}");
                }
            }
            Err(_) => assert_eq!(est.count(), before),
        }
        assert!(est.totals_len() <= usize::from(window));
        assert!(est.distances_len() <= usize::from(window));
        if est.is_stable() {
            assert!(est.stable_counter().is_some_and(|n| n >= u64::from(countdown)));
        }
    }
});
