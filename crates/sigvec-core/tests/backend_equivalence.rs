//! Scalar and AVX2 backends must agree on every kernel
//!
//! Element-wise kernels that perform the same operations in the same order
//! are compared exactly; reductions and magnitudes are compared within
//! rounding tolerance. On hosts without AVX2 these tests pass vacuously.

mod common;

use common::*;
use sigvec_core::{Avx2Backend, Cf32, KernelPrimitives, ScalarBackend};

fn with_avx2(test: impl FnOnce(Avx2Backend, ScalarBackend)) {
    if !Avx2Backend::is_available() {
        eprintln!("AVX2 not available, skipping");
        return;
    }
    test(Avx2Backend::new(), ScalarBackend::new());
}

/// Accumulation error scales with the sum of term magnitudes, not the result
fn assert_reduction_close(actual: f32, expected: f32, abs_sum: f32, op: &str, len: usize) {
    let bound = 1e-4 * abs_sum.max(1.0);
    assert!(
        (actual - expected).abs() <= bound,
        "{op} for len {len}: {actual} vs {expected} (bound {bound})"
    );
}

fn assert_complex_reduction_close(actual: Cf32, expected: Cf32, abs_sum: f32, op: &str, len: usize) {
    assert_reduction_close(actual.re, expected.re, abs_sum, op, len);
    assert_reduction_close(actual.im, expected.im, abs_sum, op, len);
}

#[test]
fn test_real_elementwise_bit_exact() {
    with_avx2(|avx, scalar| {
        for len in edge_case_lengths() {
            let x = real_data(len, 1, 10.0);
            let y: Vec<f32> = real_data(len, 2, 10.0).iter().map(|v| v + 20.5).collect();

            type Binary = fn(&Avx2Backend, &[f32], &[f32], &mut [f32]);
            type BinaryRef = fn(&ScalarBackend, &[f32], &[f32], &mut [f32]);
            let cases: [(&str, Binary, BinaryRef); 3] = [
                ("add_f32", Avx2Backend::add_f32, ScalarBackend::add_f32),
                ("sub_f32", Avx2Backend::sub_f32, ScalarBackend::sub_f32),
                ("div_f32", Avx2Backend::div_f32, ScalarBackend::div_f32),
            ];
            for (op, fast, reference) in cases {
                let mut z_avx = vec![0.0; len];
                let mut z_ref = vec![0.0; len];
                fast(&avx, &x, &y, &mut z_avx);
                reference(&scalar, &x, &y, &mut z_ref);
                assert_eq!(z_avx, z_ref, "{op} for len {len}");
            }

            let mut z_avx = vec![0.0; len];
            let mut z_ref = vec![0.0; len];
            avx.scale_f32(&x, -1.75, &mut z_avx);
            scalar.scale_f32(&x, -1.75, &mut z_ref);
            assert_eq!(z_avx, z_ref, "scale_f32 for len {len}");

            let mut acc_avx = x.clone();
            let mut acc_ref = x.clone();
            avx.add_assign_f32(&mut acc_avx, &y);
            scalar.add_assign_f32(&mut acc_ref, &y);
            avx.sub_assign_f32(&mut acc_avx, &x);
            scalar.sub_assign_f32(&mut acc_ref, &x);
            avx.scale_assign_f32(&mut acc_avx, 0.3);
            scalar.scale_assign_f32(&mut acc_ref, 0.3);
            assert_eq!(acc_avx, acc_ref, "in-place chain for len {len}");
        }
    });
}

#[test]
fn test_real_reductions() {
    with_avx2(|avx, scalar| {
        for len in edge_case_lengths() {
            let x = real_data(len, 3, 1.0);
            let y = real_data(len, 4, 1.0);

            let abs_sum: f32 = x.iter().map(|v| v.abs()).sum();
            assert_reduction_close(avx.sum_f32(&x), scalar.sum_f32(&x), abs_sum, "sum_f32", len);

            let abs_dot: f32 = x.iter().zip(&y).map(|(a, b)| (a * b).abs()).sum();
            assert_reduction_close(
                avx.dot_f32(&x, &y),
                scalar.dot_f32(&x, &y),
                abs_dot,
                "dot_f32",
                len,
            );

            assert_eq!(avx.max_index_f32(&x), scalar.max_index_f32(&x), "len {len}");
        }
    });
}

#[test]
fn test_max_index_ties_and_special_values() {
    with_avx2(|avx, scalar| {
        let cases: Vec<Vec<f32>> = vec![
            vec![1.0, 5.0, 5.0, 2.0],
            vec![3.0; 19],
            vec![f32::NAN; 11],
            vec![f32::MIN; 9],
            vec![f32::NEG_INFINITY, f32::NEG_INFINITY, -1.0, f32::NAN, -1.0, 0.0, -0.0, 0.0, 0.0],
            (0..40).map(|i| if i % 9 == 8 { 7.0 } else { f32::NAN }).collect(),
            (0..33).map(|i| -(i as f32)).collect(),
            (0..33).map(|i| i as f32 % 5.0).collect(),
        ];
        for x in cases {
            assert_eq!(avx.max_index_f32(&x), scalar.max_index_f32(&x), "{x:?}");
        }
    });
}

#[test]
fn test_complex_elementwise_bit_exact() {
    with_avx2(|avx, scalar| {
        for len in edge_case_lengths() {
            let x = complex_data(len, 5, 3.0);
            let y = nonzero_complex_data(len, 6, 0.5);
            let r = real_data(len, 7, 2.0);
            let h = Cf32::new(0.6, -1.3);

            let mut z_avx = vec![Cf32::default(); len];
            let mut z_ref = vec![Cf32::default(); len];

            avx.mul_c32(&x, &y, &mut z_avx);
            scalar.mul_c32(&x, &y, &mut z_ref);
            assert_eq!(z_avx, z_ref, "mul_c32 for len {len}");

            avx.mul_conj_c32(&x, &y, &mut z_avx);
            scalar.mul_conj_c32(&x, &y, &mut z_ref);
            assert_eq!(z_avx, z_ref, "mul_conj_c32 for len {len}");

            avx.mul_c32_f32(&x, &r, &mut z_avx);
            scalar.mul_c32_f32(&x, &r, &mut z_ref);
            assert_eq!(z_avx, z_ref, "mul_c32_f32 for len {len}");

            avx.div_c32(&x, &y, &mut z_avx);
            scalar.div_c32(&x, &y, &mut z_ref);
            assert_eq!(z_avx, z_ref, "div_c32 for len {len}");

            avx.scale_c32(&x, h, &mut z_avx);
            scalar.scale_c32(&x, h, &mut z_ref);
            assert_eq!(z_avx, z_ref, "scale_c32 for len {len}");

            avx.conj_c32(&x, &mut z_avx);
            scalar.conj_c32(&x, &mut z_ref);
            assert_eq!(z_avx, z_ref, "conj_c32 for len {len}");

            let mut acc_avx = x.clone();
            let mut acc_ref = x.clone();
            avx.mul_assign_c32(&mut acc_avx, &y);
            scalar.mul_assign_c32(&mut acc_ref, &y);
            avx.scale_assign_c32(&mut acc_avx, h);
            scalar.scale_assign_c32(&mut acc_ref, h);
            avx.conj_assign_c32(&mut acc_avx);
            scalar.conj_assign_c32(&mut acc_ref);
            assert_eq!(acc_avx, acc_ref, "in-place chain for len {len}");
        }
    });
}

#[test]
fn test_complex_reductions() {
    with_avx2(|avx, scalar| {
        for len in edge_case_lengths() {
            let x = complex_data(len, 8, 1.0);
            let y = complex_data(len, 9, 1.0);
            let r = real_data(len, 10, 1.0);

            let abs_sum: f32 = x.iter().map(|v| v.re.abs() + v.im.abs()).sum();
            assert_complex_reduction_close(
                avx.sum_c32(&x),
                scalar.sum_c32(&x),
                abs_sum,
                "sum_c32",
                len,
            );

            let abs_dot: f32 = x.iter().zip(&y).map(|(a, b)| 2.0 * a.norm() * b.norm()).sum();
            assert_complex_reduction_close(
                avx.dot_c32(&x, &y),
                scalar.dot_c32(&x, &y),
                abs_dot,
                "dot_c32",
                len,
            );
            assert_complex_reduction_close(
                avx.dot_conj_c32(&x, &y),
                scalar.dot_conj_c32(&x, &y),
                abs_dot,
                "dot_conj_c32",
                len,
            );
            assert_complex_reduction_close(
                avx.dot_c32_f32(&x, &r),
                scalar.dot_c32_f32(&x, &r),
                abs_dot,
                "dot_c32_f32",
                len,
            );

            if len > 0 {
                let mean = scalar.avg_power_c32(&x);
                assert_reduction_close(avx.avg_power_c32(&x), mean, mean, "avg_power_c32", len);
            }
            assert_eq!(
                avx.max_abs_index_c32(&x),
                scalar.max_abs_index_c32(&x),
                "max_abs_index_c32 for len {len}"
            );
        }
    });
}

#[test]
fn test_transforms() {
    with_avx2(|avx, scalar| {
        for len in edge_case_lengths() {
            let x = complex_data(len, 11, 5.0);

            let mut out_avx = vec![0.0; len];
            let mut out_ref = vec![0.0; len];
            avx.magnitude_sqr_c32(&x, &mut out_avx);
            scalar.magnitude_sqr_c32(&x, &mut out_ref);
            assert_eq!(out_avx, out_ref, "magnitude_sqr_c32 for len {len}");

            avx.magnitude_c32(&x, &mut out_avx);
            scalar.magnitude_c32(&x, &mut out_ref);
            assert_vectors_close(&out_avx, &out_ref, "magnitude_c32", len);

            let symbol = Cf32::new(0.75, -1.25);
            avx.square_dist_c32(symbol, &x, &mut out_avx);
            scalar.square_dist_c32(symbol, &x, &mut out_ref);
            assert_eq!(out_avx, out_ref, "square_dist_c32 for len {len}");

            let mut re_avx = vec![0.0; len];
            let mut im_avx = vec![0.0; len];
            let mut re_ref = vec![0.0; len];
            let mut im_ref = vec![0.0; len];
            avx.deinterleave_c32(&x, &mut re_avx, &mut im_avx);
            scalar.deinterleave_c32(&x, &mut re_ref, &mut im_ref);
            assert_eq!(re_avx, re_ref, "deinterleave_c32 real for len {len}");
            assert_eq!(im_avx, im_ref, "deinterleave_c32 imag for len {len}");

            let mut real_only = vec![0.0; len];
            avx.deinterleave_real_c32(&x, &mut real_only);
            assert_eq!(real_only, re_ref, "deinterleave_real_c32 for len {len}");
        }
    });
}

/// Finite samples whose squares overflow or flush to zero
fn extreme_samples(len: usize) -> Vec<Cf32> {
    let patterns = [
        Cf32::new(3e19, 4e19),
        Cf32::new(3e-25, 4e-25),
        Cf32::new(f32::MAX / 2.0, -f32::MAX / 2.0),
        Cf32::new(-1e19, 1e-25),
        Cf32::new(0.0, -1e-30),
        Cf32::new(2.5, -1.5),
        Cf32::new(1e-40, 0.0),
    ];
    (0..len).map(|i| patterns[i % patterns.len()]).collect()
}

#[test]
fn test_extreme_magnitudes() {
    with_avx2(|avx, scalar| {
        for len in edge_case_lengths() {
            let x = extreme_samples(len);

            let mut out_avx = vec![0.0; len];
            let mut out_ref = vec![0.0; len];
            avx.magnitude_c32(&x, &mut out_avx);
            scalar.magnitude_c32(&x, &mut out_ref);
            for (i, (&a, &e)) in out_avx.iter().zip(&out_ref).enumerate() {
                assert!(a.is_finite(), "magnitude_c32 overflowed at {i} for len {len}");
                assert_relative_eq!(a, e, max_relative = 1e-6);
            }

            // Squares overflow and underflow identically on both paths
            avx.magnitude_sqr_c32(&x, &mut out_avx);
            scalar.magnitude_sqr_c32(&x, &mut out_ref);
            assert_eq!(out_avx, out_ref, "magnitude_sqr_c32 for len {len}");

            if len > 0 {
                assert_eq!(
                    avx.max_abs_index_c32(&x),
                    scalar.max_abs_index_c32(&x),
                    "max_abs_index_c32 for len {len}"
                );
            }
        }
    });
}

#[test]
fn test_avg_power_range() {
    with_avx2(|avx, scalar| {
        for len in edge_case_lengths().into_iter().filter(|&n| n > 0) {
            // Every term is infinite, so both paths saturate
            let huge = vec![Cf32::new(f32::MAX / 2.0, 1.0); len];
            assert_eq!(avx.avg_power_c32(&huge), f32::INFINITY);
            assert_eq!(scalar.avg_power_c32(&huge), f32::INFINITY);

            // Every square flushes to zero
            let tiny = vec![Cf32::new(1e-25, -1e-25); len];
            assert_eq!(avx.avg_power_c32(&tiny), 0.0);
            assert_eq!(scalar.avg_power_c32(&tiny), 0.0);

            // Large but summable: 1024 terms of 1.8e35 stay below f32::MAX
            let large = vec![Cf32::new(-3e17, 3e17); len];
            let expected = scalar.avg_power_c32(&large);
            assert!(expected.is_finite());
            assert_relative_eq!(avx.avg_power_c32(&large), expected, max_relative = 1e-4);
        }
    });
}

#[test]
fn test_convert_f32_i16() {
    with_avx2(|avx, scalar| {
        for len in edge_case_lengths() {
            // Products up to ±50_000 exercise saturation at the i16 bounds
            let x = real_data(len, 12, 1.0);
            for scale in [1.0, 1000.0, 32_767.0, 50_000.0] {
                let mut out_avx = vec![0i16; len];
                let mut out_ref = vec![0i16; len];
                avx.convert_f32_i16(&x, scale, &mut out_avx);
                scalar.convert_f32_i16(&x, scale, &mut out_ref);
                assert_eq!(out_avx, out_ref, "convert_f32_i16 scale {scale} len {len}");
            }
        }
    });
}

#[test]
fn test_auto_backend_agrees_with_scalar() {
    let auto = sigvec_core::auto_backend();
    let scalar = ScalarBackend::new();
    let x = complex_data(37, 13, 2.0);
    let y = complex_data(37, 14, 2.0);

    let mut z_auto = vec![Cf32::default(); 37];
    let mut z_ref = vec![Cf32::default(); 37];
    auto.mul_c32(&x, &y, &mut z_auto);
    scalar.mul_c32(&x, &y, &mut z_ref);
    assert_complex_close(&z_auto, &z_ref, "mul_c32", 37);
}
