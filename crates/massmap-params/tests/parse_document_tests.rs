//! Parameter document tests
//!
//! End-to-end checks of the parser against fixture documents: unit
//! conversion, optional fields, repeated groups and round-trips.

use massmap_params::{
    parse_str, read_parameter_file, ConfigError, MapCenter, ParameterSet, PatchGeometry,
    RedshiftBin,
};
use massmap_test_utils::{ParamsFixture, PatchFixture, Workdir};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_pixel_size_converted_from_arcmin() {
    let xml = ParamsFixture::new()
        .with_patch_group(Some(1), &[PatchFixture::new(10.0, 35.16, 0.0, 0.0)])
        .to_xml();

    let params = parse_str(&xml).unwrap();

    assert!((params.pixel_size_deg() - 0.586).abs() < 1e-6);
}

#[test]
fn test_threshold_absence_distinct_from_zero() {
    let absent = parse_str(&ParamsFixture::new().to_xml()).unwrap();
    let zero = parse_str(&ParamsFixture::new().with_reduced_shear_threshold(0.0).to_xml()).unwrap();

    assert!(absent.reduced_shear_threshold().abs() < f64::EPSILON);
    assert!(zero.reduced_shear_threshold().abs() < f64::EPSILON);
    assert!(!absent.has_reduced_shear_threshold());
    assert!(zero.has_reduced_shear_threshold());
    assert_ne!(absent, zero);
}

#[test]
fn test_final_threshold_read_when_present() {
    let params = parse_str(&ParamsFixture::new().with_final_threshold(0.05).to_xml()).unwrap();

    assert!(params.has_final_threshold());
    assert!((params.final_threshold() - 0.05).abs() < f64::EPSILON);
}

#[test]
fn test_patch_entries_accumulate_in_order() {
    let xml = ParamsFixture::new()
        .with_patch_group(
            Some(2),
            &[
                PatchFixture::new(5.0, 30.0, 150.0, 2.0),
                PatchFixture::new(7.5, 30.0, 151.0, 3.0),
            ],
        )
        .to_xml();

    let params = parse_str(&xml).unwrap();

    assert!((params.patch_width_deg() - 7.5).abs() < f64::EPSILON);
    assert_eq!(params.patch_count(), 2);
    assert_eq!(
        params.map_centers(),
        vec![MapCenter::new(150.0, 2.0), MapCenter::new(151.0, 3.0)]
    );
}

#[test]
fn test_last_patch_group_count_wins() {
    let xml = ParamsFixture::new()
        .with_patch_group(Some(1), &[PatchFixture::new(5.0, 30.0, 10.0, 10.0)])
        .with_patch_group(None, &[PatchFixture::new(6.0, 60.0, 20.0, 20.0)])
        .with_patch_group(Some(3), &[PatchFixture::new(8.0, 90.0, 30.0, 30.0)])
        .to_xml();

    let params = parse_str(&xml).unwrap();

    assert_eq!(params.patch_count(), 3);
    assert_eq!(params.patches().len(), 3);
    assert!((params.patch_width_deg() - 8.0).abs() < f64::EPSILON);
    assert!((params.pixel_size_deg() - 1.5).abs() < 1e-12);
    assert_eq!(params.map_centers()[1], MapCenter::new(20.0, 20.0));
}

#[test]
fn test_redshift_bins_accumulate() {
    let xml = ParamsFixture::new()
        .with_bin_count(2)
        .with_redshift_bin(0.0, 1.0)
        .with_redshift_bin(1.0, 2.0)
        .to_xml();

    let params = parse_str(&xml).unwrap();

    assert_eq!(params.redshift_bin_count(), 2);
    assert_eq!(params.z_min(), vec![0.0, 1.0]);
    assert!((params.z_max() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_switches_accept_integer_and_boolean_forms() {
    let mut fixture = ParamsFixture::new();
    fixture.equal_var_per_scale = "true";
    fixture.force_b_mode = "0";
    fixture.add_border = "1";
    fixture.balanced_bins = "true";

    let params = parse_str(&fixture.to_xml()).unwrap();

    assert!(params.equal_variance_across_scales());
    assert!(!params.force_zero_b_modes());
    assert!(params.add_borders());
    assert!(params.balanced_bins());
}

#[test]
fn test_resample_count_read() {
    let params = parse_str(&ParamsFixture::new().with_resamples(25).to_xml()).unwrap();
    assert_eq!(params.resample_count(), 25);
}

#[test]
fn test_parse_is_independent_per_call() {
    let first = ParamsFixture::new()
        .with_patch_group(Some(1), &[PatchFixture::new(5.0, 30.0, 1.0, 1.0)])
        .with_redshift_bin(0.2, 0.8)
        .to_xml();
    let second = ParamsFixture::new().to_xml();

    let _ = parse_str(&first).unwrap();
    let params = parse_str(&second).unwrap();

    assert!(params.patches().is_empty());
    assert!(params.redshift_bins().is_empty());
}

#[test]
fn test_patch_count_mismatch_rejected() {
    let xml = ParamsFixture::new()
        .with_patch_group(
            Some(1),
            &[
                PatchFixture::new(5.0, 30.0, 1.0, 1.0),
                PatchFixture::new(5.0, 30.0, 2.0, 2.0),
            ],
        )
        .to_xml();

    let err = parse_str(&xml).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { field: "NPatches", .. }));
}

#[test]
fn test_bin_count_mismatch_rejected() {
    let xml = ParamsFixture::new()
        .with_bin_count(3)
        .with_redshift_bin(0.0, 1.0)
        .to_xml();

    let err = parse_str(&xml).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { field: "Nbins", .. }));
}

#[test]
fn test_malformed_document_fails_without_result() {
    let xml = ParamsFixture::new()
        .to_xml()
        .replace("<GaussSTD>0</GaussSTD>\n    </DenoiseParams>", "</DenoiseParams>");

    let err = parse_str(&xml).unwrap_err();

    assert!(matches!(err, ConfigError::MalformedConfig { .. }));
}

#[test]
fn test_read_from_file() {
    let workdir = Workdir::new();
    let path = workdir.write(
        "params.xml",
        &ParamsFixture::new().with_reduced_shear_threshold(3.0).to_xml(),
    );

    let params = read_parameter_file(&path).unwrap();

    assert!((params.reduced_shear_threshold() - 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_roundtrip_known_parameter_set() {
    let params = ParameterSet::builder()
        .with_reduced_shear_iterations(3)
        .with_inpainting_iterations(42)
        .with_patch_count(2)
        .with_patch(PatchGeometry::new(5.0, 30.0, MapCenter::new(150.25, 2.5)))
        .with_patch(PatchGeometry::new(7.5, 0.034_41, MapCenter::new(-10.0, -45.0)))
        .with_redshift_bin_count(2)
        .with_redshift_bin(RedshiftBin::new(0.0, 1.0))
        .with_redshift_bin(RedshiftBin::new(1.0, 2.0))
        .with_balanced_bins(true)
        .with_equal_variance_across_scales(true)
        .with_force_zero_b_modes(false)
        .with_scale_count(5)
        .with_add_borders(true)
        .with_reduced_shear_denoise_sigma(1.25)
        .with_final_denoise_sigma(2.5)
        .with_reduced_shear_threshold(Some(0.0))
        .with_final_threshold(Some(0.125))
        .with_resample_count(20)
        .build()
        .unwrap();

    let text = params.to_xml_string().unwrap();

    assert_eq!(parse_str(&text).unwrap(), params);
}

#[test]
fn test_pixel_sizes_survive_write_and_parse() {
    for i in 1..2000 {
        let pixel_arcmin = f64::from(i) * 0.000_37 * 60.0;
        let params = ParameterSet::builder()
            .with_patch(PatchGeometry::new(10.0, pixel_arcmin, MapCenter::new(0.0, 0.0)))
            .build()
            .unwrap();

        let parsed = parse_str(&params.to_xml_string().unwrap()).unwrap();

        assert_eq!(parsed, params, "pixel size {pixel_arcmin} arcmin");
        assert_eq!(parsed.pixel_size_deg().to_bits(), params.pixel_size_deg().to_bits());
    }
}

#[test]
fn test_write_then_read_file() {
    let workdir = Workdir::new();
    let path = workdir.path().join("normalized.xml");
    let params = ParameterSet::builder()
        .with_final_threshold(Some(1.0))
        .build()
        .unwrap();

    params.write_parameter_file(&path).unwrap();

    assert_eq!(read_parameter_file(&path).unwrap(), params);
}

fn patch_strategy() -> impl Strategy<Value = PatchGeometry> {
    (0.01f64..90.0, 0.001f64..120.0, -180.0f64..360.0, -90.0f64..90.0)
        .prop_map(|(width, pixel, x, y)| PatchGeometry::new(width, pixel, MapCenter::new(x, y)))
}

fn bin_strategy() -> impl Strategy<Value = RedshiftBin> {
    (0.0f64..5.0, 0.0f64..5.0).prop_map(|(z_min, span)| RedshiftBin::new(z_min, z_min + span))
}

proptest! {
    #[test]
    fn prop_roundtrip_parameter_set(
        iterations in (0u32..50, 0u32..500, 0u32..10, 0u32..100),
        flags in any::<(bool, bool, bool, bool)>(),
        sigmas in (0.0f64..10.0, 0.0f64..10.0),
        thresholds in (proptest::option::of(0.0f64..1.0), proptest::option::of(0.0f64..1.0)),
        patches in proptest::collection::vec(patch_strategy(), 0..4),
        bins in proptest::collection::vec(bin_strategy(), 0..4),
    ) {
        let mut builder = ParameterSet::builder()
            .with_reduced_shear_iterations(iterations.0)
            .with_inpainting_iterations(iterations.1)
            .with_scale_count(iterations.2)
            .with_resample_count(iterations.3)
            .with_balanced_bins(flags.0)
            .with_equal_variance_across_scales(flags.1)
            .with_force_zero_b_modes(flags.2)
            .with_add_borders(flags.3)
            .with_reduced_shear_denoise_sigma(sigmas.0)
            .with_final_denoise_sigma(sigmas.1)
            .with_reduced_shear_threshold(thresholds.0)
            .with_final_threshold(thresholds.1);
        if !patches.is_empty() {
            builder = builder.with_patch_count(u32::try_from(patches.len()).unwrap());
        }
        if !bins.is_empty() {
            builder = builder.with_redshift_bin_count(u32::try_from(bins.len()).unwrap());
        }
        for patch in patches {
            builder = builder.with_patch(patch);
        }
        for bin in bins {
            builder = builder.with_redshift_bin(bin);
        }
        let params = builder.build().unwrap();

        let text = params.to_xml_string().unwrap();
        prop_assert_eq!(parse_str(&text).unwrap(), params);
    }
}
