//! Parameter document parser
//!
//! Walks the nested parameter document into a flat [`ParameterSet`]:
//! - Scalar blocks (reduced shear, gaps, denoising) are required
//! - Thresholds are optional and stay absent when missing
//! - Patch groups and redshift bins are accumulated in document order
//!
//! Parsing either yields a complete parameter set or an error; a document
//! that fails part-way never produces a partially filled result.

use crate::error::ConfigError;
use crate::parameters::{MapCenter, ParameterSet, PatchGeometry, RedshiftBin};
use std::path::Path;

pub(crate) mod binding;

use binding::ParamsDocument;

/// Origin label used in errors for in-memory documents
const INLINE_ORIGIN: &str = "<inline document>";

/// Stateless parser for convergence-patch parameter documents
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterParser;

impl ParameterParser {
    /// Create new parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse document text into a parameter set
    ///
    /// # Errors
    /// - `ConfigError::MalformedConfig` if the document does not match the schema
    /// - `ConfigError::InvalidValue` if a count is out of range
    pub fn parse(&self, content: &str) -> Result<ParameterSet, ConfigError> {
        Self::parse_with_origin(content, INLINE_ORIGIN)
    }

    /// Read and parse a parameter document from disk
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - any error from [`ParameterParser::parse`]
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<ParameterSet, ConfigError> {
        let path = path.as_ref();
        tracing::info!("Getting information from input parameter XML file {}", path.display());

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;

        tracing::debug!("Parsing file {} ...", path.display());
        Self::parse_with_origin(&content, &path.display().to_string())
    }

    fn parse_with_origin(content: &str, origin: &str) -> Result<ParameterSet, ConfigError> {
        let document: ParamsDocument = quick_xml::de::from_str(content).map_err(|e| {
            tracing::error!("Failed to parse parameter document {}: {}", origin, e);
            ConfigError::malformed(origin, e)
        })?;
        tracing::debug!("Binding object created successfully");

        from_document(document)
    }
}

/// Read and parse a parameter document from disk
///
/// # Errors
/// See [`ParameterParser::read_file`].
pub fn read_parameter_file(path: impl AsRef<Path>) -> Result<ParameterSet, ConfigError> {
    ParameterParser::new().read_file(path)
}

/// Parse parameter document text
///
/// # Errors
/// See [`ParameterParser::parse`].
pub fn parse_str(content: &str) -> Result<ParameterSet, ConfigError> {
    ParameterParser::new().parse(content)
}

/// Fold a bound document into a parameter set, in document order
fn from_document(document: ParamsDocument) -> Result<ParameterSet, ConfigError> {
    let data = document.data;
    let mut builder = ParameterSet::builder();

    builder = builder
        .with_inpainting_iterations(data.gaps.n_inpaint)
        .with_reduced_shear_iterations(data.reduced_shear.iterations)
        .with_reduced_shear_denoise_sigma(data.reduced_shear.gauss_std);
    tracing::info!("Number of Inpainting iterations : {}", data.gaps.n_inpaint);
    tracing::info!(
        "Number of iterations for Reduced shear : {}",
        data.reduced_shear.iterations
    );

    if let Some(threshold) = data.reduced_shear.threshold_fdr {
        tracing::debug!("The XML file contains ThresholdFDR for reduced shear");
        tracing::info!("ThresholdFDR for reduced shear : {}", threshold);
    }
    builder = builder.with_reduced_shear_threshold(data.reduced_shear.threshold_fdr);

    for group in data.patch_params {
        if let Some(count) = group.n_patches {
            tracing::info!("Number of patches : {}", count);
            builder = builder.with_patch_count(count);
        }
        for entry in group.patch_list {
            let patch = PatchGeometry::new(
                entry.patch_width,
                entry.pixel_size,
                MapCenter::new(entry.proj_ctr.longitude, entry.proj_ctr.latitude),
            );
            tracing::info!("PatchWidth : {}", patch.width_deg);
            tracing::info!("PixelSize (deg) : {}", patch.pixel_size_deg());
            tracing::info!("CenterX : {}", patch.center.x);
            tracing::info!("CenterY : {}", patch.center.y);
            builder = builder.with_patch(patch);
        }
    }

    let gaps = data.gaps;
    tracing::info!("Equal variance per scale : {}", gaps.equal_var_per_scale);
    tracing::info!("force B mode : {}", gaps.force_b_mode);
    tracing::info!("Number of inpainting scales : {}", gaps.n_inp_scale);
    tracing::info!("add borders : {}", gaps.add_border);
    builder = builder
        .with_equal_variance_across_scales(gaps.equal_var_per_scale)
        .with_force_zero_b_modes(gaps.force_b_mode)
        .with_scale_count(gaps.n_inp_scale)
        .with_add_borders(gaps.add_border);

    tracing::info!("Final denoising sigma : {}", data.denoise.gauss_std);
    if let Some(threshold) = data.denoise.threshold_fdr {
        tracing::info!("Final ThresholdFDR : {}", threshold);
    }
    builder = builder
        .with_final_denoise_sigma(data.denoise.gauss_std)
        .with_final_threshold(data.denoise.threshold_fdr);

    let bins = data.redshift_bins;
    tracing::info!("Number of redshift bins : {}", bins.n_bins);
    builder = builder.with_redshift_bin_count(bins.n_bins);
    for bin in bins.bins {
        tracing::info!("Redshift bin zMin : {}", bin.z_min);
        tracing::info!("Redshift bin zMax : {}", bin.z_max);
        builder = builder.with_redshift_bin(RedshiftBin::new(bin.z_min, bin.z_max));
    }

    tracing::info!("Balanced bins : {}", bins.balanced_bins);
    tracing::info!("Number of resamples : {}", data.n_resamples);
    builder = builder
        .with_balanced_bins(bins.balanced_bins)
        .with_resample_count(data.n_resamples);

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<DpdTwoDMassParamsConvergencePatch>
  <Data>
    <ReducedShear>
      <NItReducedShear>0</NItReducedShear>
      <GaussSTD>0.5</GaussSTD>
    </ReducedShear>
    <GapsParams>
      <NInpaint>50</NInpaint>
      <EqualVarPerScale>1</EqualVarPerScale>
      <ForceBMode>0</ForceBMode>
      <NInpScale>4</NInpScale>
      <AddBorder>true</AddBorder>
    </GapsParams>
    <DenoiseParams>
      <GaussSTD>1.5</GaussSTD>
      <ThresholdFDR>0.0</ThresholdFDR>
    </DenoiseParams>
    <RedshiftBins>
      <Nbins>1</Nbins>
      <BalancedBins>0</BalancedBins>
    </RedshiftBins>
  </Data>
</DpdTwoDMassParamsConvergencePatch>
"#;

    #[test]
    fn parses_scalar_blocks() {
        let params = parse_str(MINIMAL).unwrap();

        assert_eq!(params.reduced_shear_iterations(), 0);
        assert_eq!(params.inpainting_iterations(), 50);
        assert!((params.reduced_shear_denoise_sigma() - 0.5).abs() < f64::EPSILON);
        assert!((params.final_denoise_sigma() - 1.5).abs() < f64::EPSILON);
        assert!(params.equal_variance_across_scales());
        assert!(!params.force_zero_b_modes());
        assert_eq!(params.scale_count(), 4);
        assert!(params.add_borders());
        assert!(!params.balanced_bins());
        assert_eq!(params.resample_count(), 0);
    }

    #[test]
    fn optional_thresholds_keep_presence() {
        let params = parse_str(MINIMAL).unwrap();

        assert!(!params.has_reduced_shear_threshold());
        assert!(params.reduced_shear_threshold().abs() < f64::EPSILON);
        assert!(params.has_final_threshold());
        assert!(params.final_threshold().abs() < f64::EPSILON);
    }

    #[test]
    fn missing_patches_keep_defaults() {
        let params = parse_str(MINIMAL).unwrap();

        assert_eq!(params.patch_count(), 1);
        assert!(params.map_centers().is_empty());
        assert!((params.patch_width_deg() - 10.0).abs() < f64::EPSILON);
        assert_eq!(params.z_min(), vec![0.0]);
        assert!((params.z_max() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_required_block_is_malformed() {
        let content = MINIMAL.replace("<NInpaint>50</NInpaint>", "");
        let err = parse_str(&content).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedConfig { .. }));
    }

    #[test]
    fn bad_switch_is_malformed() {
        let content = MINIMAL.replace("<ForceBMode>0</ForceBMode>", "<ForceBMode>maybe</ForceBMode>");
        let err = parse_str(&content).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn garbage_is_malformed() {
        let err = parse_str("this is not xml").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedConfig { .. }));
    }

    #[test]
    fn zero_bins_rejected() {
        let content = MINIMAL.replace("<Nbins>1</Nbins>", "<Nbins>0</Nbins>");
        let err = parse_str(&content).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "Nbins", .. }));
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let err = read_parameter_file("/definitely/not/here/params.xml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
