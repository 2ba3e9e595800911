//! Validated parameter set for a map-making run
//!
//! A [`ParameterSet`] is built once per run, either from defaults or from a
//! parameter document, and is read-only afterwards. Patch and redshift-bin
//! records are kept in document order; the scalar patch width, pixel size and
//! upper redshift bound are derived from the last record.

use crate::error::ConfigError;
use crate::units;

/// Default values applied when the document does not override a parameter
pub mod defaults {
    /// Reduced-shear iterations (0 runs the direct estimator)
    pub const REDUCED_SHEAR_ITERATIONS: u32 = 10;
    /// Inpainting iterations
    pub const INPAINTING_ITERATIONS: u32 = 100;
    /// Number of patches
    pub const PATCH_COUNT: u32 = 1;
    /// Pixel size in degrees (0.586 arcmin)
    pub const PIXEL_SIZE_DEG: f64 = 0.586 / 60.0;
    /// Patch width in degrees
    pub const PATCH_WIDTH_DEG: f64 = 10.0;
    /// Number of redshift bins
    pub const REDSHIFT_BIN_COUNT: u32 = 1;
    /// Lower redshift bound when no bin is given
    pub const Z_MIN: f64 = 0.0;
    /// Upper redshift bound when no bin is given
    pub const Z_MAX: f64 = 10.0;
    /// B-modes forced to zero inside the mask
    pub const FORCE_ZERO_B_MODES: bool = true;
}

/// Projection centre of a patch, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCenter {
    /// Longitude (RA)
    pub x: f64,
    /// Latitude (Dec)
    pub y: f64,
}

impl MapCenter {
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry of a single patch entry
///
/// The pixel size is kept in arcminutes, the unit of the document, so a
/// written and re-read entry compares equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchGeometry {
    /// Patch width in degrees
    pub width_deg: f64,
    /// Pixel size in arcminutes
    pub pixel_size_arcmin: f64,
    /// Projection centre
    pub center: MapCenter,
}

impl PatchGeometry {
    #[inline]
    #[must_use]
    pub fn new(width_deg: f64, pixel_size_arcmin: f64, center: MapCenter) -> Self {
        Self {
            width_deg,
            pixel_size_arcmin,
            center,
        }
    }

    /// Pixel size in degrees
    #[inline]
    #[must_use]
    pub fn pixel_size_deg(&self) -> f64 {
        units::arcmin_to_deg(self.pixel_size_arcmin)
    }
}

/// A `[z_min, z_max)` redshift interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedshiftBin {
    pub z_min: f64,
    pub z_max: f64,
}

impl RedshiftBin {
    #[inline]
    #[must_use]
    pub fn new(z_min: f64, z_max: f64) -> Self {
        Self { z_min, z_max }
    }
}

/// Immutable parameter record for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    reduced_shear_iterations: u32,
    inpainting_iterations: u32,
    patch_count: u32,
    patches: Vec<PatchGeometry>,
    redshift_bin_count: u32,
    redshift_bins: Vec<RedshiftBin>,
    balanced_bins: bool,
    equal_variance_across_scales: bool,
    force_zero_b_modes: bool,
    scale_count: u32,
    add_borders: bool,
    reduced_shear_denoise_sigma: f64,
    final_denoise_sigma: f64,
    reduced_shear_threshold: Option<f64>,
    final_threshold: Option<f64>,
    resample_count: u32,
}

impl ParameterSet {
    /// Parameter set with every field at its default
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a parameter set from defaults
    #[inline]
    #[must_use]
    pub fn builder() -> ParameterSetBuilder {
        ParameterSetBuilder::new()
    }

    /// Reduced-shear iterations; 0 means run the direct estimator only
    #[inline]
    #[must_use]
    pub fn reduced_shear_iterations(&self) -> u32 {
        self.reduced_shear_iterations
    }

    #[inline]
    #[must_use]
    pub fn inpainting_iterations(&self) -> u32 {
        self.inpainting_iterations
    }

    #[inline]
    #[must_use]
    pub fn patch_count(&self) -> u32 {
        self.patch_count
    }

    /// Every patch entry, in document order
    #[inline]
    #[must_use]
    pub fn patches(&self) -> &[PatchGeometry] {
        &self.patches
    }

    /// Pixel size of the last patch entry, in degrees
    #[must_use]
    pub fn pixel_size_deg(&self) -> f64 {
        self.patches
            .last()
            .map_or(defaults::PIXEL_SIZE_DEG, PatchGeometry::pixel_size_deg)
    }

    /// Width of the last patch entry, in degrees
    #[must_use]
    pub fn patch_width_deg(&self) -> f64 {
        self.patches
            .last()
            .map_or(defaults::PATCH_WIDTH_DEG, |p| p.width_deg)
    }

    /// Projection centres, one per patch entry
    #[must_use]
    pub fn map_centers(&self) -> Vec<MapCenter> {
        self.patches.iter().map(|p| p.center).collect()
    }

    #[inline]
    #[must_use]
    pub fn redshift_bin_count(&self) -> u32 {
        self.redshift_bin_count
    }

    /// Every redshift bin, in document order
    #[inline]
    #[must_use]
    pub fn redshift_bins(&self) -> &[RedshiftBin] {
        &self.redshift_bins
    }

    /// Lower bound of every bin; `[0.0]` when no bin was given
    #[must_use]
    pub fn z_min(&self) -> Vec<f64> {
        if self.redshift_bins.is_empty() {
            vec![defaults::Z_MIN]
        } else {
            self.redshift_bins.iter().map(|b| b.z_min).collect()
        }
    }

    /// Upper bound shared by all bins (taken from the last bin)
    #[must_use]
    pub fn z_max(&self) -> f64 {
        self.redshift_bins
            .last()
            .map_or(defaults::Z_MAX, |b| b.z_max)
    }

    #[inline]
    #[must_use]
    pub fn balanced_bins(&self) -> bool {
        self.balanced_bins
    }

    #[inline]
    #[must_use]
    pub fn equal_variance_across_scales(&self) -> bool {
        self.equal_variance_across_scales
    }

    #[inline]
    #[must_use]
    pub fn force_zero_b_modes(&self) -> bool {
        self.force_zero_b_modes
    }

    /// Inpainting scale count; 0 lets the map maker choose
    #[inline]
    #[must_use]
    pub fn scale_count(&self) -> u32 {
        self.scale_count
    }

    #[inline]
    #[must_use]
    pub fn add_borders(&self) -> bool {
        self.add_borders
    }

    #[inline]
    #[must_use]
    pub fn reduced_shear_denoise_sigma(&self) -> f64 {
        self.reduced_shear_denoise_sigma
    }

    #[inline]
    #[must_use]
    pub fn final_denoise_sigma(&self) -> f64 {
        self.final_denoise_sigma
    }

    /// Reduced-shear FDR threshold, 0.0 when the document omits it
    #[inline]
    #[must_use]
    pub fn reduced_shear_threshold(&self) -> f64 {
        self.reduced_shear_threshold.unwrap_or(0.0)
    }

    /// Whether the document supplied a reduced-shear threshold
    #[inline]
    #[must_use]
    pub fn has_reduced_shear_threshold(&self) -> bool {
        self.reduced_shear_threshold.is_some()
    }

    #[inline]
    #[must_use]
    pub fn reduced_shear_threshold_opt(&self) -> Option<f64> {
        self.reduced_shear_threshold
    }

    /// Final FDR threshold, 0.0 when the document omits it
    #[inline]
    #[must_use]
    pub fn final_threshold(&self) -> f64 {
        self.final_threshold.unwrap_or(0.0)
    }

    /// Whether the document supplied a final threshold
    #[inline]
    #[must_use]
    pub fn has_final_threshold(&self) -> bool {
        self.final_threshold.is_some()
    }

    #[inline]
    #[must_use]
    pub fn final_threshold_opt(&self) -> Option<f64> {
        self.final_threshold
    }

    #[inline]
    #[must_use]
    pub fn resample_count(&self) -> u32 {
        self.resample_count
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            reduced_shear_iterations: defaults::REDUCED_SHEAR_ITERATIONS,
            inpainting_iterations: defaults::INPAINTING_ITERATIONS,
            patch_count: defaults::PATCH_COUNT,
            patches: Vec::new(),
            redshift_bin_count: defaults::REDSHIFT_BIN_COUNT,
            redshift_bins: Vec::new(),
            balanced_bins: false,
            equal_variance_across_scales: false,
            force_zero_b_modes: defaults::FORCE_ZERO_B_MODES,
            scale_count: 0,
            add_borders: false,
            reduced_shear_denoise_sigma: 0.0,
            final_denoise_sigma: 0.0,
            reduced_shear_threshold: None,
            final_threshold: None,
            resample_count: 0,
        }
    }
}

/// Accumulator for a [`ParameterSet`]
///
/// Each parse starts from a fresh builder, so no state carries over
/// between documents.
#[derive(Debug, Clone, Default)]
pub struct ParameterSetBuilder {
    inner: ParameterSet,
}

impl ParameterSetBuilder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_reduced_shear_iterations(mut self, iterations: u32) -> Self {
        self.inner.reduced_shear_iterations = iterations;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_inpainting_iterations(mut self, iterations: u32) -> Self {
        self.inner.inpainting_iterations = iterations;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_patch_count(mut self, count: u32) -> Self {
        self.inner.patch_count = count;
        self
    }

    /// Append a patch entry
    #[inline]
    #[must_use]
    pub fn with_patch(mut self, patch: PatchGeometry) -> Self {
        self.inner.patches.push(patch);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_redshift_bin_count(mut self, count: u32) -> Self {
        self.inner.redshift_bin_count = count;
        self
    }

    /// Append a redshift bin
    #[inline]
    #[must_use]
    pub fn with_redshift_bin(mut self, bin: RedshiftBin) -> Self {
        self.inner.redshift_bins.push(bin);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_balanced_bins(mut self, balanced: bool) -> Self {
        self.inner.balanced_bins = balanced;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_equal_variance_across_scales(mut self, equal: bool) -> Self {
        self.inner.equal_variance_across_scales = equal;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_force_zero_b_modes(mut self, force: bool) -> Self {
        self.inner.force_zero_b_modes = force;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_scale_count(mut self, count: u32) -> Self {
        self.inner.scale_count = count;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_add_borders(mut self, add: bool) -> Self {
        self.inner.add_borders = add;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_reduced_shear_denoise_sigma(mut self, sigma: f64) -> Self {
        self.inner.reduced_shear_denoise_sigma = sigma;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_final_denoise_sigma(mut self, sigma: f64) -> Self {
        self.inner.final_denoise_sigma = sigma;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_reduced_shear_threshold(mut self, threshold: Option<f64>) -> Self {
        self.inner.reduced_shear_threshold = threshold;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_final_threshold(mut self, threshold: Option<f64>) -> Self {
        self.inner.final_threshold = threshold;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_resample_count(mut self, count: u32) -> Self {
        self.inner.resample_count = count;
        self
    }

    /// Finish the parameter set
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when the patch or redshift-bin
    /// count is zero, or when entries are given and their number differs
    /// from the declared count.
    pub fn build(self) -> Result<ParameterSet, ConfigError> {
        let params = self.inner;

        if params.patch_count == 0 {
            return Err(ConfigError::invalid_value("NPatches", "must be at least 1"));
        }
        if params.redshift_bin_count == 0 {
            return Err(ConfigError::invalid_value("Nbins", "must be at least 1"));
        }

        if !params.patches.is_empty() && params.patches.len() != params.patch_count as usize {
            return Err(ConfigError::invalid_value(
                "NPatches",
                format!(
                    "{} patches declared but {} patch entries given",
                    params.patch_count,
                    params.patches.len()
                ),
            ));
        }
        if !params.redshift_bins.is_empty()
            && params.redshift_bins.len() != params.redshift_bin_count as usize
        {
            return Err(ConfigError::invalid_value(
                "Nbins",
                format!(
                    "{} bins declared but {} bin entries given",
                    params.redshift_bin_count,
                    params.redshift_bins.len()
                ),
            ));
        }

        Ok(params)
    }
}
