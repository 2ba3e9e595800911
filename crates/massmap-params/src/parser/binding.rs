//! Serde binding for the convergence-patch parameter document
//!
//! Mirrors the element layout of `DpdTwoDMassParamsConvergencePatch`.
//! Only the fields read by the map maker are bound; anything else in
//! the document (header, provenance) is ignored.

use serde::{Deserialize, Serialize};

use crate::units::switch;

/// Root element of the parameter product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "DpdTwoDMassParamsConvergencePatch")]
pub(crate) struct ParamsDocument {
    #[serde(rename = "Data")]
    pub(crate) data: ParamsData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ParamsData {
    #[serde(rename = "ReducedShear")]
    pub(crate) reduced_shear: ReducedShearBlock,

    #[serde(rename = "PatchParams", default)]
    pub(crate) patch_params: Vec<PatchParamsGroup>,

    #[serde(rename = "GapsParams")]
    pub(crate) gaps: GapsBlock,

    #[serde(rename = "DenoiseParams")]
    pub(crate) denoise: DenoiseBlock,

    #[serde(rename = "RedshiftBins")]
    pub(crate) redshift_bins: RedshiftBinsBlock,

    #[serde(rename = "NResamples", default)]
    pub(crate) n_resamples: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReducedShearBlock {
    #[serde(rename = "NItReducedShear")]
    pub(crate) iterations: u32,

    #[serde(rename = "GaussSTD")]
    pub(crate) gauss_std: f64,

    #[serde(rename = "ThresholdFDR", default, skip_serializing_if = "Option::is_none")]
    pub(crate) threshold_fdr: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PatchParamsGroup {
    #[serde(rename = "NPatches", default, skip_serializing_if = "Option::is_none")]
    pub(crate) n_patches: Option<u32>,

    #[serde(rename = "PatchList", default)]
    pub(crate) patch_list: Vec<PatchEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PatchEntry {
    /// Degrees
    #[serde(rename = "PatchWidth")]
    pub(crate) patch_width: f64,

    /// Arcminutes
    #[serde(rename = "PixelSize")]
    pub(crate) pixel_size: f64,

    #[serde(rename = "ProjCtr")]
    pub(crate) proj_ctr: ProjectionCenter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ProjectionCenter {
    #[serde(rename = "Longitude")]
    pub(crate) longitude: f64,

    #[serde(rename = "Latitude")]
    pub(crate) latitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct GapsBlock {
    #[serde(rename = "NInpaint")]
    pub(crate) n_inpaint: u32,

    #[serde(rename = "EqualVarPerScale", with = "switch")]
    pub(crate) equal_var_per_scale: bool,

    #[serde(rename = "ForceBMode", with = "switch")]
    pub(crate) force_b_mode: bool,

    #[serde(rename = "NInpScale")]
    pub(crate) n_inp_scale: u32,

    #[serde(rename = "AddBorder", with = "switch")]
    pub(crate) add_border: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct DenoiseBlock {
    #[serde(rename = "GaussSTD")]
    pub(crate) gauss_std: f64,

    #[serde(rename = "ThresholdFDR", default, skip_serializing_if = "Option::is_none")]
    pub(crate) threshold_fdr: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RedshiftBinsBlock {
    #[serde(rename = "Nbins")]
    pub(crate) n_bins: u32,

    #[serde(rename = "BalancedBins", with = "switch")]
    pub(crate) balanced_bins: bool,

    #[serde(rename = "RedshiftBin", default)]
    pub(crate) bins: Vec<RedshiftBinEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RedshiftBinEntry {
    #[serde(rename = "ZMin")]
    pub(crate) z_min: f64,

    #[serde(rename = "ZMax")]
    pub(crate) z_max: f64,
}
