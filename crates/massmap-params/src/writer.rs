//! Parameter document writer
//!
//! Renders a [`ParameterSet`] in the same document shape the parser reads,
//! so a normalized parameter file can be handed to the map maker.

use crate::error::ConfigError;
use crate::parameters::ParameterSet;
use crate::parser::binding::{
    DenoiseBlock, GapsBlock, ParamsData, ParamsDocument, PatchEntry, PatchParamsGroup,
    ProjectionCenter, RedshiftBinEntry, RedshiftBinsBlock, ReducedShearBlock,
};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

impl ParameterSet {
    /// Render as parameter document text
    ///
    /// All patch entries are written into a single patch group carrying the
    /// patch count.
    ///
    /// # Errors
    /// Returns `ConfigError::Serialization` if rendering fails.
    pub fn to_xml_string(&self) -> Result<String, ConfigError> {
        let document = to_document(self);

        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut body);
        serializer.indent(' ', 2);
        document.serialize(serializer)?;

        Ok(format!("{XML_DECLARATION}\n{body}\n"))
    }

    /// Write as a parameter document, replacing any existing file
    ///
    /// # Errors
    /// - `ConfigError::Serialization` if rendering fails
    /// - `ConfigError::Io` if the file cannot be written
    pub fn write_parameter_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = self.to_xml_string()?;

        let mut file =
            std::fs::File::create(path).map_err(|e| ConfigError::io_error(path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| ConfigError::io_error(path, e))?;

        tracing::debug!("Wrote parameter document {}", path.display());
        Ok(())
    }
}

fn to_document(params: &ParameterSet) -> ParamsDocument {
    let patch_list = params
        .patches()
        .iter()
        .map(|patch| PatchEntry {
            patch_width: patch.width_deg,
            pixel_size: patch.pixel_size_arcmin,
            proj_ctr: ProjectionCenter {
                longitude: patch.center.x,
                latitude: patch.center.y,
            },
        })
        .collect();

    let bins = params
        .redshift_bins()
        .iter()
        .map(|bin| RedshiftBinEntry {
            z_min: bin.z_min,
            z_max: bin.z_max,
        })
        .collect();

    ParamsDocument {
        data: ParamsData {
            reduced_shear: ReducedShearBlock {
                iterations: params.reduced_shear_iterations(),
                gauss_std: params.reduced_shear_denoise_sigma(),
                threshold_fdr: params.reduced_shear_threshold_opt(),
            },
            patch_params: vec![PatchParamsGroup {
                n_patches: Some(params.patch_count()),
                patch_list,
            }],
            gaps: GapsBlock {
                n_inpaint: params.inpainting_iterations(),
                equal_var_per_scale: params.equal_variance_across_scales(),
                force_b_mode: params.force_zero_b_modes(),
                n_inp_scale: params.scale_count(),
                add_border: params.add_borders(),
            },
            denoise: DenoiseBlock {
                gauss_std: params.final_denoise_sigma(),
                threshold_fdr: params.final_threshold_opt(),
            },
            redshift_bins: RedshiftBinsBlock {
                n_bins: params.redshift_bin_count(),
                balanced_bins: params.balanced_bins(),
                bins,
            },
            n_resamples: params.resample_count(),
        },
    }
}
