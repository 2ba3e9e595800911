//! Testing utilities for the mass-map workspace
//!
//! Shared document fixtures and a scratch work directory.

#![allow(missing_docs)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One `PatchList` entry: width (deg), pixel size (arcmin), centre (deg)
#[derive(Debug, Clone, Copy)]
pub struct PatchFixture {
    pub width_deg: f64,
    pub pixel_arcmin: f64,
    pub longitude: f64,
    pub latitude: f64,
}

impl PatchFixture {
    pub fn new(width_deg: f64, pixel_arcmin: f64, longitude: f64, latitude: f64) -> Self {
        Self {
            width_deg,
            pixel_arcmin,
            longitude,
            latitude,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct PatchGroupFixture {
    n_patches: Option<u32>,
    patches: Vec<PatchFixture>,
}

/// Builder for parameter document text
#[derive(Debug, Clone)]
pub struct ParamsFixture {
    pub reduced_shear_iterations: u32,
    pub reduced_shear_sigma: f64,
    pub reduced_shear_threshold: Option<f64>,
    pub inpainting_iterations: u32,
    pub equal_var_per_scale: &'static str,
    pub force_b_mode: &'static str,
    pub scale_count: u32,
    pub add_border: &'static str,
    pub final_sigma: f64,
    pub final_threshold: Option<f64>,
    pub bin_count: u32,
    pub balanced_bins: &'static str,
    pub resamples: Option<u32>,
    groups: Vec<PatchGroupFixture>,
    bins: Vec<(f64, f64)>,
}

impl Default for ParamsFixture {
    fn default() -> Self {
        Self {
            reduced_shear_iterations: 10,
            reduced_shear_sigma: 0.0,
            reduced_shear_threshold: None,
            inpainting_iterations: 100,
            equal_var_per_scale: "0",
            force_b_mode: "1",
            scale_count: 0,
            add_border: "0",
            final_sigma: 0.0,
            final_threshold: None,
            bin_count: 1,
            balanced_bins: "0",
            resamples: None,
            groups: Vec::new(),
            bins: Vec::new(),
        }
    }
}

impl ParamsFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patch_group(mut self, n_patches: Option<u32>, patches: &[PatchFixture]) -> Self {
        self.groups.push(PatchGroupFixture {
            n_patches,
            patches: patches.to_vec(),
        });
        self
    }

    pub fn with_redshift_bin(mut self, z_min: f64, z_max: f64) -> Self {
        self.bins.push((z_min, z_max));
        self
    }

    pub fn with_bin_count(mut self, count: u32) -> Self {
        self.bin_count = count;
        self
    }

    pub fn with_reduced_shear_threshold(mut self, threshold: f64) -> Self {
        self.reduced_shear_threshold = Some(threshold);
        self
    }

    pub fn with_final_threshold(mut self, threshold: f64) -> Self {
        self.final_threshold = Some(threshold);
        self
    }

    pub fn with_resamples(mut self, count: u32) -> Self {
        self.resamples = Some(count);
        self
    }

    /// Render the document text
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<DpdTwoDMassParamsConvergencePatch>\n");
        xml.push_str("  <Header>\n    <ProductType>DpdTwoDMassParamsConvergencePatch</ProductType>\n  </Header>\n");
        xml.push_str("  <Data>\n");

        xml.push_str("    <ReducedShear>\n");
        writeln!(xml, "      <NItReducedShear>{}</NItReducedShear>", self.reduced_shear_iterations).unwrap();
        writeln!(xml, "      <GaussSTD>{}</GaussSTD>", self.reduced_shear_sigma).unwrap();
        if let Some(threshold) = self.reduced_shear_threshold {
            writeln!(xml, "      <ThresholdFDR>{threshold}</ThresholdFDR>").unwrap();
        }
        xml.push_str("    </ReducedShear>\n");

        for group in &self.groups {
            xml.push_str("    <PatchParams>\n");
            if let Some(n) = group.n_patches {
                writeln!(xml, "      <NPatches>{n}</NPatches>").unwrap();
            }
            for patch in &group.patches {
                xml.push_str("      <PatchList>\n");
                writeln!(xml, "        <PatchWidth>{}</PatchWidth>", patch.width_deg).unwrap();
                writeln!(xml, "        <PixelSize>{}</PixelSize>", patch.pixel_arcmin).unwrap();
                xml.push_str("        <ProjCtr>\n");
                writeln!(xml, "          <Longitude>{}</Longitude>", patch.longitude).unwrap();
                writeln!(xml, "          <Latitude>{}</Latitude>", patch.latitude).unwrap();
                xml.push_str("        </ProjCtr>\n");
                xml.push_str("      </PatchList>\n");
            }
            xml.push_str("    </PatchParams>\n");
        }

        xml.push_str("    <GapsParams>\n");
        writeln!(xml, "      <NInpaint>{}</NInpaint>", self.inpainting_iterations).unwrap();
        writeln!(xml, "      <EqualVarPerScale>{}</EqualVarPerScale>", self.equal_var_per_scale).unwrap();
        writeln!(xml, "      <ForceBMode>{}</ForceBMode>", self.force_b_mode).unwrap();
        writeln!(xml, "      <NInpScale>{}</NInpScale>", self.scale_count).unwrap();
        writeln!(xml, "      <AddBorder>{}</AddBorder>", self.add_border).unwrap();
        xml.push_str("    </GapsParams>\n");

        xml.push_str("    <DenoiseParams>\n");
        writeln!(xml, "      <GaussSTD>{}</GaussSTD>", self.final_sigma).unwrap();
        if let Some(threshold) = self.final_threshold {
            writeln!(xml, "      <ThresholdFDR>{threshold}</ThresholdFDR>").unwrap();
        }
        xml.push_str("    </DenoiseParams>\n");

        xml.push_str("    <RedshiftBins>\n");
        writeln!(xml, "      <Nbins>{}</Nbins>", self.bin_count).unwrap();
        writeln!(xml, "      <BalancedBins>{}</BalancedBins>", self.balanced_bins).unwrap();
        for (z_min, z_max) in &self.bins {
            writeln!(
                xml,
                "      <RedshiftBin>\n        <ZMin>{z_min}</ZMin>\n        <ZMax>{z_max}</ZMax>\n      </RedshiftBin>"
            ).unwrap();
        }
        xml.push_str("    </RedshiftBins>\n");

        if let Some(n) = self.resamples {
            writeln!(xml, "    <NResamples>{n}</NResamples>").unwrap();
        }

        xml.push_str("  </Data>\n");
        xml.push_str("</DpdTwoDMassParamsConvergencePatch>\n");
        xml
    }
}

/// Input catalog product pointing at `file_name`
pub fn catalog_product_xml(file_name: &str) -> String {
    catalog_product_xml_with_status(file_name, Some("PROPOSED"))
}

/// Input catalog product with an optional `filestatus` attribute
pub fn catalog_product_xml_with_status(file_name: &str, status: Option<&str>) -> String {
    let status = status
        .map(|s| format!(r#" filestatus="{s}""#))
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<DpdTwoDMassLensMCCatalog>
  <Header>
    <ProductType>DpdTwoDMassLensMCCatalog</ProductType>
  </Header>
  <Data>
    <ShearCatalog format="le3.wl.2dmass.input.lensmccatalog" version="0.1">
      <DataContainer{status}>
        <FileName>{file_name}</FileName>
      </DataContainer>
    </ShearCatalog>
  </Data>
</DpdTwoDMassLensMCCatalog>
"#
    )
}

/// Scratch work directory removed on drop
#[derive(Debug)]
pub struct Workdir {
    dir: TempDir,
}

impl Workdir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` at `relative`, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Work directory holding a catalog product and a parameter document
    pub fn with_inputs(product_name: &str, params_name: &str, params: &ParamsFixture) -> Self {
        let workdir = Self::new();
        workdir.write(product_name, &catalog_product_xml("LensMC_catalog.fits"));
        workdir.write(params_name, &params.to_xml());
        workdir
    }
}

impl Default for Workdir {
    fn default() -> Self {
        Self::new()
    }
}
