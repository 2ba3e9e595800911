//! Output descriptor
//!
//! The document published next to a produced convergence map. It carries a
//! provenance header and a payload pointing at the map file by name; the
//! map itself is never embedded.
//!
//! Assembly renders the whole document in memory before the output file is
//! opened, so a failed render leaves nothing on disk.

use crate::container::DataContainer;
use crate::error::ProductError;
use crate::header::{build_header, GenericHeader, HeaderGenerator, GENERIC_PRODUCT_TYPE};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Product type of the output descriptor
pub const CONVERGENCE_PATCH_PRODUCT_TYPE: &str = "DpdTwoDMassConvergencePatch";

/// Format tag of the result section
pub const CONVERGENCE_PATCH_FORMAT: &str = "le3.wl.2dmass.output.patchconvergence";

/// Format version of the result section
pub const CONVERGENCE_PATCH_FORMAT_VERSION: &str = "0.1";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Result section wrapping the artifact reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvergencePatchMap {
    #[serde(rename = "@format")]
    pub format: String,
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "DataContainer")]
    pub data_container: DataContainer,
}

impl ConvergencePatchMap {
    /// Result section for `container` with the current format tags
    pub fn new(data_container: DataContainer) -> Self {
        Self {
            format: CONVERGENCE_PATCH_FORMAT.to_string(),
            version: CONVERGENCE_PATCH_FORMAT_VERSION.to_string(),
            data_container,
        }
    }
}

/// Data payload of the descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvergencePatchData {
    #[serde(rename = "NResamples")]
    pub n_resamples: u32,
    #[serde(
        rename = "NoisyConvergence",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub noisy_convergence: Option<ConvergencePatchMap>,
}

/// Complete output descriptor document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "DpdTwoDMassConvergencePatch")]
pub struct OutputDescriptor {
    #[serde(rename = "Header")]
    pub header: GenericHeader,
    #[serde(rename = "Data")]
    pub data: ConvergencePatchData,
}

impl OutputDescriptor {
    /// File name of the referenced map, if a result section is present
    #[must_use]
    pub fn artifact_file_name(&self) -> Option<&str> {
        self.data
            .noisy_convergence
            .as_ref()
            .map(|section| section.data_container.file_name.as_str())
    }

    /// Render as document text: declaration plus indented body
    ///
    /// # Errors
    /// Returns `ProductError::Serialization` if rendering fails.
    pub fn to_xml_string(&self) -> Result<String, ProductError> {
        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut body);
        serializer.indent(' ', 2);
        self.serialize(serializer)?;

        Ok(format!("{XML_DECLARATION}\n{body}\n"))
    }

    /// Write to `path`, creating or truncating the file
    ///
    /// # Errors
    /// - `ProductError::Serialization` if rendering fails (nothing is written)
    /// - `ProductError::OutputWrite` if the file cannot be created or written
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), ProductError> {
        let path = path.as_ref();
        let text = self.to_xml_string()?;

        let mut file =
            std::fs::File::create(path).map_err(|e| ProductError::output_write(path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| ProductError::output_write(path, e))?;
        Ok(())
    }

    /// Parse descriptor text
    ///
    /// # Errors
    /// Returns `ProductError::Malformed` if the text is not a descriptor.
    pub fn parse(content: &str) -> Result<Self, ProductError> {
        quick_xml::de::from_str(content)
            .map_err(|e| ProductError::malformed("<inline descriptor>", e))
    }

    /// Read a descriptor back from disk
    ///
    /// # Errors
    /// - `ProductError::Io` if the file cannot be read
    /// - `ProductError::Malformed` if it is not a descriptor
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, ProductError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ProductError::io_error(path, e))?;
        quick_xml::de::from_str(&content)
            .map_err(|e| ProductError::malformed(path.display().to_string(), e))
    }
}

/// Builds and writes output descriptors
#[derive(Debug, Clone)]
pub struct DescriptorAssembler {
    header: HeaderGenerator,
}

impl DescriptorAssembler {
    /// Assembler stamping convergence-patch headers
    #[must_use]
    pub fn new() -> Self {
        let mut header = build_header(GENERIC_PRODUCT_TYPE);
        header.change_product_type(CONVERGENCE_PATCH_PRODUCT_TYPE);
        Self { header }
    }

    /// Use a custom header generator
    #[inline]
    #[must_use]
    pub fn with_header(mut self, header: HeaderGenerator) -> Self {
        self.header = header;
        self
    }

    /// Header generator in use
    #[inline]
    #[must_use]
    pub fn header(&self) -> &HeaderGenerator {
        &self.header
    }

    /// Build the descriptor for `artifact_path` with a freshly stamped header
    ///
    /// # Errors
    /// Returns `ProductError::InvalidArtifactPath` if the path has no file name.
    pub fn build(&self, artifact_path: impl AsRef<Path>) -> Result<OutputDescriptor, ProductError> {
        self.build_with_header(artifact_path, self.header.generate())
    }

    /// Build the descriptor for `artifact_path` around a given header
    ///
    /// # Errors
    /// Returns `ProductError::InvalidArtifactPath` if the path has no file name.
    pub fn build_with_header(
        &self,
        artifact_path: impl AsRef<Path>,
        header: GenericHeader,
    ) -> Result<OutputDescriptor, ProductError> {
        let artifact_path = artifact_path.as_ref();
        let file_name = artifact_path
            .file_name()
            .ok_or_else(|| ProductError::InvalidArtifactPath(artifact_path.to_path_buf()))?
            .to_string_lossy()
            .into_owned();
        tracing::debug!("Artifact reference {}", file_name);

        let container = DataContainer::proposed(file_name);
        let data = ConvergencePatchData {
            n_resamples: 0,
            noisy_convergence: Some(ConvergencePatchMap::new(container)),
        };

        Ok(OutputDescriptor { header, data })
    }

    /// Build the descriptor for `artifact_path` and write it to `output_path`
    ///
    /// # Errors
    /// - `ProductError::InvalidArtifactPath` if the artifact has no file name
    /// - `ProductError::OutputWrite` if the output cannot be written
    pub fn assemble(
        &self,
        output_path: impl AsRef<Path>,
        artifact_path: impl AsRef<Path>,
    ) -> Result<OutputDescriptor, ProductError> {
        let output_path = output_path.as_ref();
        let descriptor = self.build(artifact_path)?;

        tracing::info!("Writing output descriptor {}", output_path.display());
        descriptor.write_file(output_path).map_err(|e| {
            tracing::error!("Failed to write output descriptor: {}", e);
            e
        })?;

        Ok(descriptor)
    }
}

impl Default for DescriptorAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Write the output descriptor for `artifact_path` to `output_path`
///
/// # Errors
/// See [`DescriptorAssembler::assemble`].
pub fn assemble(
    output_path: impl AsRef<Path>,
    artifact_path: impl AsRef<Path>,
) -> Result<(), ProductError> {
    DescriptorAssembler::new()
        .assemble(output_path, artifact_path)
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::FileStatus;

    #[test]
    fn directory_stripped_from_artifact() {
        let descriptor = DescriptorAssembler::new()
            .build("/tmp/out/ShearMap.fits")
            .unwrap();

        assert_eq!(descriptor.artifact_file_name(), Some("ShearMap.fits"));
        assert_eq!(descriptor.header.product_type, CONVERGENCE_PATCH_PRODUCT_TYPE);
        assert_eq!(descriptor.data.n_resamples, 0);
    }

    #[test]
    fn result_section_tags() {
        let descriptor = DescriptorAssembler::new().build("map.fits").unwrap();
        let section = descriptor.data.noisy_convergence.unwrap();

        assert_eq!(section.format, "le3.wl.2dmass.output.patchconvergence");
        assert_eq!(section.version, "0.1");
        assert_eq!(section.data_container.file_status, FileStatus::Proposed);
    }

    #[test]
    fn artifact_without_file_name_rejected() {
        let err = DescriptorAssembler::new().build("/").unwrap_err();
        assert!(matches!(err, ProductError::InvalidArtifactPath(_)));
    }

    #[test]
    fn rendered_text_shape() {
        let text = DescriptorAssembler::new()
            .build("out/ShearMap.fits")
            .unwrap()
            .to_xml_string()
            .unwrap();

        assert!(text.starts_with(XML_DECLARATION));
        assert!(text.contains("<DpdTwoDMassConvergencePatch>"));
        assert!(text.contains("<NResamples>0</NResamples>"));
        assert!(text.contains(r#"<DataContainer filestatus="PROPOSED">"#));
        assert!(text.contains("<FileName>ShearMap.fits</FileName>"));
    }

    #[test]
    fn descriptor_without_result_section_parses() {
        let mut descriptor = DescriptorAssembler::new().build("a.fits").unwrap();
        descriptor.data.noisy_convergence = None;

        let text = descriptor.to_xml_string().unwrap();

        assert!(!text.contains("NoisyConvergence"));
        assert_eq!(OutputDescriptor::parse(&text).unwrap(), descriptor);
    }
}
