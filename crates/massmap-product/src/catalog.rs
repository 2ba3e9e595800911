//! Input catalog product
//!
//! The run's input product names the shear catalog the map maker consumes.
//! Only the catalog file name is required; the status flag is read when it
//! is one the data model knows, and the rest of the product is ignored.

use crate::container::FileStatus;
use crate::error::ProductError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename = "DpdTwoDMassLensMCCatalog")]
struct CatalogDocument {
    #[serde(rename = "Data")]
    data: CatalogData,
}

#[derive(Debug, Deserialize)]
struct CatalogData {
    #[serde(rename = "ShearCatalog")]
    shear_catalog: ShearCatalog,
}

#[derive(Debug, Deserialize)]
struct ShearCatalog {
    #[serde(rename = "DataContainer")]
    data_container: InputContainer,
}

#[derive(Debug, Deserialize)]
struct InputContainer {
    #[serde(rename = "@filestatus", default)]
    file_status: Option<String>,
    #[serde(rename = "FileName")]
    file_name: String,
}

/// Shear-catalog input product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
    catalog_file: PathBuf,
    file_status: Option<FileStatus>,
}

impl CatalogProduct {
    /// Parse product text
    ///
    /// # Errors
    /// Returns `ProductError::Malformed` if the catalog file name is missing.
    pub fn parse(content: &str) -> Result<Self, ProductError> {
        Self::parse_with_origin(content, "<inline product>")
    }

    /// Read the product from disk
    ///
    /// # Errors
    /// - `ProductError::Io` if the file cannot be read
    /// - `ProductError::Malformed` if the catalog file name is missing
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, ProductError> {
        let path = path.as_ref();
        tracing::info!("Reading input product {}", path.display());

        let content =
            std::fs::read_to_string(path).map_err(|e| ProductError::io_error(path, e))?;
        Self::parse_with_origin(&content, &path.display().to_string())
    }

    fn parse_with_origin(content: &str, origin: &str) -> Result<Self, ProductError> {
        let document: CatalogDocument = quick_xml::de::from_str(content)
            .map_err(|e| ProductError::malformed(origin, e))?;
        let container = document.data.shear_catalog.data_container;

        let file_status = match container.file_status.as_deref().map(str::parse::<FileStatus>) {
            Some(Ok(status)) => Some(status),
            Some(Err(e)) => {
                tracing::debug!("Ignoring catalog file status: {}", e);
                None
            }
            None => None,
        };

        tracing::info!("Shear catalog : {}", container.file_name);
        Ok(Self {
            catalog_file: PathBuf::from(container.file_name),
            file_status,
        })
    }

    /// Catalog file name, relative to the data directory
    #[inline]
    #[must_use]
    pub fn catalog_file(&self) -> &Path {
        &self.catalog_file
    }

    /// Status of the catalog file, when the product gives a known one
    #[inline]
    #[must_use]
    pub fn file_status(&self) -> Option<FileStatus> {
        self.file_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(container_open: &str) -> String {
        format!(
            "<DpdTwoDMassLensMCCatalog><Data><ShearCatalog>{container_open}\
             <FileName>cat.fits</FileName></DataContainer>\
             </ShearCatalog></Data></DpdTwoDMassLensMCCatalog>"
        )
    }

    #[test]
    fn missing_catalog_is_malformed() {
        let err = CatalogProduct::parse(
            "<DpdTwoDMassLensMCCatalog><Data></Data></DpdTwoDMassLensMCCatalog>",
        )
        .unwrap_err();
        assert!(matches!(err, ProductError::Malformed { .. }));
    }

    #[test]
    fn any_known_status_accepted() {
        for (raw, status) in [
            ("PROPOSED", FileStatus::Proposed),
            ("ARCHIVED", FileStatus::Archived),
            ("VALIDATED", FileStatus::Validated),
        ] {
            let product =
                CatalogProduct::parse(&product(&format!(r#"<DataContainer filestatus="{raw}">"#)))
                    .unwrap();
            assert_eq!(product.catalog_file(), Path::new("cat.fits"));
            assert_eq!(product.file_status(), Some(status));
        }
    }

    #[test]
    fn status_attribute_optional() {
        let product = CatalogProduct::parse(&product("<DataContainer>")).unwrap();

        assert_eq!(product.catalog_file(), Path::new("cat.fits"));
        assert_eq!(product.file_status(), None);
    }

    #[test]
    fn unknown_status_ignored() {
        let product =
            CatalogProduct::parse(&product(r#"<DataContainer filestatus="PENDING">"#)).unwrap();

        assert_eq!(product.catalog_file(), Path::new("cat.fits"));
        assert_eq!(product.file_status(), None);
    }
}
