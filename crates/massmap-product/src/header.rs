//! Provenance header
//!
//! Every product document carries a header identifying the product type,
//! the producing software and when the product was made. A
//! [`HeaderGenerator`] holds the fixed tag values for one run and stamps a
//! fresh identifier and creation date each time [`HeaderGenerator::generate`]
//! is called.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Product type a generator starts out with
pub const GENERIC_PRODUCT_TYPE: &str = "DevWSProduct";

/// Processing centre tag
pub const PROD_SDC: &str = "SDC-FR";

/// Producing software tag
pub const SOFTWARE_NAME: &str = "2D-MASS-WL";

/// Curator tag
pub const CURATOR: &str = "LOCAL";

/// Version of the product data model the documents follow
pub const DATA_MODEL_VERSION: &str = "8.0.5";

/// Release stamped into `SoftwareRelease`
pub const SOFTWARE_RELEASE: &str = env!("CARGO_PKG_VERSION");

/// Header block of a product document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericHeader {
    #[serde(rename = "ProductId")]
    pub product_id: String,
    #[serde(rename = "ProductType")]
    pub product_type: String,
    #[serde(rename = "SoftwareName")]
    pub software_name: String,
    #[serde(rename = "SoftwareRelease")]
    pub software_release: String,
    #[serde(rename = "ProdSDC")]
    pub prod_sdc: String,
    #[serde(rename = "DataModelVersion")]
    pub data_model_version: String,
    #[serde(rename = "Curator")]
    pub curator: String,
    #[serde(rename = "CreationDate")]
    pub creation_date: String,
}

/// Header tags a generator lets callers override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTag {
    ProdSdc,
    SoftwareName,
    SoftwareRelease,
    DataModelVersion,
    Curator,
}

/// Produces headers for one product type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderGenerator {
    product_type: String,
    software_name: String,
    software_release: String,
    prod_sdc: String,
    data_model_version: String,
    curator: String,
}

impl HeaderGenerator {
    /// Create generator for `product_type` with the pipeline's fixed tags
    pub fn new(product_type: impl Into<String>) -> Self {
        Self {
            product_type: product_type.into(),
            software_name: SOFTWARE_NAME.to_string(),
            software_release: SOFTWARE_RELEASE.to_string(),
            prod_sdc: PROD_SDC.to_string(),
            data_model_version: DATA_MODEL_VERSION.to_string(),
            curator: CURATOR.to_string(),
        }
    }

    /// Current product type
    #[inline]
    #[must_use]
    pub fn product_type(&self) -> &str {
        &self.product_type
    }

    /// Replace the product type stamped into generated headers
    pub fn change_product_type(&mut self, product_type: impl Into<String>) {
        self.product_type = product_type.into();
    }

    /// Builder form of [`HeaderGenerator::change_product_type`]
    #[inline]
    #[must_use]
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.change_product_type(product_type);
        self
    }

    /// Override one tag value
    pub fn set_tag_value(&mut self, tag: HeaderTag, value: impl Into<String>) {
        let value = value.into();
        match tag {
            HeaderTag::ProdSdc => self.prod_sdc = value,
            HeaderTag::SoftwareName => self.software_name = value,
            HeaderTag::SoftwareRelease => self.software_release = value,
            HeaderTag::DataModelVersion => self.data_model_version = value,
            HeaderTag::Curator => self.curator = value,
        }
    }

    /// Builder form of [`HeaderGenerator::set_tag_value`]
    #[inline]
    #[must_use]
    pub fn with_tag_value(mut self, tag: HeaderTag, value: impl Into<String>) -> Self {
        self.set_tag_value(tag, value);
        self
    }

    /// Generate a header with a fresh product id and the current time
    #[must_use]
    pub fn generate(&self) -> GenericHeader {
        self.generate_with(uuid::Uuid::new_v4().to_string(), Utc::now())
    }

    /// Generate a header with a caller-supplied id and creation date
    #[must_use]
    pub fn generate_with(
        &self,
        product_id: impl Into<String>,
        creation_date: DateTime<Utc>,
    ) -> GenericHeader {
        GenericHeader {
            product_id: product_id.into(),
            product_type: self.product_type.clone(),
            software_name: self.software_name.clone(),
            software_release: self.software_release.clone(),
            prod_sdc: self.prod_sdc.clone(),
            data_model_version: self.data_model_version.clone(),
            curator: self.curator.clone(),
            creation_date: creation_date.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

impl Default for HeaderGenerator {
    fn default() -> Self {
        build_header(GENERIC_PRODUCT_TYPE)
    }
}

/// Header generator for `product_type` carrying the pipeline's fixed tags
pub fn build_header(product_type: impl Into<String>) -> HeaderGenerator {
    HeaderGenerator::new(product_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_tags_applied() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let header = build_header(GENERIC_PRODUCT_TYPE).generate_with("id-1", date);

        assert_eq!(header.product_type, "DevWSProduct");
        assert_eq!(header.prod_sdc, "SDC-FR");
        assert_eq!(header.software_name, "2D-MASS-WL");
        assert_eq!(header.curator, "LOCAL");
        assert_eq!(header.creation_date, "2024-03-01T12:30:00Z");
    }

    #[test]
    fn change_product_type_applies_to_later_headers() {
        let mut generator = HeaderGenerator::default();
        generator.change_product_type("DpdTwoDMassConvergencePatch");

        assert_eq!(generator.generate().product_type, "DpdTwoDMassConvergencePatch");
    }

    #[test]
    fn generated_ids_differ() {
        let generator = HeaderGenerator::default();
        assert_ne!(generator.generate().product_id, generator.generate().product_id);
    }

    #[test]
    fn tag_override() {
        let header = HeaderGenerator::default()
            .with_tag_value(HeaderTag::Curator, "SDC-IT")
            .generate();
        assert_eq!(header.curator, "SDC-IT");
    }
}
