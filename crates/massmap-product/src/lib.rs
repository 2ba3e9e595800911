//! Mass-map product documents
//!
//! Reads the run's input catalog product and assembles the output
//! descriptor published alongside a convergence map.
//!
//! # Example
//!
//! ```rust,ignore
//! use massmap_product::DescriptorAssembler;
//!
//! DescriptorAssembler::new().assemble("workdir/out.xml", "workdir/data/ShearMap.fits")?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod catalog;
pub mod container;
pub mod descriptor;
pub mod error;
pub mod header;

pub use catalog::CatalogProduct;
pub use container::{DataContainer, FileStatus};
pub use descriptor::{
    assemble, ConvergencePatchData, ConvergencePatchMap, DescriptorAssembler, OutputDescriptor,
    CONVERGENCE_PATCH_PRODUCT_TYPE,
};
pub use error::{ProductError, ProductResult};
pub use header::{build_header, GenericHeader, HeaderGenerator, HeaderTag};
