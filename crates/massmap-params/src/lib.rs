//! Mass-map parameter ingestion
//!
//! Turns a convergence-patch parameter document into a validated,
//! immutable [`ParameterSet`].
//!
//! # Core Operations
//!
//! - **Parse**: document text or file → [`ParameterSet`] (complete or error)
//! - **Write**: [`ParameterSet`] → parameter document
//! - **Units**: arcminute/arcsecond conversions and integer switches
//!
//! # Example
//!
//! ```rust,ignore
//! use massmap_params::read_parameter_file;
//!
//! let params = read_parameter_file("workdir/params.xml")?;
//! println!("{} redshift bins, zMax = {}", params.redshift_bin_count(), params.z_max());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod parameters;
pub mod parser;
pub mod units;
mod writer;

pub use error::{ConfigError, ConfigResult};
pub use parameters::{defaults, MapCenter, ParameterSet, ParameterSetBuilder, PatchGeometry, RedshiftBin};
pub use parser::{parse_str, read_parameter_file, ParameterParser};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
