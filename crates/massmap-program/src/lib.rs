//! Mass-map program
//!
//! Front end of the convergence-patch map maker. A run reads the input
//! catalog product and the parameter document from a work directory,
//! launches the external map maker, and publishes an output descriptor
//! pointing at the produced map.
//!
//! # Example
//!
//! ```rust,ignore
//! use massmap_program::{Pipeline, RunConfig};
//!
//! let config = RunConfig::new("/data/run1")
//!     .with_input_product("in.xml")
//!     .with_parameter_file("params.xml")
//!     .with_output_descriptor("out.xml");
//! let summary = Pipeline::new(config).run()?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod map_maker;
pub mod pipeline;

pub use config::{MapMakerConfig, RunConfig};
pub use error::{MapMakerError, PipelineError, PipelineResult};
pub use logging::{init_tracing, InitError};
pub use map_maker::{MapMaker, MapMakerInvocation, ProcessMapMaker};
pub use pipeline::{Pipeline, RunSummary};
