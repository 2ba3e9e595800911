//! Run pipeline
//!
//! One run, in order:
//! 1. Check the input product exists, read the catalog it names
//! 2. Check the parameter document exists, parse it
//! 3. Run the map maker and require success
//! 4. Write the output descriptor pointing at the produced map
//!
//! Any failure aborts the run before the output descriptor is written.

use crate::config::RunConfig;
use crate::error::PipelineError;
use crate::map_maker::{MapMaker, MapMakerInvocation, ProcessMapMaker};
use massmap_params::{read_parameter_file, ParameterSet};
use massmap_product::{CatalogProduct, DescriptorAssembler, OutputDescriptor};
use std::path::PathBuf;

/// What a successful run read and produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub parameters: ParameterSet,
    /// Catalog file, relative to the data directory
    pub catalog: PathBuf,
    /// Map file the descriptor points at
    pub artifact: PathBuf,
    pub descriptor_path: PathBuf,
    pub descriptor: OutputDescriptor,
}

/// A configured run
#[derive(Debug)]
pub struct Pipeline<M = ProcessMapMaker> {
    config: RunConfig,
    map_maker: M,
    assembler: DescriptorAssembler,
}

impl Pipeline<ProcessMapMaker> {
    /// Pipeline launching the real map maker
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            map_maker: ProcessMapMaker::new(),
            assembler: DescriptorAssembler::new(),
        }
    }
}

impl<M: MapMaker> Pipeline<M> {
    /// Replace the map maker
    #[must_use]
    pub fn with_map_maker<N: MapMaker>(self, map_maker: N) -> Pipeline<N> {
        Pipeline {
            config: self.config,
            map_maker,
            assembler: self.assembler,
        }
    }

    /// Replace the descriptor assembler
    #[inline]
    #[must_use]
    pub fn with_assembler(mut self, assembler: DescriptorAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Execute the run
    ///
    /// # Errors
    /// - `PipelineError::MissingInputFile` if an input document is absent
    /// - `PipelineError::Product` / `PipelineError::Config` if an input is unreadable
    /// - `PipelineError::MapMaker` if the map maker fails
    /// - `PipelineError::Product` if the descriptor cannot be written
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let config = &self.config;

        let product_path = require_input(config.input_product_path())?;
        tracing::info!("Using file {} as input product", product_path.display());
        let product = CatalogProduct::read_file(&product_path)?;
        let catalog = product.catalog_file().to_path_buf();
        tracing::info!(
            "Using file {} as input catalog",
            config.data_dir_path().join(&catalog).display()
        );

        let parameter_path = require_input(config.parameter_path())?;
        tracing::info!("Using file {} as input parameters", parameter_path.display());
        let parameters = read_parameter_file(&parameter_path)?;

        let invocation = MapMakerInvocation::new(config, &catalog);
        self.map_maker.run(&invocation)?;

        let artifact = config.output_map_path();
        let descriptor_path = config.output_descriptor_path();
        let descriptor = self.assembler.assemble(&descriptor_path, &artifact)?;
        tracing::info!("Output descriptor created in {}", descriptor_path.display());

        Ok(RunSummary {
            parameters,
            catalog,
            artifact,
            descriptor_path,
            descriptor,
        })
    }
}

fn require_input(path: PathBuf) -> Result<PathBuf, PipelineError> {
    if path.is_file() {
        Ok(path)
    } else {
        tracing::error!("Input file {} not found", path.display());
        Err(PipelineError::missing_input(path))
    }
}
