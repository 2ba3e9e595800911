//! Run configuration
//!
//! Every file a run touches is named relative to the work directory. The
//! resolvers here join them so the rest of the pipeline only sees full
//! paths.

use std::path::{Path, PathBuf};

/// Default launcher used to run the map maker
pub const DEFAULT_LAUNCHER: &str = "E-Run";
/// Default project providing the map maker
pub const DEFAULT_PROJECT: &str = "LE3_2D_MASS_WL_KS";
/// Default project version
pub const DEFAULT_PROJECT_VERSION: &str = "2.4.0";
/// Default map maker executable
pub const DEFAULT_EXECUTABLE: &str = "LE3_2D_MASS_WL_CartesianMapMaker";
/// Default name of the produced shear map
pub const DEFAULT_OUTPUT_MAP: &str = "DevWS_ShearMap.fits";
/// Data directory under the work directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// How the external map maker is launched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapMakerConfig {
    pub launcher: String,
    pub project: String,
    pub version: String,
    pub executable: String,
    /// Map file name, relative to the work directory
    pub output_map: PathBuf,
    /// Data directory, relative to the work directory
    pub data_dir: PathBuf,
}

impl Default for MapMakerConfig {
    fn default() -> Self {
        Self {
            launcher: DEFAULT_LAUNCHER.to_string(),
            project: DEFAULT_PROJECT.to_string(),
            version: DEFAULT_PROJECT_VERSION.to_string(),
            executable: DEFAULT_EXECUTABLE.to_string(),
            output_map: PathBuf::from(DEFAULT_OUTPUT_MAP),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl MapMakerConfig {
    #[inline]
    #[must_use]
    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = launcher.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>, version: impl Into<String>) -> Self {
        self.project = project.into();
        self.version = version.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_output_map(mut self, output_map: impl Into<PathBuf>) -> Self {
        self.output_map = output_map.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

/// Configuration of one run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunConfig {
    pub workdir: PathBuf,
    /// Input catalog product, relative to the work directory
    pub input_product: PathBuf,
    /// Parameter document, relative to the work directory
    pub parameter_file: PathBuf,
    /// Output descriptor, relative to the work directory
    pub output_descriptor: PathBuf,
    pub map_maker: MapMakerConfig,
}

impl RunConfig {
    /// Create config rooted at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_input_product(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_product = path.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_parameter_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.parameter_file = path.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_output_descriptor(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_descriptor = path.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_map_maker(mut self, map_maker: MapMakerConfig) -> Self {
        self.map_maker = map_maker;
        self
    }

    /// Full path of the input catalog product
    #[must_use]
    pub fn input_product_path(&self) -> PathBuf {
        self.workdir.join(&self.input_product)
    }

    /// Full path of the parameter document
    #[must_use]
    pub fn parameter_path(&self) -> PathBuf {
        self.workdir.join(&self.parameter_file)
    }

    /// Full path of the output descriptor
    #[must_use]
    pub fn output_descriptor_path(&self) -> PathBuf {
        self.workdir.join(&self.output_descriptor)
    }

    /// Full path of the data directory
    #[must_use]
    pub fn data_dir_path(&self) -> PathBuf {
        self.workdir.join(&self.map_maker.data_dir)
    }

    /// Catalog path as handed to the map maker: relative to the work directory
    #[must_use]
    pub fn catalog_argument(&self, catalog: &Path) -> PathBuf {
        self.map_maker.data_dir.join(catalog)
    }

    /// Full path of the produced map
    #[must_use]
    pub fn output_map_path(&self) -> PathBuf {
        self.workdir.join(&self.map_maker.output_map)
    }
}
