//! External map maker
//!
//! The convergence map itself is computed by a separate executable started
//! through the environment launcher. [`MapMaker`] is the seam between the
//! pipeline and that process; [`ProcessMapMaker`] is the real one.

use crate::config::RunConfig;
use crate::error::MapMakerError;
use std::path::Path;
use std::process::Command;

/// Fully resolved map maker command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapMakerInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl MapMakerInvocation {
    /// Command line for `config`, consuming `catalog` (a name in the data directory)
    pub fn new(config: &RunConfig, catalog: &Path) -> Self {
        let map_maker = &config.map_maker;
        let args = vec![
            map_maker.project.clone(),
            map_maker.version.clone(),
            map_maker.executable.clone(),
            format!("--workdir={}", config.workdir.display()),
            format!("--paramFile={}", config.parameter_file.display()),
            format!(
                "--input_ShearCatalog={}",
                config.catalog_argument(catalog).display()
            ),
            format!("--outShearMap={}", map_maker.output_map.display()),
        ];

        Self {
            program: map_maker.launcher.clone(),
            args,
        }
    }

    /// Command line as a single string, for logs and errors
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs the map maker to completion
pub trait MapMaker {
    /// Run `invocation`; success only if the map maker reported success
    ///
    /// # Errors
    /// - `MapMakerError::ToolSpawn` if the process could not be started
    /// - `MapMakerError::ToolFailed` if it exited unsuccessfully
    fn run(&self, invocation: &MapMakerInvocation) -> Result<(), MapMakerError>;
}

impl<T: MapMaker + ?Sized> MapMaker for &T {
    fn run(&self, invocation: &MapMakerInvocation) -> Result<(), MapMakerError> {
        (**self).run(invocation)
    }
}

/// Map maker run as a child process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessMapMaker;

impl ProcessMapMaker {
    pub fn new() -> Self {
        Self
    }
}

impl MapMaker for ProcessMapMaker {
    fn run(&self, invocation: &MapMakerInvocation) -> Result<(), MapMakerError> {
        let command_line = invocation.command_line();
        tracing::info!("Running {}", command_line);

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .output()
            .map_err(|e| MapMakerError::ToolSpawn {
                program: invocation.program.clone(),
                source: e,
            })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            tracing::debug!("{}", line);
        }

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::error!("Map maker exited with {}: {}", output.status, stderr.trim());
            Err(MapMakerError::ToolFailed {
                command: command_line,
                code: output.status.code(),
                stderr,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapMakerConfig;

    #[test]
    fn invocation_arguments() {
        let config = RunConfig::new("/work").with_parameter_file("params.xml");
        let invocation = MapMakerInvocation::new(&config, Path::new("cat.fits"));

        assert_eq!(
            invocation.command_line(),
            "E-Run LE3_2D_MASS_WL_KS 2.4.0 LE3_2D_MASS_WL_CartesianMapMaker \
             --workdir=/work --paramFile=params.xml \
             --input_ShearCatalog=data/cat.fits --outShearMap=DevWS_ShearMap.fits"
        );
    }

    #[test]
    fn missing_launcher_is_spawn_error() {
        let config = RunConfig::new("/work").with_map_maker(
            MapMakerConfig::default().with_launcher("massmap-no-such-launcher"),
        );
        let invocation = MapMakerInvocation::new(&config, Path::new("cat.fits"));

        let err = ProcessMapMaker::new().run(&invocation).unwrap_err();
        assert!(matches!(err, MapMakerError::ToolSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_failure() {
        let invocation = MapMakerInvocation {
            program: "false".to_string(),
            args: Vec::new(),
        };

        let err = ProcessMapMaker::new().run(&invocation).unwrap_err();
        assert!(matches!(err, MapMakerError::ToolFailed { code: Some(1), .. }));
    }
}
