//! Helpers shared by the commands that load a descriptor.

use std::path::{Path, PathBuf};

use wasmroll_config::{BuildDescriptor, ConfigDiscovery, load_from, watch_flag_from_env};

use crate::cli::DescriptorArgs;
use crate::error::{CliError, Result, ResultExt};

/// A resolved descriptor plus the directory its entry paths are relative to.
pub(crate) struct Loaded {
    pub descriptor: BuildDescriptor,
    pub root: PathBuf,
    pub source: PathBuf,
}

pub(crate) fn get_cwd() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// `--watch` forces watch mode; otherwise ROLLUP_WATCH decides.
pub(crate) fn watch_flag(args: &DescriptorArgs) -> bool {
    args.watch || watch_flag_from_env()
}

/// Find, load and resolve the descriptor named by the arguments.
pub(crate) fn load_descriptor(args: &DescriptorArgs) -> Result<Loaded> {
    let cwd = match &args.cwd {
        Some(dir) => dir.clone(),
        None => get_cwd()?,
    };

    let source = match &args.config {
        Some(path) => {
            let path = resolve_path(path, &cwd);
            if !std::fs::metadata(&path).with_path(&path)?.is_file() {
                return Err(CliError::InvalidArgument(format!(
                    "{} is not a file",
                    path.display()
                )));
            }
            path
        }
        None => {
            let discovery = ConfigDiscovery::new(&cwd);
            discovery
                .find()
                .ok_or_else(|| wasmroll_config::ConfigError::NotFound(cwd.clone()))?
        }
    };

    let watch = watch_flag(args);
    tracing::debug!(source = %source.display(), watch, "loading descriptor");

    let descriptor = load_from(&source)?.resolve(watch)?;
    let root = source
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.clone());

    Ok(Loaded {
        descriptor,
        root,
        source,
    })
}

/// Resolve a possibly relative path against `cwd`.
pub(crate) fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
