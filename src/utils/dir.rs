use std::{env, io, path::PathBuf};

use anyhow::{Context, Result};

/// State files live next to the executable unless a directory is passed explicitly.
pub fn resolve_state_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match dir {
        Some(path) => path,
        None => {
            let exe = env::current_exe().context("Couldn't locate the running executable")?;
            exe.parent()
                .map(|v| v.to_path_buf())
                .context("Executable has no parent directory")?
        }
    };

    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(anyhow::Error::new(v).context(format!(
            "Couldn't create state directory {path:?}"
        ))),
    }
}
