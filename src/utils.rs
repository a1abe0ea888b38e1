use std::path::Path;
use which::which;

use crate::error::Error;

pub fn ensure_in_path(command: &str) -> Result<(), Error> {
    which(command)
        .map(|_| ())
        .map_err(|_| Error::setup(format!("'{}' not found in PATH", command)))
}

pub fn ensure_directory(dir: &Path) -> Result<(), Error> {
    if !dir.is_dir() {
        return Err(Error::setup(format!(
            "'{}' does not exist or is not a directory",
            dir.display()
        )));
    }
    Ok(())
}
