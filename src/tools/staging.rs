use std::fs::File;
use std::io::{self, ErrorKind};
use std::path::Path;

use log::{debug, warn};
use tempfile::NamedTempFile;

use crate::error::{Result, SqueezeError};

/// Run `work` against a temporary file next to `output` and move it into place only if
/// `work` succeeded. On failure the temporary file is removed and `output` is left
/// untouched. Without `force`, an existing `output` is an error.
pub fn staged<T>(
    output: &Path,
    force: bool,
    work: impl FnOnce(&mut File) -> Result<T>,
) -> Result<T> {
    let name = output.display().to_string();
    if !force && output.exists() {
        warn!("Output file {} already exists, use --force to overwrite.", name);
        return Err(SqueezeError::output(
            name,
            io::Error::new(ErrorKind::AlreadyExists, "file already exists"),
        ));
    }

    let dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| SqueezeError::output(&*name, e))?;
    debug!("Staging output in {}.", tmp.path().display());

    let value = work(tmp.as_file_mut())?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| SqueezeError::output(&*name, e))?;

    let persisted = if force {
        tmp.persist(output)
    } else {
        tmp.persist_noclobber(output)
    };
    persisted.map_err(|e| SqueezeError::output(name, e.error))?;
    Ok(value)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn output_appears_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");
        let n = staged(&target, false, |f| {
            f.write_all(b"abc").unwrap();
            Ok(3)
        })
        .unwrap();
        assert_eq!(n, 3);
        assert_eq!(std::fs::read(&target).unwrap(), b"abc");
    }

    #[test]
    fn output_untouched_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");
        std::fs::write(&target, b"old").unwrap();
        let result: Result<()> = staged(&target, true, |f| {
            f.write_all(b"new but broken").unwrap();
            Err(SqueezeError::AllocationFailure { entries: 0 })
        });
        assert!(result.is_err());
        assert_eq!(std::fs::read(&target).unwrap(), b"old");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");
        std::fs::write(&target, b"old").unwrap();
        let result = staged(&target, false, |_| Ok(()));
        assert!(matches!(
            result,
            Err(SqueezeError::OutputUnavailable { .. })
        ));
        let result = staged(&target, true, |f| {
            f.write_all(b"new").unwrap();
            Ok(())
        });
        assert!(result.is_ok());
        assert_eq!(std::fs::read(&target).unwrap(), b"new");
    }
}
