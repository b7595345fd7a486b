// Submission files on disk
//
// Files are written next to their final name and renamed into place, so a
// reader never sees a half-written log under the real name.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::OutputError;

/// `{CALL}_{CONTEST-ID}.{ext}` with '/' in the call replaced by '-'
pub fn file_name(call: &str, contest_id: &str, extension: &str) -> String {
    let call = call.trim().to_uppercase().replace('/', "-");
    format!("{}_{}.{}", call, contest_id, extension)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `bytes` to `dir/name`, creating `dir` if needed
pub fn write_atomic(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir).map_err(io_error(dir))?;
    let path = dir.join(name);
    let temp = dir.join(format!(".{}.{}.tmp", name, uuid::Uuid::new_v4().simple()));

    let written = fs::File::create(&temp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .map_err(io_error(&temp));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }

    if let Err(source) = fs::rename(&temp, &path) {
        let _ = fs::remove_file(&temp);
        return Err(OutputError::Io { path, source });
    }
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("contestlog_output_{}", uuid::Uuid::new_v4().simple()))
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("k6gte", "CQ-WW-CW", "log"), "K6GTE_CQ-WW-CW.log");
        assert_eq!(file_name("VE3/W1AW", "WAG", "adi"), "VE3-W1AW_WAG.adi");
    }

    #[test]
    fn test_write_and_replace() {
        let dir = scratch_dir();
        let path = write_atomic(&dir, "K6GTE_CWT.log", b"first").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"first");
        write_atomic(&dir, "K6GTE_CWT.log", b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        let leftovers = fs::read_dir(&dir).unwrap().count();
        assert_eq!(leftovers, 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unwritable_target_reports_path() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        // A directory already sits where the file should go
        fs::create_dir_all(dir.join("K6GTE_CWT.log")).unwrap();
        let err = write_atomic(&dir, "K6GTE_CWT.log", b"data").unwrap_err();
        let OutputError::Io { path, .. } = err;
        assert_eq!(path, dir.join("K6GTE_CWT.log"));
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }
}
