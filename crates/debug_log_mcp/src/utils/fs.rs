use std::fs::{self, Metadata};
use std::io::{self, ErrorKind};
use std::path::Path;

use crate::errors::{LogFileError, LogFileResult};

/// Access mode an operation needs, used to classify permission failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Resolve metadata for `path`, requiring it to be an existing regular file
pub fn require_regular_file(path: &Path, access: Access) -> LogFileResult<Metadata> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(metadata),
        Ok(_) => Err(LogFileError::NotAFile {
            path: path.display().to_string(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(LogFileError::NotFound {
            path: path.display().to_string(),
        }),
        Err(e) => Err(open_error(path, e, access)),
    }
}

/// Classify a failed `open` call
///
/// Permission problems map to the access-specific variant; anything else,
/// including the file vanishing after the existence check, is `OpenFailed`.
pub fn open_error(path: &Path, error: io::Error, access: Access) -> LogFileError {
    let path = path.display().to_string();
    match (error.kind(), access) {
        (ErrorKind::PermissionDenied, Access::Read) => LogFileError::NotReadable { path },
        (ErrorKind::PermissionDenied, Access::Write) => LogFileError::NotWritable { path },
        _ => LogFileError::OpenFailed {
            path,
            source: error,
        },
    }
}

pub fn read_error(path: &Path, error: io::Error) -> LogFileError {
    LogFileError::ReadFailed {
        path: path.display().to_string(),
        source: error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let result = require_regular_file(&dir.path().join("debug.log"), Access::Read);
        assert!(matches!(result, Err(LogFileError::NotFound { .. })));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let result = require_regular_file(dir.path(), Access::Read);
        assert!(matches!(result, Err(LogFileError::NotAFile { .. })));
    }

    #[test]
    fn test_regular_file_passes() {
        let file = NamedTempFile::new().unwrap();
        assert!(require_regular_file(file.path(), Access::Write).is_ok());
    }

    #[test]
    fn test_permission_denied_classification() {
        let denied = || io::Error::from(ErrorKind::PermissionDenied);
        let path = Path::new("/srv/debug.log");

        assert!(matches!(
            open_error(path, denied(), Access::Read),
            LogFileError::NotReadable { .. }
        ));
        assert!(matches!(
            open_error(path, denied(), Access::Write),
            LogFileError::NotWritable { .. }
        ));
        assert!(matches!(
            open_error(path, io::Error::from(ErrorKind::NotFound), Access::Read),
            LogFileError::OpenFailed { .. }
        ));
    }
}
