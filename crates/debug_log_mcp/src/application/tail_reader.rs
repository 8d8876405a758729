use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::config::DEFAULT_CHUNK_SIZE;
use crate::errors::LogFileResult;
use crate::models::responses::TailResult;
use crate::utils::fs::{Access, open_error, read_error, require_regular_file};

/// Reads the last lines of a file by scanning backwards in fixed-size chunks
///
/// Only the chunks needed to cover the requested lines are read, so the cost
/// depends on the size of the tail rather than the size of the file. Each call
/// opens and closes the file on its own and takes no lock; a writer appending
/// during the scan may be observed mid-write.
#[derive(Debug, Clone, Copy)]
pub struct TailReader {
    chunk_size: u64,
}

impl TailReader {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1) as u64,
        }
    }

    /// Return the last `max_lines` lines of `path` and its size in bytes
    pub fn tail(&self, path: &Path, max_lines: usize) -> LogFileResult<TailResult> {
        require_regular_file(path, Access::Read)?;
        let mut file = File::open(path).map_err(|e| open_error(path, e, Access::Read))?;

        let file_size = file
            .seek(SeekFrom::End(0))
            .map_err(|e| read_error(path, e))?;
        if file_size == 0 || max_lines == 0 {
            return Ok(TailResult::empty(file_size));
        }

        let mut chunks: Vec<Vec<u8>> = Vec::new();
        let mut position = file_size;
        let mut newlines = 0usize;
        let mut trailing_newline = false;

        // The newline ending the file terminates the last line without separating it from another
        while position > 0 && newlines - usize::from(trailing_newline) < max_lines {
            let read_size = self.chunk_size.min(position);
            position -= read_size;

            file.seek(SeekFrom::Start(position))
                .map_err(|e| read_error(path, e))?;
            let mut chunk = Vec::with_capacity(read_size as usize);
            // A short read means the file shrank under us; keep whatever is there
            (&mut file)
                .take(read_size)
                .read_to_end(&mut chunk)
                .map_err(|e| read_error(path, e))?;

            if chunks.is_empty() {
                trailing_newline = chunk.last() == Some(&b'\n');
            }
            newlines += count_newlines(&chunk);
            chunks.push(chunk);
        }

        let mut bytes = Vec::with_capacity(chunks.iter().map(Vec::len).sum());
        for chunk in chunks.iter().rev() {
            bytes.extend_from_slice(chunk);
        }

        let kept = last_lines(&bytes, max_lines);
        let lines_returned = count_lines(kept);

        tracing::debug!(
            path = %path.display(),
            file_size,
            chunks_read = chunks.len(),
            lines_returned,
            "Read debug log tail"
        );

        Ok(TailResult {
            content: String::from_utf8_lossy(kept).into_owned(),
            file_size_bytes: file_size,
            lines_returned,
        })
    }
}

impl Default for TailReader {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

/// Suffix of `bytes` holding at most `max_lines` lines, trailing newline included
fn last_lines(bytes: &[u8], max_lines: usize) -> &[u8] {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let mut seen = 0;
    for (i, &b) in body.iter().enumerate().rev() {
        if b == b'\n' {
            seen += 1;
            if seen == max_lines {
                return &bytes[i + 1..];
            }
        }
    }
    bytes
}

/// Newline count, plus one for an unterminated final line
fn count_lines(content: &[u8]) -> usize {
    if content.is_empty() {
        return 0;
    }
    count_newlines(content) + usize::from(!content.ends_with(b"\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    use crate::errors::LogFileError;

    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(content)
            .expect("Failed to write test content");
        temp_file
    }

    fn php_log(entries: usize) -> String {
        (0..entries)
            .map(|i| format!("[14-Oct-2026 09:{:02}:00 UTC] PHP Notice: entry {}\n", i % 60, i))
            .collect()
    }

    /// Last `n` lines computed from a full in-memory read
    fn reference_tail(content: &str, n: usize) -> String {
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        lines[lines.len().saturating_sub(n)..].concat()
    }

    #[test]
    fn test_returns_last_lines_with_trailing_newline() {
        let file = create_test_file(b"a\nb\nc\n");
        let result = TailReader::default().tail(file.path(), 2).unwrap();

        assert_eq!(result.content, "b\nc\n");
        assert_eq!(result.lines_returned, 2);
        assert_eq!(result.file_size_bytes, 6);
    }

    #[test]
    fn test_unterminated_last_line_counts() {
        let file = create_test_file(b"a\nb\nc");
        let result = TailReader::default().tail(file.path(), 10).unwrap();

        assert_eq!(result.content, "a\nb\nc");
        assert_eq!(result.lines_returned, 3);
    }

    #[test]
    fn test_unterminated_file_is_trimmed_to_limit() {
        let file = create_test_file(b"a\nb\nc");
        let result = TailReader::default().tail(file.path(), 2).unwrap();

        assert_eq!(result.content, "b\nc");
        assert_eq!(result.lines_returned, 2);
    }

    #[test]
    fn test_empty_file() {
        let file = create_test_file(b"");
        let result = TailReader::default().tail(file.path(), 100).unwrap();

        assert_eq!(result, TailResult::empty(0));
    }

    #[test]
    fn test_whole_file_when_fewer_lines_than_requested() {
        let content = php_log(40);
        let file = create_test_file(content.as_bytes());
        let result = TailReader::new(64).tail(file.path(), 1000).unwrap();

        assert_eq!(result.content, content);
        assert_eq!(result.lines_returned, 40);
        assert_eq!(result.file_size_bytes, content.len() as u64);
    }

    #[test]
    fn test_matches_full_read_across_chunk_sizes() {
        let content = php_log(300);
        let file = create_test_file(content.as_bytes());

        for chunk_size in [1, 7, 50, 4096, 1 << 20] {
            let reader = TailReader::new(chunk_size);
            for max_lines in [1, 2, 99, 100, 299, 300, 301] {
                let result = reader.tail(file.path(), max_lines).unwrap();
                assert_eq!(
                    result.content,
                    reference_tail(&content, max_lines),
                    "chunk_size={chunk_size} max_lines={max_lines}"
                );
                assert_eq!(result.lines_returned, max_lines.min(300));
            }
        }
    }

    #[test]
    fn test_line_longer_than_chunk() {
        let mut content = "short\n".to_string();
        content.push_str(&"x".repeat(10_000));
        content.push('\n');
        let file = create_test_file(content.as_bytes());

        let result = TailReader::default().tail(file.path(), 1).unwrap();
        assert_eq!(result.content.len(), 10_001);
        assert_eq!(result.lines_returned, 1);
    }

    #[test]
    fn test_multibyte_character_split_across_chunks() {
        let content = "première ligne\nérreur grave ✓\n";
        let file = create_test_file(content.as_bytes());

        let result = TailReader::new(3).tail(file.path(), 1).unwrap();
        assert_eq!(result.content, "érreur grave ✓\n");
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let file = create_test_file(php_log(500).as_bytes());
        let reader = TailReader::new(512);

        let first = reader.tail(file.path(), 100).unwrap();
        let second = reader.tail(file.path(), 100).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_lines_reports_size_only() {
        let file = create_test_file(b"a\nb\n");
        let result = TailReader::default().tail(file.path(), 0).unwrap();

        assert_eq!(result, TailResult::empty(4));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = TailReader::default().tail(&dir.path().join("debug.log"), 10);

        assert!(matches!(result, Err(LogFileError::NotFound { .. })));
    }

    #[test]
    fn test_only_newlines() {
        let file = create_test_file(b"\n\n\n");
        let result = TailReader::new(1).tail(file.path(), 2).unwrap();

        assert_eq!(result.content, "\n\n");
        assert_eq!(result.lines_returned, 2);
    }
}
