//! Reading series from files.

use std::fs;
use std::path::Path;
use std::thread;

use tracing::{info, warn};

use crate::comparison::SeriesPair;
use crate::error::{GofError, Result};
use crate::parse::{parse_sequence_with_stats, ParsedSequence};

/// Reads `path` as text and parses one value per line.
///
/// Invalid UTF-8 sequences are replaced rather than rejected, so a header
/// in another encoding only costs that line.
///
/// # Errors
/// [`GofError::Io`] if the file cannot be read.
pub fn load_sequence(path: &Path) -> Result<Vec<f64>> {
    let bytes = fs::read(path).map_err(|source| GofError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let ParsedSequence { values, skipped } = parse_sequence_with_stats(&text);
    info!(path = %path.display(), values = values.len(), "loaded series");
    if skipped > 0 {
        warn!(path = %path.display(), skipped, "ignored lines without a numeric value");
    }
    Ok(values)
}

/// Loads the observed and simulated files concurrently and pairs them.
///
/// Both reads finish before the lengths are compared. A read error takes
/// precedence over a length mismatch; if both reads fail the observed
/// file's error is reported.
///
/// # Errors
/// - [`GofError::Io`] from either file.
/// - [`GofError::LengthMismatch`] if the parsed series differ in length.
pub fn load_pair(observed: &Path, simulated: &Path) -> Result<SeriesPair> {
    let (observed, simulated) = thread::scope(|s| {
        let sim_handle = s.spawn(|| load_sequence(simulated));
        let obs = load_sequence(observed);
        let sim = sim_handle
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
        (obs, sim)
    });
    SeriesPair::new(observed?, simulated?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_sequence() {
        let file = write_temp("flow\n1.5\n\n2.5\r\n3\n");
        assert_eq!(load_sequence(file.path()).unwrap(), vec![1.5, 2.5, 3.0]);
    }

    #[test]
    fn test_load_sequence_with_byte_order_mark() {
        let file = write_temp("\u{FEFF}1.5\n2.5\n3.5\n");
        assert_eq!(load_sequence(file.path()).unwrap(), vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_load_sequence_latin1_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"D\xe9bit m3/s\n4.0\n5.5\n").unwrap();
        assert_eq!(load_sequence(file.path()).unwrap(), vec![4.0, 5.5]);
    }

    #[test]
    fn test_load_pair_mixed_encodings_stay_aligned() {
        let obs = write_temp("\u{FEFF}1\n2\n3\n");
        let mut sim = tempfile::NamedTempFile::new().unwrap();
        sim.write_all(b"d\xe9bit\n1.5\n2.5\n3.5\n").unwrap();
        let pair = load_pair(obs.path(), sim.path()).unwrap();
        assert_eq!(pair.observed(), &[1.0, 2.0, 3.0]);
        assert_eq!(pair.simulated(), &[1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_load_sequence_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = load_sequence(&path).unwrap_err();
        assert!(matches!(err, GofError::Io { .. }));
        assert!(err.to_string().contains("absent.txt"));
    }

    #[test]
    fn test_load_pair() {
        let obs = write_temp("1\n2\n3\n");
        let sim = write_temp("1.1\n1.9\n3.2\n");
        let pair = load_pair(obs.path(), sim.path()).unwrap();
        assert_eq!(pair.observed(), &[1.0, 2.0, 3.0]);
        assert_eq!(pair.simulated(), &[1.1, 1.9, 3.2]);
    }

    #[test]
    fn test_load_pair_length_mismatch() {
        let obs = write_temp("1\n2\n3\n");
        let sim = write_temp("1\n2\n");
        assert!(matches!(
            load_pair(obs.path(), sim.path()),
            Err(GofError::LengthMismatch {
                observed: 3,
                simulated: 2
            })
        ));
    }

    #[test]
    fn test_load_pair_io_error_wins() {
        let obs = write_temp("1\n2\n3\n");
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("sim.txt");
        assert!(matches!(
            load_pair(obs.path(), &missing),
            Err(GofError::Io { .. })
        ));
    }
}
