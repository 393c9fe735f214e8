use std::fs::{self, File};
use std::io::{self, Read};

use anyhow::{bail, Context, Result};

/// Read raw input bytes from a path, or stdin when `input` is `-`.
///
/// At most `max_bytes + 1` bytes are buffered, so an oversized input is
/// still detected by the parser's limit check without being read whole.
pub fn read_input(input: &str, max_bytes: usize) -> Result<Vec<u8>> {
    let cap = max_bytes as u64 + 1;

    if input == "-" {
        return read_capped(io::stdin().lock(), cap).context("failed to read stdin");
    }

    let len = fs::metadata(input)
        .with_context(|| format!("failed to read {input}"))?
        .len();
    if len > max_bytes as u64 {
        bail!("{input}: JSON payload too large ({len} bytes > limit {max_bytes})");
    }

    let file = File::open(input).with_context(|| format!("failed to read {input}"))?;
    read_capped(file, cap).with_context(|| format!("failed to read {input}"))
}

fn read_capped<R: Read>(reader: R, cap: u64) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(cap).read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_read_stops_one_past_limit() {
        let data = vec![b'x'; 100];
        let buf = read_capped(&data[..], 11).unwrap();
        assert_eq!(buf.len(), 11);
    }

    #[test]
    fn oversized_file_rejected_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.json");
        fs::write(&path, vec![b' '; 64]).unwrap();

        let err = read_input(path.to_str().unwrap(), 16).unwrap_err();
        assert!(err.to_string().contains("too large"));

        assert_eq!(read_input(path.to_str().unwrap(), 64).unwrap().len(), 64);
    }
}
