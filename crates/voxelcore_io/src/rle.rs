//! Run-length coding of the voxel stream.
//!
//! Each record is three bytes: the material (`u8`) followed by the run
//! length (`u16`, little-endian). Records walk the flat buffer in native
//! index order.

use std::io::Read;

use crate::error::{VxmError, VxmResult};

/// Longest run a single record can carry.
pub const MAX_RUN: usize = u16::MAX as usize;

/// Size of one encoded record in bytes.
pub const RECORD_SIZE: usize = 3;

/// Appends the canonical encoding of `voxels` to `out`.
///
/// Runs are as long as possible, so decoding and re-encoding reproduces the
/// same bytes. A run of 65536 identical values becomes `(v, 65535), (v, 1)`.
/// Returns the number of records written.
#[allow(clippy::cast_possible_truncation)]
pub fn encode(voxels: &[u8], out: &mut Vec<u8>) -> usize {
    let mut records = 0;
    let mut rest = voxels;

    while let Some(&value) = rest.first() {
        let run = rest
            .iter()
            .take(MAX_RUN)
            .take_while(|&&v| v == value)
            .count();

        out.push(value);
        out.extend_from_slice(&(run as u16).to_le_bytes());
        records += 1;
        rest = &rest[run..];
    }

    records
}

/// Buffer space reserved up front; the rest grows with the records read.
const INITIAL_CAPACITY: usize = 1 << 16;

/// Decodes RLE records from `reader` until they cover `total` voxels.
///
/// The buffer grows one record at a time, so a header that claims more voxels
/// than the stream carries fails with [`VxmError::Truncated`] instead of
/// allocating the claimed size. Anything after the last record is left unread.
///
/// # Errors
///
/// Returns [`VxmError::RleOverrun`] if a record would run past `total`,
/// [`VxmError::Truncated`] if the stream ends first and
/// [`VxmError::OutOfMemory`] if the buffer cannot grow.
pub fn decode<R: Read>(reader: &mut R, total: usize) -> VxmResult<Vec<u8>> {
    let mut voxels = Vec::new();
    voxels
        .try_reserve_exact(total.min(INITIAL_CAPACITY))
        .map_err(|_| VxmError::OutOfMemory { voxels: total })?;
    let mut empty_runs = 0usize;

    while voxels.len() < total {
        let mut record = [0u8; RECORD_SIZE];
        reader
            .read_exact(&mut record)
            .map_err(|e| VxmError::from_read(e, "voxel stream"))?;

        let index = voxels.len();
        let value = record[0];
        let run = u16::from_le_bytes([record[1], record[2]]);
        if run == 0 {
            empty_runs += 1;
            continue;
        }

        let end = index + usize::from(run);
        if end > total {
            return Err(VxmError::RleOverrun { index, run, total });
        }

        voxels
            .try_reserve(usize::from(run))
            .map_err(|_| VxmError::OutOfMemory { voxels: total })?;
        voxels.resize(end, value);
    }

    if empty_runs > 0 {
        tracing::warn!(empty_runs, "voxel stream contains zero-length runs");
    }

    Ok(voxels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(voxels: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        encode(voxels, &mut out);
        out
    }

    #[test]
    fn test_encode_runs() {
        assert_eq!(records(&[1, 1, 1, 0, 2, 2]), vec![1, 3, 0, 0, 1, 0, 2, 2, 0]);
        assert!(records(&[]).is_empty());
    }

    #[test]
    fn test_max_run_splits() {
        let voxels = vec![9u8; MAX_RUN + 1];
        let mut out = Vec::new();

        assert_eq!(encode(&voxels, &mut out), 2);
        assert_eq!(out, vec![9, 0xFF, 0xFF, 9, 1, 0]);
    }

    #[test]
    fn test_decode_fills_buffer() {
        let stream = records(&[4, 4, 0, 0, 0, 7]);

        let voxels = decode(&mut stream.as_slice(), 6).unwrap();
        assert_eq!(voxels, [4, 4, 0, 0, 0, 7]);
    }

    #[test]
    fn test_decode_leaves_trailing_bytes() {
        let mut stream = records(&[1, 1]);
        stream.extend_from_slice(&[0xDE, 0xAD]);
        let mut reader = stream.as_slice();

        assert_eq!(decode(&mut reader, 2).unwrap(), [1, 1]);
        assert_eq!(reader, &[0xDE, 0xAD]);
    }

    #[test]
    fn test_decode_overrun() {
        let stream = [5u8, 3, 0, 5, 2, 0];

        let err = decode(&mut stream.as_slice(), 4).unwrap_err();
        assert!(matches!(err, VxmError::RleOverrun { index: 3, run: 2, total: 4 }));
    }

    #[test]
    fn test_decode_truncated() {
        let stream = [5u8, 3, 0, 5];

        let err = decode(&mut stream.as_slice(), 4).unwrap_err();
        assert!(matches!(err, VxmError::Truncated("voxel stream")));
    }

    #[test]
    fn test_zero_runs_are_skipped() {
        let stream = [3u8, 0, 0, 1, 2, 0];

        assert_eq!(decode(&mut stream.as_slice(), 2).unwrap(), [1, 1]);
    }

    #[test]
    fn test_reencode_is_identical() {
        let voxels: Vec<u8> = (0..5000u32).map(|i| ((i / 37) % 4) as u8).collect();
        let stream = records(&voxels);

        let decoded = decode(&mut stream.as_slice(), voxels.len()).unwrap();

        assert_eq!(decoded, voxels);
        assert_eq!(records(&decoded), stream);
    }

    #[test]
    fn test_huge_total_with_short_stream() {
        let stream = records(&[8; 10]);

        let err = decode(&mut stream.as_slice(), usize::MAX).unwrap_err();
        assert!(matches!(err, VxmError::Truncated("voxel stream")));
    }
}
