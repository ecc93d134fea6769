//! SHA-256 digests.
//!
//! - `sha256_hex` / `sha256_file`: raw bytes.
//! - `sha256_canonical`: any serializable value, via canonical JSON, so the
//!   digest ignores field order but not array order.
//! - `snapshot_sha256`: the node collection an analysis ran over; two runs
//!   with equal digests analysed identical input.
//!
//! Hex is always lowercase, 64 chars.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use org_core::OrgNode;

use crate::canonical_json::canonical_bytes_of;
use crate::{IoError, IoResult};

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&canonical_bytes_of(value)?))
}

pub fn sha256_file(path: &Path) -> IoResult<String> {
    let mut r = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = r.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

pub fn snapshot_sha256(nodes: &[OrgNode]) -> IoResult<String> {
    sha256_canonical(&nodes)
}

/// Accept only lowercase 64-hex.
pub fn check_hex64(s: &str) -> IoResult<()> {
    if s.len() == 64 && s.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f')) {
        Ok(())
    } else {
        Err(IoError::Hash(format!("expected lowercase 64-hex digest, got {s:?}")))
    }
}

/// Fail unless `nodes` hash to `expected`.
pub fn verify_snapshot(nodes: &[OrgNode], expected: &str) -> IoResult<()> {
    check_hex64(expected)?;
    let actual = snapshot_sha256(nodes)?;
    if actual == expected {
        Ok(())
    } else {
        Err(IoError::Hash(format!("snapshot digest mismatch: expected {expected}, got {actual}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_core::Grade;
    use serde_json::json;

    #[test]
    fn known_vector_lowercase() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn canonical_hash_ignores_key_order() {
        #[derive(Serialize)]
        struct T {
            b: u32,
            a: u32,
        }
        let h1 = sha256_canonical(&T { b: 2, a: 1 }).unwrap();
        let h2 = sha256_canonical(&json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn snapshot_digest_tracks_content_and_order() {
        let a = OrgNode::new("a".parse().unwrap(), Grade::G4, "A", "t0");
        let b = OrgNode::new("b".parse().unwrap(), Grade::G4, "B", "t0");
        let d1 = snapshot_sha256(&[a.clone(), b.clone()]).unwrap();
        let d2 = snapshot_sha256(&[b.clone(), a.clone()]).unwrap();
        assert_ne!(d1, d2);
        assert!(verify_snapshot(&[a.clone(), b.clone()], &d1).is_ok());
        assert!(matches!(verify_snapshot(&[a, b], &d2), Err(IoError::Hash(_))));
        assert!(check_hex64("ABC").is_err());
    }

    #[test]
    fn file_hash_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("x.bin");
        std::fs::write(&p, b"abc").unwrap();
        assert_eq!(sha256_file(&p).unwrap(), sha256_hex(b"abc"));
    }
}
