//! Shared helpers for on-disk tests

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

/// Write `bytes` to `name` inside a fresh temp dir. Keep the dir alive for
/// as long as the path is used.
pub fn file_with(name: &str, bytes: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("Failed to write fixture");
    (dir, path)
}

fn padded(text: &str, width: usize) -> Vec<u8> {
    let mut field = text.as_bytes().to_vec();
    field.resize(width, b' ');
    field
}

/// A 128-byte ID3v1.1 trailer.
pub fn id3v1_trailer(title: &str, artist: &str, track: u8, genre: u8) -> Vec<u8> {
    let mut bytes = b"TAG".to_vec();
    bytes.extend(padded(title, 30));
    bytes.extend(padded(artist, 30));
    bytes.extend(padded("", 30));
    bytes.extend(padded("2024", 4));
    bytes.extend(padded("", 28));
    bytes.push(0);
    bytes.push(track);
    bytes.push(genre);
    bytes
}

/// Fake audio payload followed by an ID3v1.1 trailer.
pub fn mp3_with_trailer(title: &str, artist: &str, track: u8) -> Vec<u8> {
    let mut bytes = vec![0xFFu8; 400];
    bytes.extend(id3v1_trailer(title, artist, track, 31));
    bytes
}

/// A flat atom region: size-prefixed "ftyp" marker, field atoms, "mdat" trailer.
pub fn atom_region(atoms: &[(&[u8; 4], &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (kind, value) in atoms {
        body.extend_from_slice(&(8 + value.len() as u32).to_be_bytes());
        body.extend_from_slice(*kind);
        body.extend_from_slice(value.as_bytes());
    }
    let total = 8 + body.len() as u32 + 8;
    let mut bytes = total.to_be_bytes().to_vec();
    bytes.extend_from_slice(b"ftyp");
    bytes.extend(body);
    bytes.extend_from_slice(&8u32.to_be_bytes());
    bytes.extend_from_slice(b"mdat");
    bytes
}
