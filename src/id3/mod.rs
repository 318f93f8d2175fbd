// ID3 metadata handling module
//
// Only the ID3v1.1 trailer is decoded; ID3v2 headers are detected but not parsed.
pub mod v1;

pub use v1::{Id3v1Tag, Id3v1Update};
