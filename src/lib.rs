//! Universal errors-and-erasures Reed-Solomon codec over GF(2^m), 3 <= m <= 16.
//!
//! Append `nsym` parity symbols to a message and recover it from a corrupted
//! codeword with up to `e` errors (unknown positions) and `v` erasures (known
//! positions) whenever `2e + v <= nsym`. Long inputs are chunked transparently
//! at the field length limit (`2^m - 1` symbols per chunk).
//!
//! The default parameters (`fcr=0, prim=0x11D, generator=2, c_exp=8`) are
//! wire-compatible with the canonical byte-oriented RS definition used by
//! QR codes; ADS-B UAT callers use `fcr=120, prim=0x187`.
//!
//! # Example
//!
//! ```
//! use solomon_rs::Codec;
//!
//! let rs = Codec::new(10).unwrap();
//! let enc = rs.encode(b"hello world").unwrap();
//!
//! let mut corrupted = enc.clone();
//! corrupted[0] ^= 0xA5;
//! corrupted[5] ^= 0x5A;
//!
//! let (msg, full, errata) = rs.decode(&corrupted).unwrap();
//! assert_eq!(&msg, b"hello world");
//! assert_eq!(full, enc);
//! assert_eq!(errata.len(), 2);
//! ```

pub mod codec;
pub mod decode;
pub mod encode;
pub mod generator;
pub mod gf;
pub mod poly;

pub use codec::{Codec, CodecBuilder, Symbol};
pub use gf::GaloisField;

/// Errors returned by codec construction, encoding and decoding.
///
/// Decoding failures leave the input untouched; no partially corrected
/// buffer is ever returned. Corruption beyond the Singleton bound
/// (`2e + v > nsym`) can, with low probability, decode into a syntactically
/// valid but wrong codeword without an error being raised; callers needing
/// integrity should layer a checksum over the corrected output.
#[derive(Debug, thiserror::Error)]
pub enum ReedSolomonError {
    #[error("field exponent {c_exp} outside supported range 3..=16")]
    UnsupportedExponent { c_exp: u32 },

    #[error("0x{prim:x} does not define GF(2^{c_exp}) with generator {generator}")]
    InvalidPrimePoly { prim: u32, generator: u16, c_exp: u32 },

    #[error("no prime polynomial found for generator {generator} over GF(2^{c_exp})")]
    NoPrimePolyFound { generator: u16, c_exp: u32 },

    #[error("invalid code length: nsym={nsym} must be less than nsize={nsize} (max {max})")]
    InvalidCodeLength { nsym: usize, nsize: usize, max: usize },

    #[error("{bits}-bit symbols cannot hold GF(2^{c_exp}) elements")]
    SymbolTooNarrow { bits: u32, c_exp: u32 },

    #[error("no generator polynomial precomputed for nsym={nsym} (codec built with single_gen)")]
    MissingGenerator { nsym: usize },

    #[error("message of {msg_len} symbols with {nsym} ecc symbols exceeds field capacity {max}")]
    MessageTooLong { msg_len: usize, nsym: usize, max: usize },

    #[error("codeword of {len} symbols exceeds field capacity {max}")]
    CodewordTooLong { len: usize, max: usize },

    #[error("codeword of {len} symbols too short for {nsym} ecc symbols")]
    MessageTooShort { len: usize, nsym: usize },

    #[error("symbol value {value} at position {pos} exceeds field maximum {max}")]
    SymbolOutOfRange { value: usize, pos: usize, max: usize },

    #[error("{erasures} erasures exceed the capacity of {nsym} ecc symbols")]
    TooManyErasures { erasures: usize, nsym: usize },

    #[error("erasure position {pos} out of range for a chunk of {len} symbols")]
    ErasureOutOfRange { pos: usize, len: usize },

    #[error("{errors} errors and {erasures} erasures exceed the capacity of {nsym} ecc symbols")]
    TooManyErrors { errors: usize, erasures: usize, nsym: usize },

    #[error("chien search found {found} roots for an error locator of degree {expected}")]
    ChienSearchFailed { expected: usize, found: usize },

    #[error("zero locator derivative while computing error magnitudes")]
    DegenerateLocator,

    #[error("syndromes remain non-zero after correction")]
    ResidualSyndromes,

    #[error("chunk {chunk}: {source}")]
    Chunk {
        chunk: usize,
        #[source]
        source: Box<ReedSolomonError>,
    },
}

impl ReedSolomonError {
    /// Wrap a per-chunk failure with the index of the offending chunk.
    pub(crate) fn in_chunk(self, chunk: usize) -> Self {
        ReedSolomonError::Chunk {
            chunk,
            source: Box::new(self),
        }
    }
}
