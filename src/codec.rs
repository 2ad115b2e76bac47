//! Chunking codec facade.
//!
//! A [`Codec`] owns its field tables and generator polynomial(s), splits long
//! inputs into chunks at the field length limit and dispatches per-chunk
//! encoding and decoding. Instances are immutable after construction and can
//! be shared freely across threads.

use std::marker::PhantomData;

use crate::decode::{calc_syndromes, correct_msg};
use crate::encode::encode_msg;
use crate::generator::{generator_poly, generator_poly_all};
use crate::gf::{find_prime_poly, GaloisField};
use crate::ReedSolomonError;

/// The symbol type a codec operates on.
///
/// One symbol type per codec instance: `u8` covers fields up to GF(2^8),
/// `u16` covers the whole supported range up to GF(2^16). Internally the
/// codec computes on `u16` words; this trait converts at the API boundary.
pub trait Symbol: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// Width of the symbol type in bits.
    const BITS: u32;

    fn into_word(self) -> u16;
    fn from_word(word: u16) -> Self;
}

impl Symbol for u8 {
    const BITS: u32 = 8;

    #[inline]
    fn into_word(self) -> u16 {
        self as u16
    }

    #[inline]
    fn from_word(word: u16) -> Self {
        word as u8
    }
}

impl Symbol for u16 {
    const BITS: u32 = 16;

    #[inline]
    fn into_word(self) -> u16 {
        self
    }

    #[inline]
    fn from_word(word: u16) -> Self {
        word
    }
}

/// Precomputed generator polynomials: either just the codec's own rate, or
/// the whole family for variable-rate encoding.
#[derive(Debug, Clone)]
enum Generators {
    Single { nsym: usize, gen: Vec<u16> },
    All(Vec<Vec<u16>>),
}

impl Generators {
    fn get(&self, nsym: usize) -> Result<&[u16], ReedSolomonError> {
        match self {
            Generators::Single { nsym: own, gen } if *own == nsym => Ok(gen.as_slice()),
            Generators::Single { .. } => Err(ReedSolomonError::MissingGenerator { nsym }),
            Generators::All(gens) => gens
                .get(nsym)
                .map(Vec::as_slice)
                .ok_or(ReedSolomonError::MissingGenerator { nsym }),
        }
    }
}

/// Builder for [`Codec`] parameters.
///
/// Defaults: `nsize` = the field's maximum codeword length, `fcr` = 0,
/// `prim` = 0x11D for GF(2^8) or the first valid polynomial found for other
/// exponents, `generator` = 2, `c_exp` = 8, `single_gen` = true.
#[derive(Debug, Clone)]
pub struct CodecBuilder {
    nsym: usize,
    nsize: Option<usize>,
    fcr: usize,
    prim: Option<u32>,
    generator: u16,
    c_exp: u32,
    single_gen: bool,
}

impl CodecBuilder {
    pub fn new(nsym: usize) -> Self {
        CodecBuilder {
            nsym,
            nsize: None,
            fcr: 0,
            prim: None,
            generator: 2,
            c_exp: 8,
            single_gen: true,
        }
    }

    /// Maximum chunk length (message plus parity). Asking for more than
    /// GF(2^8) can address automatically raises the field exponent.
    pub fn nsize(mut self, nsize: usize) -> Self {
        self.nsize = Some(nsize);
        self
    }

    /// First consecutive root exponent of the generator polynomial.
    pub fn fcr(mut self, fcr: usize) -> Self {
        self.fcr = fcr;
        self
    }

    /// Prime polynomial defining the field. When unset, GF(2^8) uses the
    /// canonical 0x11D and other exponents are searched automatically.
    pub fn prim(mut self, prim: u32) -> Self {
        self.prim = Some(prim);
        self
    }

    /// Generator element of the multiplicative group (not to be confused
    /// with the prime polynomial).
    pub fn generator(mut self, generator: u16) -> Self {
        self.generator = generator;
        self
    }

    /// Field exponent m of GF(2^m), 3..=16.
    pub fn c_exp(mut self, c_exp: u32) -> Self {
        self.c_exp = c_exp;
        self
    }

    /// When true (the default) only the generator polynomial for `nsym` is
    /// precomputed; variable-rate [`Codec::encode_with`] then requires
    /// `single_gen(false)`.
    pub fn single_gen(mut self, single_gen: bool) -> Self {
        self.single_gen = single_gen;
        self
    }

    /// Resolve parameters, build and validate the field, and precompute the
    /// generator polynomial(s).
    pub fn build<S: Symbol>(self) -> Result<Codec<S>, ReedSolomonError> {
        let mut c_exp = self.c_exp;
        if let Some(nsize) = self.nsize {
            // A chunk length beyond GF(2^8) silently widens the field to the
            // smallest exponent that can address it.
            if nsize > 255 && c_exp <= 8 {
                while c_exp < 16 && (1usize << c_exp) - 1 < nsize {
                    c_exp += 1;
                }
            }
        }
        if !(3..=16).contains(&c_exp) {
            return Err(ReedSolomonError::UnsupportedExponent { c_exp });
        }
        if S::BITS < c_exp {
            return Err(ReedSolomonError::SymbolTooNarrow {
                bits: S::BITS,
                c_exp,
            });
        }

        let prim = match self.prim {
            Some(prim) => prim,
            None if c_exp == 8 => 0x11d,
            None => find_prime_poly(self.generator, c_exp, true).ok_or(
                ReedSolomonError::NoPrimePolyFound {
                    generator: self.generator,
                    c_exp,
                },
            )?,
        };

        let max = (1usize << c_exp) - 1;
        let nsize = self.nsize.unwrap_or(max);
        if self.nsym >= nsize || nsize > max {
            return Err(ReedSolomonError::InvalidCodeLength {
                nsym: self.nsym,
                nsize,
                max,
            });
        }

        let gf = GaloisField::new(prim, self.generator, c_exp)?;
        let gens = if self.single_gen {
            Generators::Single {
                nsym: self.nsym,
                gen: generator_poly(&gf, self.nsym, self.fcr),
            }
        } else {
            Generators::All(generator_poly_all(&gf, nsize, self.fcr))
        };

        Ok(Codec {
            gf,
            nsym: self.nsym,
            nsize,
            fcr: self.fcr,
            gens,
            _symbol: PhantomData,
        })
    }
}

/// Reed-Solomon codec over GF(2^m) with transparent chunking.
///
/// Construct with [`Codec::new`] for byte symbols and default parameters, or
/// through [`CodecBuilder`] for everything else. Logically immutable after
/// construction; `&Codec` is freely shareable across threads.
#[derive(Debug, Clone)]
pub struct Codec<S: Symbol = u8> {
    gf: GaloisField,
    nsym: usize,
    nsize: usize,
    fcr: usize,
    gens: Generators,
    _symbol: PhantomData<S>,
}

impl Codec<u8> {
    /// Byte codec with `nsym` parity symbols per 255-symbol chunk and the
    /// canonical GF(2^8) parameters (`fcr=0, prim=0x11D, generator=2`).
    pub fn new(nsym: usize) -> Result<Self, ReedSolomonError> {
        CodecBuilder::new(nsym).build()
    }
}

impl<S: Symbol> Codec<S> {
    /// Parity symbols per chunk.
    pub fn nsym(&self) -> usize {
        self.nsym
    }

    /// Maximum chunk length (message plus parity).
    pub fn nsize(&self) -> usize {
        self.nsize
    }

    /// Message symbols per full chunk.
    pub fn chunk_size(&self) -> usize {
        self.nsize - self.nsym
    }

    /// The underlying field.
    pub fn field(&self) -> &GaloisField {
        &self.gf
    }

    /// Encode `data`, chunking as needed. Each chunk of up to
    /// `nsize - nsym` message symbols is followed by its `nsym` parity
    /// symbols; the last chunk may be shorter (no padding is added).
    pub fn encode(&self, data: &[S]) -> Result<Vec<S>, ReedSolomonError> {
        self.encode_with(data, self.nsym)
    }

    /// Encode at a different rate than the codec's default. Requires the
    /// matching generator polynomial, i.e. construction with
    /// `single_gen(false)` for any `nsym` other than the codec's own.
    pub fn encode_with(&self, data: &[S], nsym: usize) -> Result<Vec<S>, ReedSolomonError> {
        if nsym >= self.nsize {
            return Err(ReedSolomonError::InvalidCodeLength {
                nsym,
                nsize: self.nsize,
                max: self.gf.charac(),
            });
        }
        let gen = self.gens.get(nsym)?;
        let words = self.to_words(data)?;

        let chunk_size = self.nsize - nsym;
        let total_chunks = words.len().div_ceil(chunk_size);
        let mut out = Vec::with_capacity(words.len() + total_chunks * nsym);
        for chunk in words.chunks(chunk_size) {
            out.extend(encode_msg(&self.gf, chunk, nsym, gen)?);
        }
        Ok(out.into_iter().map(S::from_word).collect())
    }

    /// Decode `data`, correcting errors up to the Singleton bound
    /// (`2 * errors <= nsym` without erasure hints).
    ///
    /// Returns `(message, message_with_parity, errata_positions)`. Errata
    /// positions are chunk-local, concatenated in chunk order, erasures
    /// first within each chunk. Corruption beyond the bound is detected
    /// best-effort; see [`ReedSolomonError`].
    pub fn decode(&self, data: &[S]) -> Result<(Vec<S>, Vec<S>, Vec<usize>), ReedSolomonError> {
        self.decode_with(data, self.nsym, &[], false)
    }

    /// Decode with known erasure positions (indices into `data`; positions
    /// in later chunks are given in the concatenated coordinate space).
    /// Each erasure costs one parity symbol instead of two.
    pub fn decode_with_erasures(
        &self,
        data: &[S],
        erase_pos: &[usize],
    ) -> Result<(Vec<S>, Vec<S>, Vec<usize>), ReedSolomonError> {
        self.decode_with(data, self.nsym, erase_pos, false)
    }

    /// Full-control decode: rate override, erasure positions, and an
    /// erasures-only mode that skips the error search entirely.
    pub fn decode_with(
        &self,
        data: &[S],
        nsym: usize,
        erase_pos: &[usize],
        only_erasures: bool,
    ) -> Result<(Vec<S>, Vec<S>, Vec<usize>), ReedSolomonError> {
        let words = self.to_words(data)?;

        let total_chunks = words.len().div_ceil(self.nsize);
        let mut msg = Vec::with_capacity(words.len().saturating_sub(total_chunks * nsym));
        let mut full = Vec::with_capacity(words.len());
        let mut errata = Vec::new();

        // Positions >= nsize belong to later chunks; shift them down as the
        // chunks go by.
        let mut remaining: Vec<usize> = erase_pos.to_vec();

        for (idx, chunk) in words.chunks(self.nsize).enumerate() {
            let (mine, rest): (Vec<usize>, Vec<usize>) =
                remaining.iter().partition(|&&p| p < self.nsize);
            remaining = rest.into_iter().map(|p| p - self.nsize).collect();

            let (m, parity, chunk_errata) =
                correct_msg(&self.gf, chunk, nsym, self.fcr, &mine, only_erasures)
                    .map_err(|e| e.in_chunk(idx))?;

            full.extend_from_slice(&m);
            full.extend_from_slice(&parity);
            msg.extend(m);
            errata.extend(chunk_errata);
        }

        Ok((
            msg.into_iter().map(S::from_word).collect(),
            full.into_iter().map(S::from_word).collect(),
            errata,
        ))
    }

    /// Fast per-chunk integrity check: entry `i` is true iff every syndrome
    /// of chunk `i` is zero (i.e. the chunk is a codeword).
    pub fn check(&self, data: &[S]) -> Result<Vec<bool>, ReedSolomonError> {
        self.check_with(data, self.nsym)
    }

    /// [`Codec::check`] at a different rate.
    pub fn check_with(&self, data: &[S], nsym: usize) -> Result<Vec<bool>, ReedSolomonError> {
        let words = self.to_words(data)?;
        Ok(words
            .chunks(self.nsize)
            .map(|chunk| {
                calc_syndromes(&self.gf, chunk, nsym, self.fcr)
                    .iter()
                    .all(|&s| s == 0)
            })
            .collect())
    }

    /// Correction capacity as `(max_errors, max_erasures)`.
    ///
    /// With no constraint: `(nsym / 2, nsym)`, the two independent maxima.
    /// Given a planned erasure count `v`: `((nsym - v) / 2, v)`. Given a
    /// planned error count `e`: `(e, nsym - 2e)`. A constraint beyond the
    /// codec's capacity is an error.
    pub fn maxerrata(
        &self,
        errors: Option<usize>,
        erasures: Option<usize>,
    ) -> Result<(usize, usize), ReedSolomonError> {
        self.maxerrata_with(self.nsym, errors, erasures)
    }

    /// [`Codec::maxerrata`] for an explicit rate.
    pub fn maxerrata_with(
        &self,
        nsym: usize,
        errors: Option<usize>,
        erasures: Option<usize>,
    ) -> Result<(usize, usize), ReedSolomonError> {
        let mut max_errors = nsym / 2;
        let mut max_erasures = nsym;
        if let Some(v) = erasures {
            if v > max_erasures {
                return Err(ReedSolomonError::TooManyErasures {
                    erasures: v,
                    nsym,
                });
            }
            max_errors = (nsym - v) / 2;
            max_erasures = v;
        } else if let Some(e) = errors {
            if e > max_errors {
                return Err(ReedSolomonError::TooManyErrors {
                    errors: e,
                    erasures: 0,
                    nsym,
                });
            }
            max_erasures = nsym - e * 2;
            max_errors = e;
        }
        Ok((max_errors, max_erasures))
    }

    /// Widen symbols to field words, rejecting values outside the field
    /// when the symbol type is wider than the field exponent.
    fn to_words(&self, data: &[S]) -> Result<Vec<u16>, ReedSolomonError> {
        if S::BITS > self.gf.c_exp() {
            let max = self.gf.charac();
            for (pos, &s) in data.iter().enumerate() {
                let value = s.into_word() as usize;
                if value > max {
                    return Err(ReedSolomonError::SymbolOutOfRange { value, pos, max });
                }
            }
        }
        Ok(data.iter().map(|&s| s.into_word()).collect())
    }
}
