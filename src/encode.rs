//! Systematic Reed-Solomon encoding of a single chunk.

use crate::gf::GaloisField;
use crate::ReedSolomonError;

/// Encode one chunk: append `nsym` parity symbols to `msg`.
///
/// This is the extended synthetic division of `msg * x^nsym` by the monic
/// generator `gen`, computed in place with the remainder landing directly in
/// the parity tail. The generator's logs are taken once up front; the first
/// (monic) coefficient is skipped.
///
/// `gen` must be the generator polynomial of degree `nsym` for the codec's
/// `fcr`, high-degree first.
pub fn encode_msg(
    gf: &GaloisField,
    msg: &[u16],
    nsym: usize,
    gen: &[u16],
) -> Result<Vec<u16>, ReedSolomonError> {
    debug_assert_eq!(gen.len(), nsym + 1);
    if msg.len() + nsym > gf.charac() {
        return Err(ReedSolomonError::MessageTooLong {
            msg_len: msg.len(),
            nsym,
            max: gf.charac(),
        });
    }

    let mut out = vec![0u16; msg.len() + nsym];
    out[..msg.len()].copy_from_slice(msg);

    let lgen: Vec<u16> = gen
        .iter()
        .map(|&g| if g == 0 { 0 } else { gf.log(g) })
        .collect();

    for i in 0..msg.len() {
        let coef = out[i];
        if coef != 0 {
            let lcoef = gf.log(coef) as usize;
            for j in 1..gen.len() {
                if gen[j] != 0 {
                    out[i + j] ^= gf.exp(lcoef + lgen[j] as usize);
                }
            }
        }
    }

    // The division trampled the message prefix; restore it.
    out[..msg.len()].copy_from_slice(msg);
    Ok(out)
}
