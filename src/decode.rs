//! Errors-and-erasures decoding of a single chunk.
//!
//! The pipeline: syndromes -> Forney syndromes (folding out erasures) ->
//! Berlekamp-Massey error locator -> Chien search -> errata locator and
//! evaluator -> Forney magnitudes -> correction -> verification.

use crate::gf::GaloisField;
use crate::poly::{poly_add, poly_eval, poly_mul, poly_rem, poly_scale};
use crate::ReedSolomonError;

/// Syndrome polynomial of a received chunk: `nsym + 1` entries, low-degree
/// first, with the conventional `synd[0] = 0` shift kept for wire
/// compatibility (Berlekamp-Massey compensates with `synd_shift`).
///
/// `synd[k + 1] = r(a^(k + fcr))`; all zero iff `msg` is a codeword.
pub fn calc_syndromes(gf: &GaloisField, msg: &[u16], nsym: usize, fcr: usize) -> Vec<u16> {
    let mut synd = vec![0u16; nsym + 1];
    for k in 0..nsym {
        synd[k + 1] = poly_eval(gf, msg, gf.alpha_pow(k + fcr));
    }
    synd
}

/// Fold erasure contributions out of the syndromes so Berlekamp-Massey only
/// has to locate the unknown errors. Consumes the shifted syndromes and
/// returns `nsym` entries (the leading conventional zero dropped).
fn forney_syndromes(gf: &GaloisField, synd: &[u16], erase_pos: &[usize], nmess: usize) -> Vec<u16> {
    let mut fsynd = synd[1..].to_vec();
    for &pos in erase_pos {
        let x = gf.alpha_pow(nmess - 1 - pos);
        for j in 0..fsynd.len().saturating_sub(1) {
            fsynd[j] = gf.mul(fsynd[j], x) ^ fsynd[j + 1];
        }
    }
    fsynd
}

/// Berlekamp-Massey iteration producing the error locator polynomial,
/// high-degree first.
///
/// With Forney syndromes the locator covers unknown errors only, so the
/// budget check charges 2 per error plus 1 per already-known erasure.
fn find_error_locator(
    gf: &GaloisField,
    synd: &[u16],
    nsym: usize,
    erase_count: usize,
) -> Result<Vec<u16>, ReedSolomonError> {
    let mut err_loc = vec![1u16];
    let mut old_loc = vec![1u16];

    // Shift past the conventional leading zero when handed raw syndromes.
    let synd_shift = synd.len().saturating_sub(nsym);

    for i in 0..(nsym - erase_count) {
        let k = i + synd_shift;

        // Discrepancy between the syndromes and the current locator.
        let mut delta = synd[k];
        for j in 1..err_loc.len() {
            delta ^= gf.mul(err_loc[err_loc.len() - 1 - j], synd[k - j]);
        }

        old_loc.push(0);

        if delta != 0 {
            if old_loc.len() > err_loc.len() {
                let new_loc = poly_scale(gf, &old_loc, delta);
                old_loc = poly_scale(gf, &err_loc, gf.inverse(delta));
                err_loc = new_loc;
            }
            let scaled = poly_scale(gf, &old_loc, delta);
            err_loc = poly_add(&err_loc, &scaled);
        }
    }

    let zeros = err_loc.iter().take_while(|&&c| c == 0).count();
    let err_loc = err_loc[zeros..].to_vec();

    let errs = err_loc.len() - 1;
    if errs * 2 + erase_count > nsym {
        return Err(ReedSolomonError::TooManyErrors {
            errors: errs,
            erasures: erase_count,
            nsym,
        });
    }

    Ok(err_loc)
}

/// Chien search: brute-force the roots of the (reversed, low-degree first)
/// error locator over the whole chunk. Each root `a^i` marks an error at
/// position `nmess - 1 - i`, so positions come out in descending order.
fn find_errors(
    gf: &GaloisField,
    err_loc_rev: &[u16],
    nmess: usize,
) -> Result<Vec<usize>, ReedSolomonError> {
    let errs = err_loc_rev.len() - 1;
    let mut err_pos = Vec::with_capacity(errs);

    for i in 0..nmess {
        if poly_eval(gf, err_loc_rev, gf.alpha_pow(i)) == 0 {
            err_pos.push(nmess - 1 - i);
        }
    }

    if err_pos.len() != errs {
        return Err(ReedSolomonError::ChienSearchFailed {
            expected: errs,
            found: err_pos.len(),
        });
    }

    Ok(err_pos)
}

/// Errata locator from coefficient-space positions (`nmess - 1 - pos`):
/// product of `(a^p * x + 1)` factors, high-degree first.
fn errata_locator(gf: &GaloisField, coef_pos: &[usize]) -> Vec<u16> {
    let mut loc = vec![1u16];
    for &p in coef_pos {
        loc = poly_mul(gf, &loc, &[gf.alpha_pow(p), 1]);
    }
    loc
}

/// Errata evaluator: `(synd_rev * errata_loc) mod x^(n + 1)`, where `n` is
/// the errata count. `synd_rev` is the syndrome polynomial reversed into
/// high-degree-first order to match the locator's convention.
fn error_evaluator(gf: &GaloisField, synd_rev: &[u16], errata_loc: &[u16], n: usize) -> Vec<u16> {
    let product = poly_mul(gf, synd_rev, errata_loc);
    let mut divisor = vec![0u16; n + 2];
    divisor[0] = 1;
    poly_rem(gf, &product, &divisor)
}

/// Forney algorithm: compute the error magnitudes at the known errata
/// positions and XOR them into the received chunk.
fn correct_errata(
    gf: &GaloisField,
    msg: &[u16],
    synd: &[u16],
    errata_pos: &[usize],
    fcr: usize,
) -> Result<Vec<u16>, ReedSolomonError> {
    let nmess = msg.len();
    let coef_pos: Vec<usize> = errata_pos.iter().map(|&p| nmess - 1 - p).collect();

    let errata_loc = errata_locator(gf, &coef_pos);
    let synd_rev: Vec<u16> = synd.iter().rev().copied().collect();
    let eval = error_evaluator(gf, &synd_rev, &errata_loc, errata_loc.len() - 1);

    // X_i = a^(nmess - 1 - p_i), the errata location values.
    let x_vals: Vec<u16> = coef_pos.iter().map(|&p| gf.alpha_pow(p)).collect();

    let mut delta = vec![0u16; nmess];
    for (i, &xi) in x_vals.iter().enumerate() {
        let xi_inv = gf.inverse(xi);

        // Formal derivative of the errata locator at X_i, as a product of
        // (1 - X_i^-1 * X_j) over the other errata.
        let mut loc_prime = 1u16;
        for (j, &xj) in x_vals.iter().enumerate() {
            if j != i {
                loc_prime = gf.mul(loc_prime, 1 ^ gf.mul(xi_inv, xj));
            }
        }
        if loc_prime == 0 {
            return Err(ReedSolomonError::DegenerateLocator);
        }

        let y = gf.mul(gf.pow(xi, 1 - fcr as i32), poly_eval(gf, &eval, xi_inv));
        delta[errata_pos[i]] = gf.div(y, loc_prime);
    }

    Ok(poly_add(msg, &delta))
}

/// Decode one chunk: correct up to `e` errors and `v` erasures with
/// `2e + v <= nsym`, returning `(message, parity, errata_positions)`.
///
/// Erasure positions are zero-filled before anything else, which makes the
/// locator polynomial independent of whatever garbage the erased symbols
/// held. Errata positions come back erasures first (in the order supplied),
/// then errors in Chien-search order (descending position). On any failure
/// the input is left untouched and nothing partial is returned.
pub fn correct_msg(
    gf: &GaloisField,
    msg_in: &[u16],
    nsym: usize,
    fcr: usize,
    erase_pos: &[usize],
    only_erasures: bool,
) -> Result<(Vec<u16>, Vec<u16>, Vec<usize>), ReedSolomonError> {
    if msg_in.len() > gf.charac() {
        return Err(ReedSolomonError::CodewordTooLong {
            len: msg_in.len(),
            max: gf.charac(),
        });
    }
    if msg_in.len() < nsym {
        return Err(ReedSolomonError::MessageTooShort {
            len: msg_in.len(),
            nsym,
        });
    }

    let mut msg = msg_in.to_vec();
    for &pos in erase_pos {
        if pos >= msg.len() {
            return Err(ReedSolomonError::ErasureOutOfRange {
                pos,
                len: msg.len(),
            });
        }
        msg[pos] = 0;
    }
    if erase_pos.len() > nsym {
        return Err(ReedSolomonError::TooManyErasures {
            erasures: erase_pos.len(),
            nsym,
        });
    }

    let synd = calc_syndromes(gf, &msg, nsym, fcr);
    if synd.iter().all(|&s| s == 0) {
        let split = msg.len() - nsym;
        let parity = msg.split_off(split);
        return Ok((msg, parity, erase_pos.to_vec()));
    }

    let err_pos = if only_erasures {
        Vec::new()
    } else {
        let fsynd = forney_syndromes(gf, &synd, erase_pos, msg.len());
        let err_loc = find_error_locator(gf, &fsynd, nsym, erase_pos.len())?;
        let err_loc_rev: Vec<u16> = err_loc.iter().rev().copied().collect();
        find_errors(gf, &err_loc_rev, msg.len())?
    };

    let mut errata_pos: Vec<usize> = erase_pos.to_vec();
    errata_pos.extend(&err_pos);

    let mut corrected = correct_errata(gf, &msg, &synd, &errata_pos, fcr)?;

    let synd = calc_syndromes(gf, &corrected, nsym, fcr);
    if synd.iter().any(|&s| s != 0) {
        return Err(ReedSolomonError::ResidualSyndromes);
    }

    let split = corrected.len() - nsym;
    let parity = corrected.split_off(split);
    Ok((corrected, parity, errata_pos))
}
