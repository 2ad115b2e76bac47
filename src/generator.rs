//! Reed-Solomon generator polynomials.

use crate::gf::GaloisField;
use crate::poly::poly_mul;

/// Generator polynomial for `nsym` ecc symbols:
/// g(x) = (x - a^fcr)(x - a^(fcr+1))...(x - a^(fcr+nsym-1)).
///
/// Monic, degree `nsym`, high-degree first.
pub fn generator_poly(gf: &GaloisField, nsym: usize, fcr: usize) -> Vec<u16> {
    let mut gen = vec![1u16];
    for i in 0..nsym {
        gen = poly_mul(gf, &gen, &[1, gf.alpha_pow(i + fcr)]);
    }
    gen
}

/// Generator polynomials for every `nsym` in `[0, max_nsym)`, indexed by
/// `nsym`. Precomputing the whole family makes variable-rate encoding a
/// table lookup.
pub fn generator_poly_all(gf: &GaloisField, max_nsym: usize, fcr: usize) -> Vec<Vec<u16>> {
    (0..max_nsym).map(|nsym| generator_poly(gf, nsym, fcr)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::poly_eval;

    #[test]
    fn test_known_generator_fcr120() {
        let gf = GaloisField::new(0x11d, 2, 8).unwrap();
        assert_eq!(
            generator_poly(&gf, 8, 120),
            vec![1, 106, 9, 105, 86, 5, 166, 76, 9]
        );
    }

    #[test]
    fn test_known_generator_base3() {
        let gf = GaloisField::new(0x11b, 3, 8).unwrap();
        assert_eq!(
            generator_poly(&gf, 8, 0),
            vec![1, 128, 13, 69, 36, 145, 199, 165, 30]
        );
    }

    #[test]
    fn test_generator_is_monic_with_consecutive_roots() {
        let gf = GaloisField::new(0x11d, 2, 8).unwrap();
        for (nsym, fcr) in [(2usize, 0usize), (10, 0), (14, 120), (32, 1)] {
            let gen = generator_poly(&gf, nsym, fcr);
            assert_eq!(gen.len(), nsym + 1);
            assert_eq!(gen[0], 1, "generator must be monic");
            for i in 0..nsym {
                assert_eq!(
                    poly_eval(&gf, &gen, gf.alpha_pow(i + fcr)),
                    0,
                    "a^{} should be a root of g(x) for nsym={nsym} fcr={fcr}",
                    i + fcr
                );
            }
            // One past the root run must not be a root.
            assert_ne!(poly_eval(&gf, &gen, gf.alpha_pow(nsym + fcr)), 0);
        }
    }

    #[test]
    fn test_generator_poly_all_matches_individual() {
        let gf = GaloisField::new(0x11d, 2, 8).unwrap();
        let all = generator_poly_all(&gf, 11, 120);
        assert_eq!(all.len(), 11);
        assert_eq!(all[0], vec![1]);
        for nsym in 0..11 {
            assert_eq!(all[nsym], generator_poly(&gf, nsym, 120));
        }
        assert_eq!(all[8], vec![1, 106, 9, 105, 86, 5, 166, 76, 9]);
    }
}
