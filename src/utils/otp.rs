use rand::{thread_rng, Rng};

/// Generate a 6-digit one-time code (000000-999999). Used both for
/// email verification and for password-reset codes.
pub fn generate_otp() -> String {
    let code: u32 = thread_rng().gen_range(0..1_000_000);
    format!("{:06}", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..100 {
            let code = generate_otp();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn otp_varies() {
        let codes: std::collections::HashSet<String> =
            (0..100).map(|_| generate_otp()).collect();
        assert!(codes.len() > 90);
    }
}
