pub mod crypto;
pub mod otp;
pub mod token;
