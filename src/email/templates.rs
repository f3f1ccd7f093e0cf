//! Email bodies for the verification and password-reset flows.

#[derive(Debug, Clone)]
pub struct MailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

pub fn otp_email(code: &str) -> MailContent {
    MailContent {
        subject: "Verify Your Casting App Account".to_string(),
        text: format!(
            "Welcome to Casting App!\n\n\
             Your One-Time Password (OTP) is: {}\n\n\
             This OTP is valid for 10 minutes. Please do not share it with anyone.\n\n\
             If you did not request this OTP, please ignore this email.",
            code
        ),
        html: format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; color: #333;">
  <h2>Welcome to Casting App!</h2>
  <p>To complete your registration, please use the following One-Time Password (OTP):</p>
  <h3 style="background: #f1f3f4; padding: 10px; border-radius: 5px; text-align: center;">{}</h3>
  <p>This OTP is valid for 10 minutes. Please do not share it with anyone.</p>
  <p>If you did not request this OTP, please ignore this email.</p>
</div>"#,
            code
        ),
    }
}

pub fn reset_email(code: &str) -> MailContent {
    MailContent {
        subject: "Password Reset".to_string(),
        text: format!(
            "Your reset code is: {}. It expires in 10 minutes.",
            code
        ),
        html: format!(
            "<p>Your reset code is: <strong>{}</strong>. It expires in 10 minutes.</p>",
            code
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_email_contains_code() {
        let content = otp_email("482913");
        assert!(content.text.contains("482913"));
        assert!(content.html.contains("482913"));
        assert!(content.text.contains("10 minutes"));
    }

    #[test]
    fn reset_email_contains_code() {
        let content = reset_email("004821");
        assert!(content.text.contains("004821"));
        assert!(content.html.contains("004821"));
        assert_eq!(content.subject, "Password Reset");
    }
}
