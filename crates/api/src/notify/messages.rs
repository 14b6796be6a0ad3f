//! Subject and body builders for notification emails.
//!
//! Everything is plain text. Builders take the already-persisted row data so
//! the email content always matches what was stored.

/// Admin notification for a new contact inquiry.
pub fn contact_received(name: &str, email: &str, subject: &str, message: &str) -> (String, String) {
    (
        format!("New contact inquiry: {subject}"),
        format!(
            "A new contact inquiry was submitted.\n\n\
             From: {name} <{email}>\n\
             Subject: {subject}\n\n\
             {message}\n"
        ),
    )
}

/// Confirmation sent to a job applicant.
pub fn application_confirmation(first_name: &str, position_title: &str) -> (String, String) {
    (
        format!("Application received: {position_title}"),
        format!(
            "Hi {first_name},\n\n\
             Thank you for applying for the {position_title} position. \
             We have received your application and will review it shortly. \
             If your profile matches what we are looking for, we will reach \
             out to schedule next steps.\n\n\
             Best regards,\n\
             The Hiring Team\n"
        ),
    )
}

/// Admin notification for a new job application.
pub fn application_received(
    applicant_name: &str,
    applicant_email: &str,
    position_title: &str,
) -> (String, String) {
    (
        format!("New application for {position_title}"),
        format!(
            "A new application was submitted for {position_title}.\n\n\
             Applicant: {applicant_name} <{applicant_email}>\n\n\
             Review it in the admin dashboard.\n"
        ),
    )
}

/// Confirmation sent to a testimonial submitter.
pub fn testimonial_confirmation(name: &str) -> (String, String) {
    (
        "Thank you for your testimonial".to_string(),
        format!(
            "Hi {name},\n\n\
             Thank you for sharing your experience with us. Your testimonial \
             has been received and will appear on our site once it has been \
             reviewed.\n\n\
             Best regards,\n\
             The Team\n"
        ),
    )
}

/// Admin notification for a new testimonial submission.
pub fn testimonial_received(name: &str, email: &str) -> (String, String) {
    (
        format!("New testimonial submission from {name}"),
        format!(
            "A new testimonial was submitted and is awaiting review.\n\n\
             From: {name} <{email}>\n"
        ),
    )
}

/// Welcome email for a new newsletter subscriber.
pub fn newsletter_welcome(site_url: &str) -> (String, String) {
    (
        "Welcome to our newsletter".to_string(),
        format!(
            "Thanks for subscribing!\n\n\
             You will now receive occasional updates about new articles, \
             products, and courses. Visit us any time at {site_url}.\n\n\
             You can unsubscribe whenever you like from the site.\n"
        ),
    )
}

/// Confirmation that a newsletter unsubscribe was processed.
pub fn newsletter_unsubscribed() -> (String, String) {
    (
        "You have been unsubscribed".to_string(),
        "You have been unsubscribed from our newsletter and will not \
         receive further emails from us.\n\n\
         If this was a mistake, you can subscribe again at any time.\n"
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_email_includes_sender_details() {
        let (subject, body) = contact_received("Ada", "ada@example.com", "Pricing", "How much?");
        assert_eq!(subject, "New contact inquiry: Pricing");
        assert!(body.contains("Ada <ada@example.com>"));
        assert!(body.contains("How much?"));
    }

    #[test]
    fn application_confirmation_addresses_applicant() {
        let (subject, body) = application_confirmation("Grace", "Backend Engineer");
        assert!(subject.contains("Backend Engineer"));
        assert!(body.starts_with("Hi Grace,"));
    }

    #[test]
    fn newsletter_welcome_links_site() {
        let (_, body) = newsletter_welcome("https://example.com");
        assert!(body.contains("https://example.com"));
    }
}
