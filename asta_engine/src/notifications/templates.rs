use super::EmailMessage;
use crate::{
    db_types::{Inquiry, InquiryKind, Registration},
    ledger::LEDGER_DATE_FORMAT,
};

const CONTAINER_STYLE: &str =
    "font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #ddd; \
     border-radius: 5px;";
const PANEL_STYLE: &str = "background-color: #f9f9f9; padding: 15px; border-radius: 5px; margin: 15px 0;";
const HEADING_STYLE: &str = "color: #4b0082; text-align: center;";

/// Escapes text for inclusion in HTML element content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Renders the three notification emails the academy sends.
#[derive(Debug, Clone)]
pub struct EmailTemplates {
    academy_name: String,
    academy_email: String,
}

impl EmailTemplates {
    pub fn new<S: Into<String>>(academy_name: S, academy_email: S) -> Self {
        Self { academy_name: academy_name.into(), academy_email: academy_email.into() }
    }

    /// Sent to the registrant, with a blind copy to the academy mailbox.
    pub fn registration_confirmation(&self, registration: &Registration) -> EmailMessage {
        let academy = escape_html(&self.academy_name);
        let date = registration.registration_date.format(LEDGER_DATE_FORMAT).to_string();
        let payment_id = registration.payment_id.as_deref().unwrap_or("N/A");
        let html = format!(
            r#"<div style="{CONTAINER_STYLE}">
  <h2 style="{HEADING_STYLE}">Registration Confirmation</h2>
  <p>Dear {name},</p>
  <p>Thank you for registering with {academy}. Your payment has been successfully processed.</p>
  <div style="{PANEL_STYLE}">
    <h3 style="margin-top: 0; color: #4b0082;">Registration Details:</h3>
    <p><strong>Course:</strong> {course}</p>
    <p><strong>Amount Paid:</strong> ₹{amount}</p>
    <p><strong>Payment ID:</strong> {payment_id}</p>
    <p><strong>Registration Date:</strong> {date}</p>
  </div>
  <p>We look forward to providing you with a great learning experience.</p>
  <p>If you have any questions, please don't hesitate to contact us.</p>
  <p>Best regards,<br>{academy} Team</p>
</div>"#,
            name = escape_html(&registration.name),
            course = escape_html(&registration.course),
            amount = registration.amount,
            payment_id = escape_html(payment_id),
        );
        EmailMessage {
            to: registration.email.clone(),
            bcc: Some(self.academy_email.clone()),
            subject: format!("Course Registration Confirmation - {}", self.academy_name),
            html,
        }
    }

    /// Sent to the academy mailbox only.
    pub fn inquiry_notification(&self, kind: InquiryKind, inquiry: &Inquiry) -> EmailMessage {
        let title = match kind {
            InquiryKind::Contact => "New Contact Form Submission",
            InquiryKind::About => "New About Page Inquiry",
        };
        let phone = match kind {
            InquiryKind::Contact => {
                let phone = inquiry.phone.as_deref().unwrap_or("Not provided");
                format!("\n    <p><strong>Phone:</strong> {}</p>", escape_html(phone))
            },
            InquiryKind::About => String::new(),
        };
        let date = inquiry.submission_date.format(LEDGER_DATE_FORMAT).to_string();
        let html = format!(
            r#"<div style="{CONTAINER_STYLE}">
  <h2 style="{HEADING_STYLE}">{title}</h2>
  <div style="{PANEL_STYLE}">
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>{phone}
    <p><strong>Subject:</strong> {subject}</p>
    <p><strong>Message:</strong> {message}</p>
    <p><strong>Submission Date:</strong> {date}</p>
  </div>
</div>"#,
            name = escape_html(&inquiry.name),
            email = escape_html(&inquiry.email),
            subject = escape_html(&inquiry.subject),
            message = escape_html(&inquiry.message),
        );
        EmailMessage {
            to: self.academy_email.clone(),
            bcc: None,
            subject: format!("{title}: {}", inquiry.subject),
            html,
        }
    }
}
