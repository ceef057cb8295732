//! Raw form submissions, as they arrive from the browser.
//!
//! Every field is optional at this point so that a missing field becomes a validation error with a useful message,
//! rather than a deserialization failure.
use asta_common::helpers::non_blank;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CheckoutError, InquiryFlowError};
use crate::db_types::{NewInquiry, RegistrantInfo, Rupees};

pub const REGISTRATION_FIELDS_REQUIRED: &str = "All fields are required";
pub const INQUIRY_FIELDS_REQUIRED: &str = "Name, email, subject, and message are required";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub course: Option<String>,
    /// A number or a numeric string, in rupees.
    pub amount: Option<Value>,
}

impl RegistrationForm {
    /// Checks that every field is present and that the amount is a positive number of rupees.
    ///
    /// An amount of zero counts as missing.
    pub fn validate(self) -> Result<RegistrantInfo, CheckoutError> {
        let missing = || CheckoutError::ValidationError(REGISTRATION_FIELDS_REQUIRED.to_string());
        let name = non_blank(self.name.as_deref()).ok_or_else(missing)?;
        let email = non_blank(self.email.as_deref()).ok_or_else(missing)?;
        let phone = non_blank(self.phone.as_deref()).ok_or_else(missing)?;
        let course = non_blank(self.course.as_deref()).ok_or_else(missing)?;
        let amount = parse_amount(self.amount.as_ref())?;
        Ok(RegistrantInfo {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            course: course.to_string(),
            amount,
        })
    }
}

fn parse_amount(value: Option<&Value>) -> Result<Rupees, CheckoutError> {
    let missing = || CheckoutError::ValidationError(REGISTRATION_FIELDS_REQUIRED.to_string());
    let invalid = || CheckoutError::ValidationError("Amount must be a positive number".to_string());
    let rupees = match value {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(invalid)?,
        Some(Value::String(s)) => match non_blank(Some(s.as_str())) {
            Some(s) => s.parse::<f64>().map_err(|_| invalid())?,
            None => return Err(missing()),
        },
        Some(Value::Null) | None => return Err(missing()),
        Some(_) => return Err(invalid()),
    };
    if rupees == 0.0 {
        return Err(missing());
    }
    let amount = Rupees::try_from(rupees).map_err(|_| invalid())?;
    if amount.is_positive() {
        Ok(amount)
    } else {
        Err(invalid())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InquiryForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl InquiryForm {
    /// Name, email, subject and message are required. A blank phone number is stored as no phone number.
    pub fn validate(self) -> Result<NewInquiry, InquiryFlowError> {
        let missing = || InquiryFlowError::ValidationError(INQUIRY_FIELDS_REQUIRED.to_string());
        Ok(NewInquiry {
            name: non_blank(self.name.as_deref()).ok_or_else(missing)?.to_string(),
            email: non_blank(self.email.as_deref()).ok_or_else(missing)?.to_string(),
            phone: non_blank(self.phone.as_deref()).map(String::from),
            subject: non_blank(self.subject.as_deref()).ok_or_else(missing)?.to_string(),
            message: non_blank(self.message.as_deref()).ok_or_else(missing)?.to_string(),
        })
    }
}
