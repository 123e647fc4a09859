use serde::Deserialize;

use ezra_common::EzraError;

/// Collaborate form as posted. Checkboxes are absent when unchecked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub organization: String,
    pub message: String,
    pub confidential: Option<String>,
}

/// A validated inquiry. Nothing is stored or sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactInquiry {
    pub name: String,
    pub email: String,
    pub organization: Option<String>,
    pub message: String,
    pub confidential: bool,
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

impl ContactForm {
    pub fn is_confidential(&self) -> bool {
        self.confidential.is_some()
    }

    pub fn validate(&self) -> Result<ContactInquiry, EzraError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        let mut problems = Vec::new();
        if name.is_empty() {
            problems.push("name is required");
        }
        if email.is_empty() {
            problems.push("email is required");
        } else if !is_plausible_email(email) {
            problems.push("email must look like name@example.com");
        }
        if message.is_empty() {
            problems.push("message is required");
        }
        if !problems.is_empty() {
            return Err(EzraError::Validation(problems.join("; ")));
        }

        let organization = self.organization.trim();
        Ok(ContactInquiry {
            name: name.to_string(),
            email: email.to_string(),
            organization: (!organization.is_empty()).then(|| organization.to_string()),
            message: message.to_string(),
            confidential: self.is_confidential(),
        })
    }
}
