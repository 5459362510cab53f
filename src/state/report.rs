//! Report-issue wizard.
//!
//! DESIGN
//! ======
//! A linear form: `Verify -> Details -> Review -> Submitted`. Each forward
//! transition validates the step it leaves; a failed check leaves the wizard
//! where it is and records an inline `error`. The page owns the network
//! calls and feeds their outcomes back through `city_verified` and
//! `submitted`.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use crate::net::api::{IssueReport, MAX_ISSUE_MEDIA};
use crate::net::error::AppError;
use crate::net::http::Upload;
use crate::net::types::{GeoPoint, IssueCategory};

pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const AADHAR_DIGITS: usize = 2;
pub const CITY_MISMATCH_MESSAGE: &str = "You can only report issues in your registered city.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportStep {
    #[default]
    Verify,
    Details,
    Review,
    Submitted,
}

impl ReportStep {
    pub fn title(self) -> &'static str {
        match self {
            Self::Verify => "Verify",
            Self::Details => "Details",
            Self::Review => "Review",
            Self::Submitted => "Submitted",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Verify => 0,
            Self::Details => 1,
            Self::Review => 2,
            Self::Submitted => 3,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ReportWizard {
    pub step: ReportStep,
    /// Registered city from the citizen profile.
    pub city: String,
    pub aadhar: String,
    pub category: Option<IssueCategory>,
    pub description: String,
    pub media: Vec<Upload>,
    pub location: Option<GeoPoint>,
    /// Inline message for the current step.
    pub error: Option<String>,
    pub busy: bool,
}

impl ReportWizard {
    pub fn new(city: &str) -> Self {
        Self {
            city: city.trim().to_owned(),
            ..Self::default()
        }
    }

    /// Normalized Aadhar digits ready for `POST /api/verify-city`.
    ///
    /// # Errors
    ///
    /// `AppError::Validation` unless the input is exactly two digits, or when
    /// no registered city is known.
    pub fn aadhar_for_verification(&self) -> Result<String, AppError> {
        let digits = self.aadhar.trim();
        if digits.len() != AADHAR_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::Validation(
                "Enter the last 2 digits of your Aadhar number.".to_owned(),
            ));
        }
        if self.city.is_empty() {
            return Err(AppError::Validation(
                "Your profile has no registered city.".to_owned(),
            ));
        }
        Ok(digits.to_owned())
    }

    /// Apply the city check result.
    pub fn city_verified(&mut self, valid: bool) {
        self.busy = false;
        if valid {
            self.error = None;
            self.step = ReportStep::Details;
        } else {
            self.error = Some(CITY_MISMATCH_MESSAGE.to_owned());
        }
    }

    /// Attach files up to the media limit; returns how many were dropped.
    pub fn add_media(&mut self, uploads: impl IntoIterator<Item = Upload>) -> usize {
        let mut dropped = 0;
        for upload in uploads {
            if self.media.len() < MAX_ISSUE_MEDIA {
                self.media.push(upload);
            } else {
                dropped += 1;
            }
        }
        dropped
    }

    pub fn remove_media(&mut self, index: usize) {
        if index < self.media.len() {
            self.media.remove(index);
        }
    }

    /// First problem with the details step, if any.
    pub fn details_error(&self) -> Option<String> {
        if self.category.is_none() {
            return Some("Select a category.".to_owned());
        }
        let length = self.description.trim().chars().count();
        if length == 0 {
            return Some("Describe the issue.".to_owned());
        }
        if length > MAX_DESCRIPTION_CHARS {
            return Some(format!(
                "Description must be at most {MAX_DESCRIPTION_CHARS} characters."
            ));
        }
        None
    }

    /// Move from Details to Review when the details are complete.
    pub fn advance_to_review(&mut self) -> bool {
        if self.step != ReportStep::Details {
            return false;
        }
        self.error = self.details_error();
        if self.error.is_none() {
            self.step = ReportStep::Review;
        }
        self.error.is_none()
    }

    pub fn back(&mut self) {
        self.error = None;
        self.step = match self.step {
            ReportStep::Review => ReportStep::Details,
            ReportStep::Details | ReportStep::Verify => ReportStep::Verify,
            ReportStep::Submitted => ReportStep::Submitted,
        };
    }

    /// Submission payload for the reviewed report.
    ///
    /// # Errors
    ///
    /// `AppError::Validation` when not on the review step or the details are
    /// incomplete.
    pub fn build_report(&self, user_id: Option<String>) -> Result<IssueReport, AppError> {
        if self.step != ReportStep::Review {
            return Err(AppError::Validation("Review the report before submitting.".to_owned()));
        }
        if let Some(problem) = self.details_error() {
            return Err(AppError::Validation(problem));
        }
        Ok(IssueReport {
            category: self.category.unwrap_or_default(),
            description: self.description.trim().to_owned(),
            city: self.city.clone(),
            user_id,
            location: self.location,
            media: self.media.clone(),
        })
    }

    pub fn submitted(&mut self) {
        self.busy = false;
        self.error = None;
        self.step = ReportStep::Submitted;
    }

    pub fn failed(&mut self, message: String) {
        self.busy = false;
        self.error = Some(message);
    }

    /// "Report another": back to Verify, keeping the registered city.
    pub fn reset(&mut self) {
        *self = Self::new(&self.city);
    }
}
