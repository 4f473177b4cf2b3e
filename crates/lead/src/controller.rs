use crate::{
    Certification, FieldErrors, FieldSpec, LeadDraft, LeadError, LeadFormType, Product, Schema,
    StatusEvent, SubmissionStatus, Field, registry,
};

/// State of one mounted lead form: the active type, its draft, field errors
/// and the submission status.
#[derive(Debug, Clone)]
pub struct FormController {
    draft: LeadDraft,
    errors: FieldErrors,
    status: SubmissionStatus,
    preselected_product: Option<Product>,
}

impl FormController {
    pub fn new(form_type: LeadFormType, preselected_product: Option<Product>) -> Self {
        Self {
            draft: LeadDraft::new(form_type, preselected_product),
            errors: FieldErrors::default(),
            status: SubmissionStatus::Idle,
            preselected_product,
        }
    }

    /// Opens the form matching a URL subject, `quote` when the subject is not
    /// recognised.
    pub fn from_subject(subject: &str, preselected_product: Option<Product>) -> Self {
        let form_type = LeadFormType::from_subject(subject).unwrap_or_else(|| {
            tracing::debug!(subject, "unknown lead subject, opening the quote form");
            LeadFormType::default()
        });
        Self::new(form_type, preselected_product)
    }

    pub fn form_type(&self) -> LeadFormType {
        self.draft.form_type()
    }

    /// Starts a clean draft of `form_type`. Only the preselected product
    /// survives; errors and any pending status are dropped.
    pub fn switch_type(&mut self, form_type: LeadFormType) {
        self.draft = LeadDraft::new(form_type, self.preselected_product);
        self.errors.clear();
        self.status = SubmissionStatus::Idle;
    }

    pub fn current_schema(&self) -> Schema {
        Schema::of(self.form_type())
    }

    pub fn current_fields(&self) -> &'static [FieldSpec] {
        self.current_schema().fields()
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        self.draft.get(field)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), LeadError> {
        if self.status.is_submitting() {
            return Err(LeadError::Busy);
        }
        self.draft.set(field, value)?;
        self.errors.remove(field);
        Ok(())
    }

    pub fn toggle_certification(&mut self, certification: Certification) -> Result<(), LeadError> {
        let current = self
            .draft
            .get(Field::Certifications)
            .ok_or(LeadError::FieldNotInForm {
                field: Field::Certifications,
                form_type: self.form_type(),
            })?;
        let toggled = registry::toggle_joined(current, certification.as_ref());
        self.set(Field::Certifications, toggled)
    }

    /// Selected certifications split back out of the joined value.
    pub fn certifications(&self) -> Vec<Certification> {
        self.draft
            .certifications()
            .into_iter()
            .filter_map(|value| value.parse().ok())
            .collect()
    }

    pub fn draft(&self) -> &LeadDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn preselected_product(&self) -> Option<Product> {
        self.preselected_product
    }

    /// "Send another" after a success, or dismissing an error banner.
    pub fn reset(&mut self) -> Result<(), LeadError> {
        self.status.apply(StatusEvent::Reset)
    }

    pub(crate) fn reject(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub(crate) fn begin(&mut self) {
        self.errors.clear();
        self.transition(StatusEvent::Begin);
    }

    pub(crate) fn succeed(&mut self) {
        self.draft = LeadDraft::new(self.form_type(), self.preselected_product);
        self.transition(StatusEvent::Succeed);
    }

    pub(crate) fn fail(&mut self) {
        self.transition(StatusEvent::Fail);
    }

    fn transition(&mut self, event: StatusEvent) {
        if let Err(e) = self.status.apply(event) {
            debug_assert!(false, "{e}");
            tracing::error!(error = %e, "submission status out of sync");
            self.status = SubmissionStatus::Error;
        }
    }
}
