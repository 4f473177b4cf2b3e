use agrolead_lead::{FieldView, FormController, LeadFormType, Locale};
use anyhow::Result;

/// Field layout of `form_type`, as the fields endpoint returns it.
pub fn layout(form_type: LeadFormType, locale: Locale) -> Vec<FieldView> {
    FormController::new(form_type, None).views(locale)
}

pub fn print(form_type: LeadFormType, locale: Locale) -> Result<()> {
    let views = layout(form_type, locale);
    println!("{}", serde_json::to_string_pretty(&views)?);

    Ok(())
}
