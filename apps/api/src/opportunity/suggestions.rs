//! Company and contact suggestions built from the model's nested objects.

use serde_json::Value;

use crate::opportunity::fields::normalize_field;
use crate::opportunity::models::{CompanySuggestion, ContactSuggestion};

/// Builds a company suggestion only when a usable name is present.
/// Domain or LinkedIn URL alone never produce a nameless suggestion.
pub fn build_company_suggestion(raw: Option<&Value>) -> Option<CompanySuggestion> {
    let company = raw?.as_object()?;

    let name = normalize_field(company.get("name"));
    let name_text = name.text()?;

    Some(CompanySuggestion {
        name: name_text,
        confidence: name.confidence,
        domain: normalize_field(company.get("domain")).text(),
        linkedin_url: normalize_field(company.get("linkedin_url")).text(),
    })
}

/// Builds a contact suggestion whenever the model returned a contact object,
/// even an empty one. Confidence is the strongest single field signal.
pub fn build_contact_suggestion(raw: Option<&Value>) -> Option<ContactSuggestion> {
    let contact = raw?.as_object()?;

    let name = normalize_field(contact.get("name"));
    let email = normalize_field(contact.get("email"));
    let phone = normalize_field(contact.get("phone"));
    let profile = normalize_field(contact.get("linkedin_profile_url"));

    let confidence = [&name, &email, &phone, &profile]
        .iter()
        .map(|f| f.confidence)
        .fold(0.0, f64::max);

    Some(ContactSuggestion {
        name: name.text(),
        email: email.text(),
        phone: phone.text(),
        linkedin_profile_url: profile.text(),
        confidence,
    })
}
