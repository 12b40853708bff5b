// Opportunity analysis prompt and model settings.
// The schema below is requested, not enforced; see `fields` for how drift is absorbed.

use crate::llm_client::ModelConfig;

/// Low temperature keeps repeated runs over the same post close to each other.
pub const MODEL_CONFIG: ModelConfig = ModelConfig {
    model: "gpt-4",
    temperature: 0.3,
    max_tokens: 2000,
};

pub const SYSTEM_MESSAGE: &str = "You are an expert at analyzing business opportunities \
from social media posts. Return only valid JSON.";

/// Rendered in place of a missing author profile URL.
pub const MISSING_AUTHOR_PLACEHOLDER: &str = "Not provided";

/// Replace `{author_profile_url}` and `{post_content}` before sending.
pub const USER_PROMPT_TEMPLATE: &str = r#"Analyze this LinkedIn post for business opportunity potential:

POST CONTENT: {post_content}
AUTHOR PROFILE: {author_profile_url}

Provide a comprehensive analysis in JSON format with these fields:

1. is_opportunity: boolean (true if this contains a business opportunity)
2. confidence: float 0-1 (confidence in opportunity detection)
3. extracted_fields: dict with confidence scores for:
   - title: brief opportunity title
   - summary: 1-2 sentence summary
   - problem: what problem needs solving
   - scope: project scope/requirements
   - skills_required: list of skills needed
4. company_suggestion: if company mentioned, null otherwise
   - name: string company name
   - confidence: float 0-1
   - domain: string website domain or null
   - linkedin_url: string company LinkedIn or null
5. contact_suggestion: if contact details found, null otherwise
   - name: string contact person name or null
   - email: string email or null
   - phone: string phone or null
   - linkedin_profile_url: string profile URL or null
   - confidence: float 0-1 (overall confidence)
6. category: classify as 'development', 'consulting', 'design', 'marketing', 'other'
7. urgency: 'urgent', 'normal', 'low'
8. tags: array of relevant skill/domain tags
9. budget_range: if mentioned (e.g. "$5k-10k", "negotiable")
10. timeline: if mentioned (e.g. "2 weeks", "ASAP", "Q1")

Each extracted_field should have: {"value": "extracted_value", "confidence": 0.85}
Use "Not mentioned" as the value when the post says nothing about a field.

Return only valid JSON."#;

/// Renders the user prompt for one post.
///
/// Empty content is rendered as-is; rejecting it is the caller's job.
pub fn build_prompt(post_content: &str, author_profile_url: Option<&str>) -> String {
    let author = author_profile_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(MISSING_AUTHOR_PLACEHOLDER);

    // Post content goes in last so its text is never scanned for placeholders.
    USER_PROMPT_TEMPLATE
        .replace("{author_profile_url}", author)
        .replace("{post_content}", post_content)
}
