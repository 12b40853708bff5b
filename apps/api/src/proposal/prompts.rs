// Proposal prompt and model settings.

use crate::llm_client::ModelConfig;

/// Warmer than opportunity analysis; proposals are prose, not structured data.
pub const MODEL_CONFIG: ModelConfig = ModelConfig {
    model: "gpt-4-turbo-preview",
    temperature: 0.7,
    max_tokens: 2000,
};

pub const SYSTEM_MESSAGE: &str =
    "You are an expert proposal writer for freelancers and agencies.";

/// Rendered for any prompt input the caller did not supply.
pub const EMPTY_INPUT_PLACEHOLDER: &str = "None";

/// Replace `{title}`, `{summary}`, `{tags}` and `{additional_context}` before sending.
pub const USER_PROMPT_TEMPLATE: &str = r#"Generate a professional proposal for the following opportunity:

Title: {title}
Summary: {summary}
Tags: {tags}

Additional context: {additional_context}

Create a comprehensive proposal with the following sections:
1. Executive Summary
2. Understanding of Requirements
3. Proposed Solution
4. Timeline and Milestones
5. Investment
6. Why Choose Us
7. Next Steps

Make it professional, concise, and compelling."#;
