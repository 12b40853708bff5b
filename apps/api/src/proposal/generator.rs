//! Proposal generation: prompt → completion → markdown sections.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::llm_client::{CompletionClient, LlmError};
use crate::models::opportunity::OpportunityRow;
use crate::proposal::prompts::{
    EMPTY_INPUT_PLACEHOLDER, MODEL_CONFIG, SYSTEM_MESSAGE, USER_PROMPT_TEMPLATE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalSection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedProposal {
    pub proposal_content: String,
    pub suggested_sections: Vec<ProposalSection>,
}

fn or_placeholder(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(EMPTY_INPUT_PLACEHOLDER)
}

pub fn build_proposal_prompt(opportunity: &OpportunityRow, additional_context: Option<&str>) -> String {
    let tags = opportunity.tag_list().join(", ");

    render_template(
        USER_PROMPT_TEMPLATE,
        &[
            ("title", opportunity.title.as_str()),
            ("summary", or_placeholder(opportunity.summary.as_deref())),
            ("tags", or_placeholder(Some(tags.as_str()))),
            ("additional_context", or_placeholder(additional_context)),
        ],
    )
}

/// Fills `{name}` slots in one pass over the template. Substituted text is
/// never scanned again, so braces inside user data come through verbatim.
/// Unknown slots are left as written.
fn render_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let filled = after.find('}').and_then(|close| {
            let name = &after[..close];
            slots
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| (*value, close))
        });
        match filled {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Splits markdown on heading lines (`#`, `##`, `###`, ...).
///
/// Text before the first heading is dropped. A heading with no title text
/// closes the current section without opening a new one.
pub fn parse_proposal_sections(content: &str) -> Vec<ProposalSection> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            if let Some((title, body)) = current.take() {
                sections.push(section(title, &body));
            }
            let title = trimmed.trim_start_matches('#').trim();
            if !title.is_empty() {
                current = Some((title.to_string(), Vec::new()));
            }
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some((title, body)) = current {
        sections.push(section(title, &body));
    }
    sections
}

fn section(title: String, body: &[&str]) -> ProposalSection {
    ProposalSection {
        title,
        content: body.join("\n").trim().to_string(),
    }
}

pub async fn generate_proposal(
    llm: &Arc<dyn CompletionClient>,
    opportunity: &OpportunityRow,
    additional_context: Option<&str>,
) -> Result<GeneratedProposal, LlmError> {
    let prompt = build_proposal_prompt(opportunity, additional_context);
    let proposal_content = llm.complete(SYSTEM_MESSAGE, &prompt, &MODEL_CONFIG).await?;
    let suggested_sections = parse_proposal_sections(&proposal_content);

    info!(
        "Proposal drafted for opportunity {}: {} sections",
        opportunity.id,
        suggested_sections.len()
    );
    Ok(GeneratedProposal {
        proposal_content,
        suggested_sections,
    })
}
