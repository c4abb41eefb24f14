//! Builds the user message sent alongside the system prompt.

use serde::Deserialize;

use crate::generation::contact::extract_contact_info;
use crate::generation::prompts::DEFAULT_RESUME_TEMPLATE;

/// Which section the resume leads with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Experience,
    Projects,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Experience => "experience",
            Priority::Projects => "projects",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Priority::Experience => "Experience",
            Priority::Projects => "Projects",
        }
    }

    fn section_order(self) -> &'static str {
        match self {
            Priority::Experience => "Experience → Projects → Skills → Education",
            Priority::Projects => "Projects → Experience → Skills → Education",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptInputs<'a> {
    pub github_username: &'a str,
    pub readme: &'a str,
    pub additional_info: &'a str,
    pub priority: Priority,
    /// Reference structure; the built-in template when `None`.
    pub template: Option<&'a str>,
}

pub fn build_user_prompt(inputs: &PromptInputs<'_>) -> String {
    let mut contact = extract_contact_info(&format!("{} {}", inputs.additional_info, inputs.readme));
    let username = inputs.github_username.trim();
    if !username.is_empty() {
        contact.github = Some(username.to_string());
    }

    let mut prompt = format!(
        "Format this information into a one-page, ATS-friendly resume in markdown.\n\n\
         PRIORITY: {} first\n\n\
         AVAILABLE INFORMATION:\n",
        inputs.priority.title()
    );

    if let Some(github) = &contact.github {
        prompt.push_str(&format!("\nGitHub Username: {github}"));
    }
    if let Some(email) = &contact.email {
        prompt.push_str(&format!("\nEmail: {email}"));
    }
    if let Some(phone) = &contact.phone {
        prompt.push_str(&format!("\nPhone: {phone}"));
    }
    if let Some(linkedin) = &contact.linkedin {
        prompt.push_str(&format!("\nLinkedIn: {linkedin}"));
    }

    prompt.push_str("\n\n--- GitHub Profile Content ---\n");
    prompt.push_str(or_placeholder(
        inputs.readme,
        "(No GitHub profile content available)",
    ));

    prompt.push_str("\n\n--- Additional User Information ---\n");
    prompt.push_str(or_placeholder(
        inputs.additional_info,
        "(No additional information provided)",
    ));

    let template = inputs
        .template
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_RESUME_TEMPLATE);

    prompt.push_str(&format!(
        "\n\n--- End of Information ---\n\n\
         FORMAT INSTRUCTIONS:\n\
         1. Use this structure as reference:\n\
         {template}\n\n\
         2. Section priority based on \"{priority}\":\n   \
         {order}\n\n\
         3. Contact line format (use | separator):\n   \
         email | phone | location | LinkedIn: username | GitHub: username\n   \
         (If any field is missing, omit it entirely)\n\n\
         4. Use ONLY these markdown elements:\n   \
         - # for name (only at top)\n   \
         - ## for section headers\n   \
         - **bold** for job titles, companies, project names\n   \
         - - for bullet points\n   \
         - | for inline separators\n\n\
         5. NO HTML, NO icons, NO special formatting\n\n\
         6. Maximum 35 lines of content - be selective\n\n\
         7. Copy exact details from the information above - no generic filler\n\n\
         Generate the resume now:",
        priority = inputs.priority.as_str(),
        order = inputs.priority.section_order(),
    ));

    prompt
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.trim().is_empty() {
        placeholder
    } else {
        text
    }
}
