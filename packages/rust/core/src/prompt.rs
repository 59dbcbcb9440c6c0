//! Prompt construction for the generation service.
//!
//! Deterministic templates: the element's label and URI interpolated into a
//! fixed instruction block that names the required output sections. The
//! headings requested here are the same [`SectionSpec`] headings the
//! renderer expects back, so the sectionizer can recover them.

use docsmith_shared::{DocProfile, ElementDescriptor, SectionSpec};

/// Build the generation prompt for one element.
pub fn build_prompt(profile: DocProfile, descriptor: &ElementDescriptor) -> String {
    match profile {
        DocProfile::Element => element_prompt(descriptor),
        DocProfile::Ses => ses_prompt(descriptor),
    }
}

fn element_prompt(descriptor: &ElementDescriptor) -> String {
    format!(
        r#"Looking at the ISBD documentation PDF, please find and describe the ISBD element "{label}" ({uri}).

Please provide a well-structured response with the following sections, using proper Markdown headings:

## Element Reference
- The official ISBD definition of this element
- Domain and range information if applicable
- Element type information

## Additional Information
- The scope and purpose of the element
- User tasks supported by this element

## Element Values
- Specific rules or guidelines for using this element
- Value constraints or formats
- String encoding schemes if applicable

## Examples
Provide at least 3-5 practical examples showing how this element would be used in real bibliographic records. Use code blocks for the examples.

## Relationships
- Notes about relationships to other ISBD elements
- Super-types and sub-types if applicable
- Inverse relationships if any

## Stipulations
- Any special considerations, exceptions, or usage notes
- Best practices for applying this element

If this specific element is not found in the PDF, please indicate that clearly at the beginning of your response.
"#,
        label = descriptor.label,
        uri = descriptor.uri,
    )
}

fn ses_prompt(descriptor: &ElementDescriptor) -> String {
    // SES labels arrive as "has <name> encoding scheme"; the documentation
    // names the scheme itself.
    let search_label = descriptor
        .label
        .strip_prefix("has ")
        .or_else(|| descriptor.label.strip_prefix("Has "))
        .unwrap_or(&descriptor.label);

    format!(
        r#"Looking at the ISBD documentation PDF, please analyze the Syntax Encoding Scheme (SES) "{label}" ({uri}).

A Syntax Encoding Scheme (SES) in the context of Dublin Core and ISBD is a set of rules that specifies how a value must be structured or formatted. It determines the precise syntax or arrangement of metadata values, allowing for consistency and machine-readable interpretation.

Please provide a comprehensive analysis with the following sections:

## Definition
Provide the official ISBD definition of this SES and explain what type of values it encodes.

## Required Elements
List and describe all required elements or components that must be present in values using this SES. For example, if it's a date format, what date components are required?

## Punctuation Rules
Detail the specific punctuation marks, delimiters, or separators used in this SES. Include:
- What punctuation marks are used
- Where they must be placed
- Whether they are required or optional
- Any special spacing rules

## Relationship to ISBD Standards
Explain how this SES relates to and supports the broader ISBD standards. Which ISBD areas or elements typically use this SES?

## Relationship to Other SES
Identify any relationships to other Syntax Encoding Schemes within ISBD:
- Is this SES a subset or superset of another?
- Are there alternative SES that could be used for similar purposes?
- How does it interact with other encoding schemes?

## Examples
Provide at least 5 concrete examples showing proper use of this SES. Format as:
```
Example 1: [value]
Context: [explain what this represents]

Example 2: [value]
Context: [explain what this represents]
```

If this specific SES is not found in the PDF, please indicate that clearly at the beginning of your response.
"#,
        label = search_label,
        uri = descriptor.uri,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requested_headings(prompt: &str, sections: &[SectionSpec]) -> bool {
        sections
            .iter()
            .all(|spec| prompt.contains(&format!("## {}", spec.heading)))
    }

    #[test]
    fn element_prompt_interpolates_label_and_uri() {
        let descriptor = ElementDescriptor::new(
            "http://iflastandards.info/ns/isbd/elements/P1004",
            "has title proper",
        );
        let prompt = build_prompt(DocProfile::Element, &descriptor);
        assert!(prompt.contains(r#""has title proper""#));
        assert!(prompt.contains("http://iflastandards.info/ns/isbd/elements/P1004"));
    }

    #[test]
    fn element_prompt_requests_every_rendered_section() {
        let descriptor = ElementDescriptor::new("http://example.org/E1", "has extent");
        let prompt = build_prompt(DocProfile::Element, &descriptor);
        assert!(requested_headings(
            &prompt,
            DocProfile::Element.sections()
        ));
    }

    #[test]
    fn ses_prompt_requests_every_rendered_section() {
        let descriptor = ElementDescriptor::new("http://example.org/C1", "has date SES");
        let prompt = build_prompt(DocProfile::Ses, &descriptor);
        assert!(requested_headings(&prompt, DocProfile::Ses.sections()));
    }

    #[test]
    fn ses_prompt_strips_leading_has() {
        let descriptor = ElementDescriptor::new(
            "http://example.org/C1",
            "has compound title of title proper",
        );
        let prompt = build_prompt(DocProfile::Ses, &descriptor);
        assert!(prompt.contains(r#""compound title of title proper""#));
        assert!(!prompt.contains(r#""has compound title"#));
    }

    #[test]
    fn prompt_is_deterministic() {
        let descriptor = ElementDescriptor::new("http://example.org/E1", "has extent");
        assert_eq!(
            build_prompt(DocProfile::Element, &descriptor),
            build_prompt(DocProfile::Element, &descriptor)
        );
    }
}
