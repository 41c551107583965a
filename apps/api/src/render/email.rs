//! HTML email summary of a guide. Mirrors the PDF section order; user and
//! model text is escaped before interpolation.

use crate::models::guide::GuideDocument;

/// Builds the HTML body sent alongside the PDF attachment.
pub fn build_email_html(doc: &GuideDocument, name: &str) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str("<html><body style=\"font-family: Helvetica, Arial, sans-serif; color: #1f2937;\">");
    html.push_str(&format!(
        "<h1>Your Personalized Networking Guide, {}</h1>",
        escape(name)
    ));
    html.push_str(&format!("<p>{}</p>", escape(&doc.greeting)));

    html.push_str("<h2>Your Key Strengths</h2><ul>");
    for strength in &doc.key_strengths {
        html.push_str(&format!("<li>{}</li>", escape(strength)));
    }
    html.push_str("</ul>");

    html.push_str("<h2>Areas to Focus On</h2><ul>");
    for area in &doc.areas_to_focus {
        html.push_str(&format!("<li>{}</li>", escape(area)));
    }
    html.push_str("</ul>");

    html.push_str("<h2>Actionable Steps</h2><ol>");
    for step in &doc.actionable_steps {
        html.push_str(&format!(
            "<li><strong>{}</strong><br>{}</li>",
            escape(&step.title),
            escape(&step.description)
        ));
    }
    html.push_str("</ol>");

    html.push_str("<h2>Conversation Starters</h2><ul>");
    for starter in &doc.conversation_starters {
        html.push_str(&format!("<li>{}</li>", escape(starter)));
    }
    html.push_str("</ul>");

    html.push_str(&format!("<p><em>{}</em></p>", escape(&doc.closing_remark)));
    html.push_str("</body></html>");

    html
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::guide::test_fixtures::sample_document;

    #[test]
    fn email_contains_every_section_in_order() {
        let doc = sample_document();
        let html = build_email_html(&doc, "Ada");
        let strengths_at = html.find("Your Key Strengths").unwrap();
        let focus_at = html.find("Areas to Focus On").unwrap();
        let steps_at = html.find("Actionable Steps").unwrap();
        let starters_at = html.find("Conversation Starters").unwrap();
        assert!(strengths_at < focus_at && focus_at < steps_at && steps_at < starters_at);
        for strength in &doc.key_strengths {
            assert!(html.contains(strength.as_str()));
        }
    }

    #[test]
    fn markup_in_user_text_is_escaped() {
        let mut doc = sample_document();
        doc.greeting = "<script>alert('hi')</script>".to_string();
        let html = build_email_html(&doc, "A & B");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A &amp; B"));
    }
}
