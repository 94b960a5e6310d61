//! Embed codes and integration snippets.

use std::fmt::Write;

use html_escape::encode_double_quoted_attribute;
use wpcf_shortcode::field_names;
use wpcf_storage::FormDefinition;

use crate::route::share_url;

/// Iframe code embedding the preview of `form` hosted at `base_url`.
#[must_use]
pub fn iframe_embed(base_url: &str, form: &FormDefinition) -> String {
    let src = share_url(base_url, &form.id);
    format!(
        r#"<iframe src="{}" width="100%" height="600" frameborder="0" title="{}"></iframe>"#,
        encode_double_quoted_attribute(&src),
        encode_double_quoted_attribute(&form.title)
    )
}

/// Posted field names across all steps, unique, in first-appearance order.
#[must_use]
pub fn form_field_names(form: &FormDefinition) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for step in &form.steps {
        for name in field_names(&step.content) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// PHP hook that copies each submission of `form` into a custom table.
///
/// One `'column' => $data['field']` row is emitted per posted field; column
/// names replace `-` with `_`.
#[must_use]
pub fn db_insert_snippet(form: &FormDefinition) -> String {
    let rows: Vec<String> = form_field_names(form)
        .iter()
        .map(|name| format!("'{}' => $data['{name}']", name.replace('-', "_")))
        .collect();

    let mut php = String::new();
    php.push_str("add_action('wpcf7_before_send_mail', function ($contact_form) {\n");
    php.push_str("    $submission = WPCF7_Submission::get_instance();\n");
    php.push_str("    if ($submission) {\n");
    php.push_str("        $form_id = $contact_form->id();\n");
    let _ = writeln!(
        php,
        "        if ($form_id == '{}') {{",
        php_single_quoted(&form.id)
    );
    php.push_str("            global $wpdb;\n");
    php.push_str("            // Replace your_custom_table with the target table name\n");
    php.push_str("            $table_name = $wpdb->prefix . 'your_custom_table';\n\n");
    php.push_str("            $data = $submission->get_posted_data();\n\n");
    php.push_str("            $wpdb->insert($table_name, array(\n");
    if !rows.is_empty() {
        let _ = writeln!(php, "                {}", rows.join(",\n                "));
    }
    php.push_str("            ));\n");
    php.push_str("        }\n");
    php.push_str("    }\n");
    php.push_str("});\n");
    php
}

/// Escape text for a PHP single-quoted string literal.
fn php_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use wpcf_storage::Step;

    use super::*;

    fn form() -> FormDefinition {
        let mut form = FormDefinition::blank("15cbc5d", "Contact form 1", Utc::now());
        form.steps = vec![
            Step::new(1, "[text* your-name]\n[email* your-email]"),
            Step::new(2, "[text your-name]\n[radio sex \"M\" \"F\"]\n[submit \"Send\"]"),
        ];
        form
    }

    #[test]
    fn test_iframe_embed() {
        assert_eq!(
            iframe_embed("https://example.com/builder/", &form()),
            r#"<iframe src="https://example.com/builder/#preview/15cbc5d" width="100%" height="600" frameborder="0" title="Contact form 1"></iframe>"#
        );
    }

    #[test]
    fn test_iframe_embed_escapes_title() {
        let mut form = form();
        form.title = r#"Say "hi""#.to_owned();
        let code = iframe_embed("https://example.com/", &form);
        assert!(code.contains(r#"title="Say &quot;hi&quot;""#));
    }

    #[test]
    fn test_form_field_names_unique_across_steps() {
        assert_eq!(form_field_names(&form()), vec!["your-name", "your-email", "sex"]);
    }

    #[test]
    fn test_db_insert_snippet() {
        let php = db_insert_snippet(&form());
        assert!(php.starts_with("add_action('wpcf7_before_send_mail'"));
        assert!(php.contains("if ($form_id == '15cbc5d') {"));
        assert!(php.contains(
            "                'your_name' => $data['your-name'],\n                'your_email' => $data['your-email'],\n                'sex' => $data['sex']\n            ));"
        ));
    }

    #[test]
    fn test_db_insert_snippet_without_fields() {
        let form = FormDefinition::blank("abc", "Empty", Utc::now());
        let php = db_insert_snippet(&form);
        assert!(php.contains("array(\n            ));"));
    }

    #[test]
    fn test_php_single_quoted() {
        assert_eq!(php_single_quoted(r"a'b\c"), r"a\'b\\c");
    }
}
