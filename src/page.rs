use crate::language::{list_languages, Language};

const STYLE: &str = r#"
body {
    background-image: url("/static/bg.jpg");
    background-size: cover;
    background-repeat: no-repeat;
    background-attachment: fixed;
    background-position: center;
    font-family: 'Helvetica', sans-serif;
    max-width: 720px;
    margin: 0 auto;
    padding: 2rem 1rem;
}
.title {
    color: #4CAF50;
    text-align: center;
}
.columns {
    display: flex;
    gap: 1rem;
}
.columns label {
    flex: 1;
}
select, textarea {
    width: 100%;
    box-sizing: border-box;
}
textarea {
    color: black;
    background-color: #FFFFFF;
    border: 2px solid #4CAF50;
    height: 150px;
}
button {
    color: white;
    background-color: #4CAF50;
    border: none;
    border-radius: 12px;
    padding: 10px 24px;
    margin-top: 0.5rem;
    cursor: pointer;
}
.notice {
    padding: 10px;
    border-radius: 8px;
    margin: 1rem 0;
}
.notice.error { background-color: #FDECEA; color: #B71C1C; }
.notice.warning { background-color: #FFF8E1; color: #8D6E00; }
.notice.success { background-color: #E8F5E9; color: #1B5E20; }
.translated-text {
    border: 2px solid #4CAF50;
    padding: 10px;
    border-radius: 10px;
    color: black;
    background-color: #E8F5E9;
    white-space: pre-wrap;
}
.footer {
    text-align: center;
}
"#;

/// What the result region shows after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Error(String),
    Warning(String),
    Success { target: Language, text: String },
}

#[derive(Debug, Clone)]
pub struct PageView {
    pub source: Language,
    pub target: Language,
    pub text: String,
    pub outcome: Option<Outcome>,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            source: Language::English,
            target: Language::French,
            text: String::new(),
            outcome: None,
        }
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_select(out: &mut String, name: &str, label: &str, selected: Language) {
    out.push_str(&format!("<label>{}<select name=\"{}\">", label, name));
    for entry in list_languages() {
        let marker = if entry.display_name == selected.display_name() {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>",
            entry.display_name, marker
        ));
    }
    out.push_str("</select></label>");
}

fn render_outcome(out: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::Error(message) => {
            out.push_str(&format!(
                "<div class=\"notice error\">&#9888;&#65039; {}</div>",
                escape_html(message)
            ));
        }
        Outcome::Warning(message) => {
            out.push_str(&format!(
                "<div class=\"notice warning\">&#9888;&#65039; {}</div>",
                escape_html(message)
            ));
        }
        Outcome::Success { target, text } => {
            out.push_str(&format!(
                "<div class=\"notice success\"><strong>Translated Text ({}):</strong></div>\
                 <div class=\"translated-text\">{}</div>",
                target.display_name(),
                escape_html(text)
            ));
        }
    }
}

/// Render the whole translator page.
pub fn render_page(view: &PageView) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    out.push_str("<title>Language Translator</title>");
    out.push_str("<link rel=\"icon\" href=\"data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>&#127760;</text></svg>\">");
    out.push_str(&format!("<style>{}</style></head><body>", STYLE));

    out.push_str("<h1 class=\"title\">&#127757; Language Translator</h1>");
    out.push_str("<p>Translate text between multiple languages with ease using state-of-the-art machine translation models.</p>");

    out.push_str("<form method=\"post\" action=\"/\"><div class=\"columns\">");
    render_select(&mut out, "source", "Select source language:", view.source);
    render_select(&mut out, "target", "Select target language:", view.target);
    out.push_str("</div>");
    out.push_str(&format!(
        "<label>Enter text to translate:<textarea name=\"text\" placeholder=\"Type text here...\">{}</textarea></label>",
        escape_html(&view.text)
    ));
    out.push_str("<button type=\"submit\">Translate</button></form>");

    if let Some(outcome) = &view.outcome {
        render_outcome(&mut out, outcome);
    }

    out.push_str("<p class=\"footer\">Powered by Language Translator &#129303;</p>");
    out.push_str("</body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn default_page_lists_all_languages_twice() {
        let html = render_page(&PageView::default());
        for entry in list_languages() {
            let option = format!(">{}</option>", entry.display_name);
            assert_eq!(html.matches(&option).count(), 2, "{}", entry.display_name);
        }
        assert!(html.contains("<option value=\"English\" selected>"));
        assert!(html.contains("<option value=\"French\" selected>"));
        assert!(!html.contains("translated-text\">"));
    }

    #[test]
    fn success_shows_target_name_and_escaped_text() {
        let view = PageView {
            source: Language::English,
            target: Language::German,
            text: "<i>Hi</i>".to_string(),
            outcome: Some(Outcome::Success {
                target: Language::German,
                text: "<i>Hallo</i>".to_string(),
            }),
        };
        let html = render_page(&view);
        assert!(html.contains("Translated Text (German):"));
        assert!(html.contains("&lt;i&gt;Hallo&lt;/i&gt;"));
        assert!(html.contains(">&lt;i&gt;Hi&lt;/i&gt;</textarea>"));
        assert!(!html.contains("<i>Hallo</i>"));
    }

    #[test]
    fn notices_use_their_class() {
        let mut view = PageView::default();
        view.outcome = Some(Outcome::Warning("Please enter some text to translate.".into()));
        assert!(render_page(&view).contains("notice warning"));

        view.outcome = Some(Outcome::Error("Error in translation: boom".into()));
        let html = render_page(&view);
        assert!(html.contains("notice error"));
        assert!(html.contains("Error in translation: boom"));
    }
}
