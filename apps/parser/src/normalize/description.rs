use crate::extraction::patterns::BULLET_PREFIX;

pub const BULLET: &str = "• ";

/// Collapses whitespace runs, rewrites bullet glyphs and list numbers to
/// "• " and keeps at most one blank line between blocks.
pub fn clean_description(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = true;

    for raw in text.lines() {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !previous_blank {
                lines.push(String::new());
            }
            previous_blank = true;
            continue;
        }

        let line = match BULLET_PREFIX.find(&collapsed) {
            Some(m) => {
                let rest = collapsed[m.end()..].trim();
                if rest.is_empty() {
                    continue;
                }
                format!("{BULLET}{rest}")
            }
            None => collapsed,
        };
        lines.push(line);
        previous_blank = false;
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders cleaned description text as HTML.
///
/// Text with bullets becomes one `<ul>` whose items absorb any following
/// non-bullet lines; text without bullets becomes one `<p>` per paragraph.
pub fn render_html(cleaned: &str) -> String {
    if cleaned.trim().is_empty() {
        return String::new();
    }

    if cleaned.lines().any(|l| l.starts_with(BULLET)) {
        let mut items: Vec<String> = Vec::new();
        for line in cleaned.lines().filter(|l| !l.trim().is_empty()) {
            match line.strip_prefix(BULLET) {
                Some(item) => items.push(item.to_string()),
                None => match items.last_mut() {
                    Some(last) => {
                        last.push(' ');
                        last.push_str(line.trim());
                    }
                    None => items.push(line.trim().to_string()),
                },
            }
        }
        let body: String = items
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item)))
            .collect();
        return format!("<ul>{body}</ul>");
    }

    cleaned
        .split("\n\n")
        .map(|para| para.lines().map(str::trim).collect::<Vec<_>>().join(" "))
        .filter(|para| !para.is_empty())
        .map(|para| format!("<p>{}</p>", escape_html(&para)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bullets() {
        let html = render_html("• Built the API\ncontinued here\n• Cut costs by 30% & more");
        assert_eq!(
            html,
            "<ul><li>Built the API continued here</li><li>Cut costs by 30% &amp; more</li></ul>"
        );
    }

    #[test]
    fn test_render_paragraphs() {
        assert_eq!(
            render_html("First line\nsame para\n\nSecond <para>"),
            "<p>First line same para</p><p>Second &lt;para&gt;</p>"
        );
        assert_eq!(render_html(""), "");
    }

    #[test]
    fn test_bullet_glyphs_normalized() {
        let input = "* one\n- two\n◦ three\n1. four\n2) five";
        assert_eq!(clean_description(input), "• one\n• two\n• three\n• four\n• five");
    }

    #[test]
    fn test_whitespace_and_blank_lines_collapsed() {
        let input = "\n\n  Led   the\tteam \n\n\n\nShipped  v2  \n\n";
        assert_eq!(clean_description(input), "Led the team\n\nShipped v2");
    }

    #[test]
    fn test_lone_bullet_dropped() {
        assert_eq!(clean_description("•\n• real"), "• real");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "* one\n\n\n-  two   words",
            "Plain paragraph.\n  \nAnother one.",
            "•Tight bullet\n3. numbered",
        ];
        for input in inputs {
            let once = clean_description(input);
            assert_eq!(clean_description(&once), once);
        }
    }
}
