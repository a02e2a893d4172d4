use crate::paper::SummarizedPaper;

/// Backslash-escape brackets and parentheses so a URL can sit inside `(...)`.
fn escape_link_target(url: &str) -> String {
    url.chars().fold(String::with_capacity(url.len()), |mut out, c| {
        if matches!(c, '[' | ']' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
        out
    })
}

/// Headings must stay on one line.
fn single_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

pub fn format_papers(topic: &str, papers: &[SummarizedPaper]) -> String {
    let mut output = format!("# {}\n\n", single_line(topic));
    if papers.is_empty() {
        output.push_str("(No papers found.)\n");
        return output;
    }

    for entry in papers {
        let paper = &entry.paper;
        output.push_str(&format!("## {}\n\n", single_line(&paper.title)));

        let authors: Vec<&str> = paper
            .authors
            .iter()
            .map(String::as_str)
            .filter(|a| !a.is_empty())
            .collect();
        let mut meta = format!("*{}* ({})", paper.source, paper.year_label());
        if !authors.is_empty() {
            meta.push_str(&format!(" {}", authors.join(", ")));
        }
        if !paper.url.is_empty() {
            meta.push_str(&format!(
                " [link]({})",
                escape_link_target(&paper.url)
            ));
        }
        output.push_str(&meta);
        output.push_str("\n\n");
        output.push_str(&entry.summary);
        output.push_str("\n\n---\n\n");
    }
    output
}
