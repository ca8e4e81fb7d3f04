use markdown::{Options as MarkdownOptions, to_html_with_options};

fn markdown_options() -> MarkdownOptions {
    let mut options = MarkdownOptions::gfm();
    // Agent replies may carry inline HTML; it is shown as-is.
    options.compile.allow_dangerous_html = true;
    options.compile.allow_dangerous_protocol = true;
    options.compile.gfm_tagfilter = false;
    options
}

/// Render a transcript message to HTML for the chat page.
pub fn render_markdown(input: &str) -> String {
    let options = markdown_options();
    to_html_with_options(input, &options).unwrap_or_else(|_| input.to_string())
}
