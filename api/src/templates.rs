//! Server-rendered HTML

use payout_core::Post;
use payout_economics::PayoutResult;

const STYLE: &str = "body{font-family:sans-serif;max-width:640px;margin:40px auto;color:#222}\
table{border-collapse:collapse;width:100%}td{padding:6px 8px;border-bottom:1px solid #ddd}\
td.amount{text-align:right;font-family:monospace}input[type=text]{width:80%}";

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

pub fn landing_page() -> String {
    layout(
        "Steem payout estimator",
        "<h1>Steem payout estimator</h1>\n\
         <p>Paste a post URL to see how its pending payout splits between author, curators and beneficiaries.</p>\n\
         <form method=\"get\" action=\"/\">\n\
         <input type=\"text\" name=\"url\" placeholder=\"https://steemit.com/tag/@author/permlink\">\n\
         <button type=\"submit\">Estimate</button>\n\
         </form>",
    )
}

pub fn rewards_page(post: &Post, payout: &PayoutResult) -> String {
    let title = if post.title.is_empty() {
        post.identifier().to_string()
    } else {
        post.title.clone()
    };

    let body = format!(
        "<h1>{title}</h1>\n\
         <p>by <strong>@{author}</strong> &middot; cashout {cashout} UTC</p>\n\
         <table>\n\
         <tr><td>Total</td><td class=\"amount\">{total:.2} SBD</td></tr>\n\
         <tr><td>Curation</td><td class=\"amount\">{curation:.2} SBD</td></tr>\n\
         <tr><td>Author</td><td class=\"amount\">{author_reward:.2} SBD</td></tr>\n\
         <tr><td>Beneficiaries</td><td class=\"amount\">{beneficiaries:.2} SBD</td></tr>\n\
         </table>\n\
         <p><a href=\"/\">Estimate another post</a></p>",
        title = escape_html(&title),
        author = escape_html(&post.author),
        cashout = post.cashout_time.format("%Y-%m-%d %H:%M"),
        total = payout.total,
        curation = payout.curation,
        author_reward = payout.author,
        beneficiaries = payout.beneficiaries,
    );

    layout(&title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_landing_page_has_url_form() {
        let page = landing_page();
        assert!(page.contains("name=\"url\""));
        assert!(page.starts_with("<!DOCTYPE html>"));
    }
}
