//! Injecting a rendered diagram into a marked region of a text document.

use regex::{NoExpand, Regex};

pub const BEGIN_TAG_DEFAULT: &str = "<!-- BEGIN_ERD -->";
pub const END_TAG_DEFAULT: &str = "<!-- END_ERD -->";

/// Replace everything between `begin_tag` and `end_tag` with a fenced diagram.
///
/// Returns `None` when the document does not contain both tags in order.
pub fn inject_diagram(
    content: &str,
    diagram: &str,
    fence: &str,
    begin_tag: &str,
    end_tag: &str,
) -> Option<String> {
    let pattern = format!("(?s){}.*?{}", regex::escape(begin_tag), regex::escape(end_tag));
    let re = Regex::new(&pattern).ok()?;

    if !re.is_match(content) {
        return None;
    }

    let replacement = format!("{}\n```{}\n{}```\n{}", begin_tag, fence, diagram, end_tag);
    Some(re.replace_all(content, NoExpand(&replacement)).into_owned())
}
