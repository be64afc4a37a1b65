// Store page field extraction.
// Pulls the title and category labels out of storefront HTML without building a DOM.

use std::cell::RefCell;
use std::rc::Rc;

use lol_html::{RewriteStrSettings, element, rewrite_str, text};

/// Primary heading on an app page.
const HEADING_SELECTOR: &str = ".apphub_AppName";
const TITLE_SELECTOR: &str = "title";
/// Feature links in the store page category sidebar.
const CATEGORY_LINK_SELECTOR: &str = "#category_block a";
const TITLE_SUFFIX: &str = " on Steam";
const MULTIPLAYER_MARKERS: &[&str] = &["multi-player", "multiplayer", "co-op", "pvp"];

/// Raw fields found on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ExtractedPage {
    pub title: Option<String>,
    pub categories: Vec<String>,
}

impl ExtractedPage {
    pub fn is_multiplayer(&self) -> bool {
        self.categories.iter().any(|label| is_multiplayer_label(label))
    }
}

pub(crate) fn is_multiplayer_label(label: &str) -> bool {
    let label = label.to_ascii_lowercase();
    MULTIPLAYER_MARKERS
        .iter()
        .any(|marker| label.contains(marker))
}

/// Scan a store page. The heading wins over `<title>`; the latter has the
/// " on Steam" suffix removed.
pub(crate) fn extract(html: &str) -> Result<ExtractedPage, String> {
    let heading = Rc::new(RefCell::new(String::new()));
    let page_title = Rc::new(RefCell::new(String::new()));
    let categories: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                text!(HEADING_SELECTOR, {
                    let heading = Rc::clone(&heading);
                    move |chunk| {
                        heading.borrow_mut().push_str(chunk.as_str());
                        Ok(())
                    }
                }),
                text!(TITLE_SELECTOR, {
                    let page_title = Rc::clone(&page_title);
                    move |chunk| {
                        page_title.borrow_mut().push_str(chunk.as_str());
                        Ok(())
                    }
                }),
                element!(CATEGORY_LINK_SELECTOR, {
                    let categories = Rc::clone(&categories);
                    move |_el| {
                        categories.borrow_mut().push(String::new());
                        Ok(())
                    }
                }),
                text!(CATEGORY_LINK_SELECTOR, {
                    let categories = Rc::clone(&categories);
                    move |chunk| {
                        if let Some(current) = categories.borrow_mut().last_mut() {
                            current.push_str(chunk.as_str());
                        }
                        Ok(())
                    }
                }),
            ],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|err| err.to_string())?;

    let heading = clean_text(&heading.borrow());
    let title = if heading.is_empty() {
        let fallback = clean_text(&page_title.borrow());
        let fallback = fallback
            .strip_suffix(TITLE_SUFFIX)
            .unwrap_or(&fallback)
            .trim()
            .to_string();
        (!fallback.is_empty()).then_some(fallback)
    } else {
        Some(heading)
    };

    let categories = categories
        .borrow()
        .iter()
        .map(|label| clean_text(label))
        .filter(|label| !label.is_empty())
        .collect();

    Ok(ExtractedPage { title, categories })
}

/// Decode entities, drop non-ASCII characters, and collapse whitespace.
pub(crate) fn clean_text(raw: &str) -> String {
    let decoded = decode_entities(raw);
    let ascii: String = decoded.chars().filter(char::is_ascii).collect();
    ascii.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the character references that show up in store titles.
fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
