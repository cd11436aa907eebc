use scraper::{Html, Selector};

/// Extracts the candidate titles listed on a rendered disambiguation page.
/// Returns the text of the first link of every list item, skipping
/// table-of-contents entries.
pub fn extract_options(html: &str) -> Vec<String> {
    let document = Html::parse_fragment(html);
    let mut options: Vec<String> = Vec::new();

    let (Ok(item_selector), Ok(link_selector)) = (Selector::parse("li"), Selector::parse("a")) else {
        return options;
    };

    for item in document.select(&item_selector) {
        let is_toc = item
            .value()
            .attr("class")
            .map(|class| class.contains("tocsection"))
            .unwrap_or(false);
        if is_toc {
            continue;
        }

        if let Some(link) = item.select(&link_selector).next() {
            let text = link.text().collect::<String>().trim().to_string();
            if !text.is_empty() && !options.contains(&text) {
                options.push(text);
            }
        }
    }

    options
}
