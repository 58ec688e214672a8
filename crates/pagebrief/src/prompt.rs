//! Summarization prompt construction

/// Build the instruction prompt for a page summary
///
/// Asks for exactly four labeled sections in a fixed order, with the source
/// URL and bounded text embedded verbatim. Pure template: identical
/// `(url, text)` inputs yield byte-identical output, so prompts are
/// deterministic under test.
pub fn build_prompt(url: &str, text: &str) -> String {
    format!(
        "Analyze the following content from a web page and extract the key information.\n\
         \n\
         URL: {url}\n\
         \n\
         Content:\n\
         {text}\n\
         \n\
         Please extract and structure the following information:\n\
         1. Principal title\n\
         2. Executive summary (2-3 sentences)\n\
         3. Key points (list)\n\
         4. Conclusions or important takeaways\n\
         \n\
         Format the response in a clear and structured way."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = build_prompt("https://example.com/a", "Some page text.");
        let b = build_prompt("https://example.com/a", "Some page text.");
        assert_eq!(a, b);
    }

    #[test]
    fn test_embeds_inputs_verbatim() {
        let prompt = build_prompt("https://example.com/page", "Line one\nLine two");
        assert!(prompt.contains("URL: https://example.com/page\n"));
        assert!(prompt.contains("Content:\nLine one\nLine two\n"));
    }

    #[test]
    fn test_section_order_is_fixed() {
        let prompt = build_prompt("https://example.com", "text");
        let title = prompt.find("1. Principal title").unwrap();
        let summary = prompt.find("2. Executive summary").unwrap();
        let points = prompt.find("3. Key points").unwrap();
        let takeaways = prompt.find("4. Conclusions or important takeaways").unwrap();
        assert!(title < summary && summary < points && points < takeaways);
    }
}
