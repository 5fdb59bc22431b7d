use crate::request::types::QueryParams;

/// Parses a raw query string into a multiset, keeping duplicates and order.
///
/// `+` decodes to a space. A bare key yields an empty value. Bytes that do not
/// form UTF-8 after percent-decoding become U+FFFD; the pair itself is kept.
pub fn parse_query_string(query: &str) -> QueryParams {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_string_simple() {
        let result = parse_query_string("key1=value1&key2=value2");
        assert_eq!(result.first("key1"), Some("value1"));
        assert_eq!(result.first("key2"), Some("value2"));
    }

    #[test]
    fn test_parse_query_string_encoded() {
        let result = parse_query_string("name=John%20Doe&city=New+York");
        assert_eq!(result.first("name"), Some("John Doe"));
        assert_eq!(result.first("city"), Some("New York"));
    }

    #[test]
    fn test_parse_query_string_keeps_duplicates() {
        let result = parse_query_string("q=a&q=b");
        assert_eq!(result.count("q"), 2);
        assert_eq!(result.get_all("q").collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_query_string_bare_key_and_extra_equals() {
        let result = parse_query_string("flag&expr=a=b");
        assert_eq!(result.first("flag"), Some(""));
        assert_eq!(result.first("expr"), Some("a=b"));
    }

    #[test]
    fn test_parse_query_string_empty() {
        assert!(parse_query_string("").is_empty());
        assert!(parse_query_string("&&").is_empty());
    }

    #[test]
    fn test_parse_query_string_keeps_undecodable_pairs() {
        let result = parse_query_string("bad%FF=1&q=a&q=%FF");
        assert_eq!(result.len(), 3);
        assert_eq!(result.first("bad\u{FFFD}"), Some("1"));
        assert_eq!(result.count("q"), 2);
        assert_eq!(result.get_all("q").collect::<Vec<_>>(), vec!["a", "\u{FFFD}"]);
    }
}
