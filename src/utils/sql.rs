/// 转义 LIKE 模式中的通配符，使搜索词按字面匹配
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("john"), "john");
        assert_eq!(escape_like_pattern("100%_a\\b"), "100\\%\\_a\\\\b");
    }
}
