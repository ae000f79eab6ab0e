/// 转义 LIKE 模式中的通配符，避免用户输入干扰模糊搜索
pub fn escape_like_pattern(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_wildcards() {
        assert_eq!(escape_like_pattern("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like_pattern("plain"), "plain");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
    }
}
