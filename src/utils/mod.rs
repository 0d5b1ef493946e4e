pub mod url_validator;

/// 短码长度限制
pub const CODE_MIN_LEN: usize = 6;
pub const CODE_MAX_LEN: usize = 8;

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 随机选择字母和数字
    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    // 生成指定长度的随机字符串
    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}

/// Check whether a path segment is code-shaped: `[A-Za-z0-9]{6,8}`.
///
/// Codes of any other shape can never exist, so callers skip the store
/// entirely when this returns false.
pub fn is_valid_code(code: &str) -> bool {
    (CODE_MIN_LEN..=CODE_MAX_LEN).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_code_length() {
        for len in [6, 7, 8, 16] {
            assert_eq!(generate_random_code(len).len(), len);
        }
    }

    #[test]
    fn test_generate_random_code_charset() {
        let code = generate_random_code(64);
        assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_random_code_distinct() {
        // 长度 7、62 个符号，碰撞概率可以忽略
        let a = generate_random_code(7);
        let b = generate_random_code(7);
        assert_ne!(a, b);
    }

    #[test]
    fn test_valid_codes() {
        assert!(is_valid_code("abc123"));
        assert!(is_valid_code("ABCdef12"));
        assert!(is_valid_code("1234567"));
    }

    #[test]
    fn test_invalid_codes() {
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("abc12")); // too short
        assert!(!is_valid_code("abc123456")); // too long
        assert!(!is_valid_code("abc-12"));
        assert!(!is_valid_code("abc 12"));
        assert!(!is_valid_code("héllo1"));
        assert!(!is_valid_code("favicon.ico"));
    }
}
