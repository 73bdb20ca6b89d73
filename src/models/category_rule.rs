#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub id: Option<i64>,
    pub pattern: String,
    pub category_id: i64,
    pub is_regex: bool,
}

impl CategoryRule {
    /// Keyword rule. Patterns are stored lowercase.
    pub fn new_keyword(pattern: &str, category_id: i64) -> Self {
        Self {
            id: None,
            pattern: pattern.trim().to_lowercase(),
            category_id,
            is_regex: false,
        }
    }

    pub fn new_regex(pattern: String, category_id: i64) -> Self {
        Self {
            id: None,
            pattern,
            category_id,
            is_regex: true,
        }
    }
}
