use chrono::NaiveDate;

/// An expense recorded in the ledger. `amount` is in cents and always positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub amount: i64,
    pub entry_date: NaiveDate,
    pub receiver: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
}

impl Transaction {
    pub fn new(amount: i64, entry_date: NaiveDate) -> Self {
        Self {
            id: None,
            amount,
            entry_date,
            receiver: None,
            description: None,
            category_id: None,
        }
    }

    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text the categorizer and search look at: receiver and description joined.
    pub fn match_text(&self) -> String {
        let receiver = self.receiver.as_deref().unwrap_or("");
        let description = self.description.as_deref().unwrap_or("");
        format!("{receiver} {description}").trim().to_string()
    }

    /// Receiver name for grouping, with blanks folded into "Unknown".
    pub fn payee_name(&self) -> String {
        match self.receiver.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => "Unknown".to_string(),
        }
    }
}
