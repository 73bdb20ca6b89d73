/// Spending ceiling for a single (year, month). The store keeps at most one
/// budget per slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    pub id: Option<i64>,
    pub amount: i64,
    pub target_month: u32,
    pub target_year: i32,
}

impl Budget {
    pub fn new(amount: i64, target_month: u32, target_year: i32) -> Self {
        Self {
            id: None,
            amount,
            target_month,
            target_year,
        }
    }
}
