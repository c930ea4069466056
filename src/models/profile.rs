use super::MonthKey;

/// The signed-in user and the budget template they onboarded with.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub template_id: String,
    pub start_month: MonthKey,
}
