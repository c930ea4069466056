use tracing::info;

use super::{template_store, IdGenerator};
use crate::db::{profiles, Database};
use crate::error::{BudgetError, Entity, Result};
use crate::models::{BudgetTemplate, MonthKey, NewTemplate, UserProfile};

/// Everything collected on the intro screens.
#[derive(Debug, Clone)]
pub struct OnboardingInput {
    pub user_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub template: NewTemplate,
    pub start_month: MonthKey,
}

/// First-run setup versus returning users, as two separate calls.
pub struct Onboarding<'a> {
    db: &'a Database,
    ids: &'a dyn IdGenerator,
}

impl<'a> Onboarding<'a> {
    pub fn new(db: &'a Database, ids: &'a dyn IdGenerator) -> Self {
        Self { db, ids }
    }

    /// Create the user's template and profile together.
    pub fn initialize_from_onboarding(&self, input: OnboardingInput) -> Result<UserProfile> {
        self.db.write(|conn| {
            if profiles::get(conn, &input.user_id)?.is_some() {
                return Err(BudgetError::validation(format!(
                    "user {} has already been onboarded",
                    input.user_id
                )));
            }
            let template_id = template_store::create_in(conn, self.ids, input.template)?;
            let profile = UserProfile {
                user_id: input.user_id,
                display_name: input.display_name,
                email: input.email,
                template_id,
                start_month: input.start_month,
            };
            profiles::insert(conn, &profile)?;
            info!(user_id = %profile.user_id, template_id = %profile.template_id, "Onboarded user");
            Ok(profile)
        })
    }

    /// Profile and template of a user who finished onboarding earlier.
    pub fn load_existing(&self, user_id: &str) -> Result<(UserProfile, BudgetTemplate)> {
        let conn = self.db.conn();
        let profile = profiles::get(conn, user_id)?
            .ok_or_else(|| BudgetError::not_found(Entity::Profile, user_id))?;
        let template = template_store::get_in(conn, &profile.template_id)?;
        Ok((profile, template))
    }
}
