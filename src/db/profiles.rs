use rusqlite::{params, Connection, OptionalExtension};

use super::month_at;
use crate::models::UserProfile;

pub(crate) fn insert(conn: &Connection, profile: &UserProfile) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO profiles (user_id, display_name, email, template_id, start_month)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            profile.user_id,
            profile.display_name,
            profile.email,
            profile.template_id,
            profile.start_month.to_string(),
        ],
    )?;
    Ok(())
}

pub(crate) fn get(conn: &Connection, user_id: &str) -> rusqlite::Result<Option<UserProfile>> {
    conn.query_row(
        "SELECT user_id, display_name, email, template_id, start_month
         FROM profiles WHERE user_id = ?1",
        params![user_id],
        |row| {
            Ok(UserProfile {
                user_id: row.get(0)?,
                display_name: row.get(1)?,
                email: row.get(2)?,
                template_id: row.get(3)?,
                start_month: month_at(row, 4)?,
            })
        },
    )
    .optional()
}
