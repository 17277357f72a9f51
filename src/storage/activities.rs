use diesel::prelude::*;

use crate::shared::models::{Activity, InsertActivity};
use crate::shared::schema::activities;

pub const DEFAULT_ACTIVITY_LIMIT: i64 = 50;

/// Most recent activity rows for a tenant.
pub fn get_activities(
    conn: &mut PgConnection,
    client_id: &str,
    limit: Option<i64>,
) -> QueryResult<Vec<Activity>> {
    activities::table
        .filter(activities::client_id.eq(client_id))
        .order(activities::created_at.desc())
        .limit(limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT))
        .load(conn)
}

pub fn insert_activity(conn: &mut PgConnection, data: &InsertActivity) -> QueryResult<Activity> {
    diesel::insert_into(activities::table)
        .values(data)
        .get_result(conn)
}
