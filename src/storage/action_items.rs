use diesel::prelude::*;

use crate::shared::models::{ActionItem, InsertActionItem};
use crate::shared::schema::action_items;

pub fn get_action_items(conn: &mut PgConnection, client_id: &str) -> QueryResult<Vec<ActionItem>> {
    action_items::table
        .filter(action_items::client_id.eq(client_id))
        .order(action_items::created_at.desc())
        .load(conn)
}

pub fn insert_action_item(
    conn: &mut PgConnection,
    data: &InsertActionItem,
) -> QueryResult<ActionItem> {
    diesel::insert_into(action_items::table)
        .values(data)
        .get_result(conn)
}

/// Single-statement flip so concurrent toggles cannot lose an update.
/// Returns `Err(NotFound)` when the id does not exist.
pub fn toggle_action_item(conn: &mut PgConnection, id: i32) -> QueryResult<ActionItem> {
    diesel::update(action_items::table.find(id))
        .set((
            action_items::completed.eq(diesel::dsl::not(action_items::completed)),
            action_items::updated_at.eq(diesel::dsl::now),
        ))
        .get_result(conn)
}
